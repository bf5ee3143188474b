//! # qbmn: Query By Method Name
//!
//! > **Name the method. Get the query.**
//!
//! qbmn derives a structured query description from the name of a
//! data-access method, following a fixed naming convention.
//!
//! ## Quick Example
//!
//! ```rust
//! use qbmn::prelude::*;
//!
//! let query = qbmn::parse("findByLastNameAndAgeGreaterThan").unwrap();
//! assert_eq!(query.action(), Action::Find);
//! assert_eq!(query.criteria().len(), 2);
//! assert_eq!(query.parameter_count(), 2);
//! ```
//!
//! ## Naming Convention
//!
//! | Part       | Keywords                                            | Example            |
//! |------------|-----------------------------------------------------|--------------------|
//! | Action     | `find` `get` `count` `exists` `list` `stream` `update` `delete` | `find`  |
//! | Projection | `First<N>` `Distinct` `Max` `Min` `Sum` `Avg` `All`  | `First3Distinct`   |
//! | Criteria   | `By` property [`Not`] [`IgnoreCase`] [operator]     | `ByAgeNotBetween`  |
//! | Connective | `And` `Or`                                          | `AndName`          |
//! | Ordering   | `OrderBy` property [`Asc` / `Desc`]                 | `OrderByNameDesc`  |
//! | Nesting    | `_`                                                 | `Address_City`     |

pub mod ast;
pub mod config;
pub mod error;
pub mod fmt;
pub mod lexer;
pub mod parser;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::{Config, ParserConfig};
    pub use crate::error::*;
    pub use crate::fmt::Formatter;
    pub use crate::lexer::{Token, TokenCategory, TokenKind};
    pub use crate::parser::MethodNameParser;
}

/// Parse a method name with the default configuration.
///
/// # Example
///
/// ```
/// use qbmn::parse;
///
/// let query = parse("countDistinctByStatus").unwrap();
/// assert_eq!(query.criteria()[0].condition.property.to_string(), "status");
/// ```
pub fn parse(name: &str) -> Result<ast::QueryDescriptor, error::ParseError> {
    parser::parse(name)
}

/// Token stream of a method name with the default configuration.
pub fn tokenize(name: &str) -> Result<Vec<lexer::Token<'_>>, error::ParseError> {
    lexer::tokenize(name, config::ParserConfig::default())
}
