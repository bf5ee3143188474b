//! Method-name parser.
//!
//! Drives the [`Scanner`] over a method name and assembles the token
//! stream into a [`QueryDescriptor`].
//!
//! ```text
//! findFirst3DistinctByLastNameOrderByFirstNameDesc
//!   action      FIND
//!   projection  FIRST(3) DISTINCT
//!   criteria    lastName EQUAL
//!   ordering    firstName DESC
//! ```


use tracing::debug;

use crate::ast::*;
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::lexer::{Scanner, Token, TokenCategory, TokenKind};

/// Reusable, stateless parser. All scan state lives in a fresh [`Scanner`]
/// per call, so one parser can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodNameParser {
    config: ParserConfig,
}

impl MethodNameParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a method name into a query descriptor.
    ///
    /// Fails fast on the first error; no partial descriptor is returned.
    pub fn parse(&self, name: &str) -> Result<QueryDescriptor, ParseError> {
        let result = self.assemble(name);
        match &result {
            Ok(query) => debug!(method = name, query = %query, "parsed method name"),
            Err(err) => debug!(method = name, error = %err, "rejected method name"),
        }
        result
    }

    /// Token stream of a method name, ending with [`TokenKind::End`].
    pub fn tokenize<'a>(&self, name: &'a str) -> Result<Vec<Token<'a>>, ParseError> {
        crate::lexer::tokenize(name, self.config)
    }

    fn assemble(&self, name: &str) -> Result<QueryDescriptor, ParseError> {
        let mut scanner = Scanner::with_config(name, self.config);
        let mut assembler = Assembler::default();
        while let Some(token) = scanner.next_token()? {
            assembler.feed(&token)?;
        }
        assembler.finish(name.len())
    }
}

/// Parse with the default configuration.
pub fn parse(name: &str) -> Result<QueryDescriptor, ParseError> {
    MethodNameParser::new().parse(name)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Section {
    #[default]
    Projection,
    Criteria,
    Order,
}

/// Builds the descriptor clause by clause as tokens arrive.
#[derive(Debug, Default)]
struct Assembler {
    section: Section,
    action: Option<Action>,
    projection: Option<Projection>,
    path: PathBuilder,
    connective: Option<Connective>,
    negated: bool,
    ignore_case: bool,
    operator: Option<Operator>,
    criteria: Vec<CriteriaItem>,
    ordering: Vec<OrderItem>,
}

impl Assembler {
    fn feed(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        let position = token.position;
        match token.kind {
            TokenKind::Prefix | TokenKind::All | TokenKind::Separator => {}
            TokenKind::Action(action) => self.action = Some(action),
            TokenKind::First(count) => self.projection = Some(Projection::first(count)),
            TokenKind::Distinct => {
                self.projection = Some(match self.projection.take() {
                    Some(projection) => projection.with_distinct(),
                    None => Projection::distinct(),
                });
            }
            TokenKind::Aggregate(kind) => {
                self.projection = Some(Projection {
                    kind,
                    count: None,
                    distinct: false,
                    property: None,
                });
            }
            TokenKind::PropertyStart | TokenKind::PropertyPart => self.path.push(token.text),
            TokenKind::By => {
                self.close_section(position)?;
                self.section = Section::Criteria;
            }
            TokenKind::OrderBy => {
                self.close_section(position)?;
                self.section = Section::Order;
            }
            TokenKind::Not => self.negated = true,
            TokenKind::IgnoreCase => self.ignore_case = true,
            TokenKind::Operator(operator) => self.operator = Some(operator),
            TokenKind::Connective(connective) => {
                self.finish_condition(position)?;
                self.connective = Some(connective);
            }
            TokenKind::Direction(direction) => self.finish_order_item(direction, position)?,
            TokenKind::End => self.close_section(position)?,
        }
        Ok(())
    }

    fn close_section(&mut self, position: usize) -> Result<(), ParseError> {
        match self.section {
            Section::Projection => {
                if let Some(property) = self.path.take() {
                    self.projection = Some(match self.projection.take() {
                        Some(projection) => projection.with_property(property),
                        None => Projection::property(property),
                    });
                }
                Ok(())
            }
            Section::Criteria => self.finish_condition(position),
            Section::Order if self.path.is_empty() => Ok(()),
            Section::Order => self.finish_order_item(Direction::Asc, position),
        }
    }

    fn take_path(&mut self, position: usize) -> Result<PropertyPath, ParseError> {
        self.path
            .take()
            .ok_or_else(|| ParseError::unterminated(position, &[TokenCategory::Property]))
    }

    fn finish_condition(&mut self, position: usize) -> Result<(), ParseError> {
        let property = self.take_path(position)?;
        let condition = Condition {
            property,
            operator: self.operator.take().unwrap_or_default(),
            negated: std::mem::take(&mut self.negated),
            ignore_case: std::mem::take(&mut self.ignore_case),
        };
        self.criteria
            .push(CriteriaItem::new(self.connective.take(), condition));
        Ok(())
    }

    fn finish_order_item(&mut self, direction: Direction, position: usize) -> Result<(), ParseError> {
        let property = self.take_path(position)?;
        self.ordering.push(OrderItem::new(property, direction));
        Ok(())
    }

    fn finish(self, end: usize) -> Result<QueryDescriptor, ParseError> {
        let action = self
            .action
            .ok_or_else(|| ParseError::unterminated(end, &[TokenCategory::Action]))?;
        Ok(QueryDescriptor::new(
            action,
            self.projection,
            self.criteria,
            self.ordering,
        ))
    }
}
