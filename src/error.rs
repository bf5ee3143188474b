//! Error types for qbmn.

use thiserror::Error;

use crate::lexer::TokenCategory;

/// Token categories a scan mode could have continued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected(pub &'static [TokenCategory]);

impl Expected {
    pub fn categories(&self) -> &'static [TokenCategory] {
        self.0
    }
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, category) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", category)?;
        }
        Ok(())
    }
}

/// Failure to derive a query from a method name.
///
/// Positions are byte offsets into the method name, which is ASCII, so they
/// are also character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The current mode has no valid continuation for the next character run.
    #[error("Malformed identifier at position {position}: expected {expected}")]
    MalformedIdentifier { position: usize, expected: Expected },

    /// Input ended while the current mode still required more tokens.
    #[error("Unterminated expression at position {position}: expected {expected}")]
    UnterminatedExpression { position: usize, expected: Expected },

    /// Leading, trailing or doubled `_` path separator.
    #[error("Dangling separator at position {position}")]
    DanglingSeparator { position: usize },

    /// `OrderBy` after an `update` or `delete` action.
    #[error("Ordering is not allowed with bulk operations (position {position})")]
    InvalidOrderingWithBulkOperation { position: usize },

    /// `First` without a valid positive count.
    #[error("Invalid projection count '{text}' at position {position}")]
    InvalidProjectionCount { position: usize, text: String },
}

/// Discriminant of [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedIdentifier,
    UnterminatedExpression,
    DanglingSeparator,
    InvalidOrderingWithBulkOperation,
    InvalidProjectionCount,
}

impl ParseError {
    pub fn malformed(position: usize, expected: &'static [TokenCategory]) -> Self {
        Self::MalformedIdentifier {
            position,
            expected: Expected(expected),
        }
    }

    pub fn unterminated(position: usize, expected: &'static [TokenCategory]) -> Self {
        Self::UnterminatedExpression {
            position,
            expected: Expected(expected),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::MalformedIdentifier { .. } => ErrorKind::MalformedIdentifier,
            ParseError::UnterminatedExpression { .. } => ErrorKind::UnterminatedExpression,
            ParseError::DanglingSeparator { .. } => ErrorKind::DanglingSeparator,
            ParseError::InvalidOrderingWithBulkOperation { .. } => {
                ErrorKind::InvalidOrderingWithBulkOperation
            }
            ParseError::InvalidProjectionCount { .. } => ErrorKind::InvalidProjectionCount,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::MalformedIdentifier { position, .. }
            | ParseError::UnterminatedExpression { position, .. }
            | ParseError::DanglingSeparator { position }
            | ParseError::InvalidOrderingWithBulkOperation { position }
            | ParseError::InvalidProjectionCount { position, .. } => *position,
        }
    }

    /// Categories that would have been accepted at [`position`](Self::position).
    pub fn expected(&self) -> &'static [TokenCategory] {
        match self {
            ParseError::MalformedIdentifier { expected, .. }
            | ParseError::UnterminatedExpression { expected, .. } => expected.categories(),
            ParseError::DanglingSeparator { .. } => &[TokenCategory::Property],
            ParseError::InvalidOrderingWithBulkOperation { .. } => &[TokenCategory::End],
            ParseError::InvalidProjectionCount { .. } => &[TokenCategory::Digits],
        }
    }
}

/// The main error type for qbmn operations.
#[derive(Debug, Error)]
pub enum QbmnError {
    /// Failed to parse a method name.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed TOML configuration.
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for qbmn operations.
pub type QbmnResult<T> = Result<T, QbmnError>;
