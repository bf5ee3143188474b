use serde::Serialize;

/// The root verb of a derived query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Single or optional result lookup
    Find,
    /// Single result lookup
    Get,
    /// Number of matching records
    Count,
    /// Whether any record matches
    Exists,
    /// Lazily streamed results
    Stream,
    /// Collected results
    List,
    /// Bulk UPDATE
    Update,
    /// Bulk DELETE
    Delete,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Exists,
        Action::Count,
        Action::Get,
        Action::Find,
        Action::List,
        Action::Stream,
        Action::Update,
        Action::Delete,
    ];

    /// Lowercase keyword, valid only at the very start of a method name.
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Find => "find",
            Action::Get => "get",
            Action::Count => "count",
            Action::Exists => "exists",
            Action::Stream => "stream",
            Action::List => "list",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Capitalized keyword, valid after an ignored prefix.
    pub fn capitalized(&self) -> &'static str {
        match self {
            Action::Find => "Find",
            Action::Get => "Get",
            Action::Count => "Count",
            Action::Exists => "Exists",
            Action::Stream => "Stream",
            Action::List => "List",
            Action::Update => "Update",
            Action::Delete => "Delete",
        }
    }

    /// Update and delete mutate an unbounded set of records and cannot be ordered.
    pub fn is_bulk_mutation(&self) -> bool {
        matches!(self, Action::Update | Action::Delete)
    }

    /// Actions that accept the bare `All` suffix in projection position.
    pub fn accepts_all(&self) -> bool {
        matches!(self, Action::Find | Action::List | Action::Stream)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Find => write!(f, "FIND"),
            Action::Get => write!(f, "GET"),
            Action::Count => write!(f, "COUNT"),
            Action::Exists => write!(f, "EXISTS"),
            Action::Stream => write!(f, "STREAM"),
            Action::List => write!(f, "LIST"),
            Action::Update => write!(f, "UPDATE"),
            Action::Delete => write!(f, "DELETE"),
        }
    }
}

/// Result-shaping projection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionKind {
    Distinct,
    First,
    Max,
    Min,
    Sum,
    Avg,
    /// Bare property name: a single-field projection
    Property,
}

impl ProjectionKind {
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            ProjectionKind::Max | ProjectionKind::Min | ProjectionKind::Sum | ProjectionKind::Avg
        )
    }

    /// Keyword text for kinds that have one.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            ProjectionKind::Distinct => Some("Distinct"),
            ProjectionKind::First => Some("First"),
            ProjectionKind::Max => Some("Max"),
            ProjectionKind::Min => Some("Min"),
            ProjectionKind::Sum => Some("Sum"),
            ProjectionKind::Avg => Some("Avg"),
            ProjectionKind::Property => None,
        }
    }
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionKind::Distinct => write!(f, "DISTINCT"),
            ProjectionKind::First => write!(f, "FIRST"),
            ProjectionKind::Max => write!(f, "MAX"),
            ProjectionKind::Min => write!(f, "MIN"),
            ProjectionKind::Sum => write!(f, "SUM"),
            ProjectionKind::Avg => write!(f, "AVG"),
            ProjectionKind::Property => write!(f, "PROPERTY"),
        }
    }
}

/// Comparison operators of a criteria condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    After,
    Before,
    Contains,
    EndsWith,
    StartsWith,
    #[default]
    Equal,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Between,
    Like,
    In,
    Empty,
    Null,
    True,
    False,
}

impl Operator {
    pub const ALL: [Operator; 17] = [
        Operator::After,
        Operator::Before,
        Operator::Contains,
        Operator::EndsWith,
        Operator::StartsWith,
        Operator::Equal,
        Operator::LessThan,
        Operator::LessThanEqual,
        Operator::GreaterThan,
        Operator::GreaterThanEqual,
        Operator::Between,
        Operator::Like,
        Operator::In,
        Operator::Empty,
        Operator::Null,
        Operator::True,
        Operator::False,
    ];

    /// Keyword as it appears in a method name.
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::After => "After",
            Operator::Before => "Before",
            Operator::Contains => "Contains",
            Operator::EndsWith => "EndsWith",
            Operator::StartsWith => "StartsWith",
            Operator::Equal => "Equal",
            Operator::LessThan => "LessThan",
            Operator::LessThanEqual => "LessThanEqual",
            Operator::GreaterThan => "GreaterThan",
            Operator::GreaterThanEqual => "GreaterThanEqual",
            Operator::Between => "Between",
            Operator::Like => "Like",
            Operator::In => "In",
            Operator::Empty => "Empty",
            Operator::Null => "Null",
            Operator::True => "True",
            Operator::False => "False",
        }
    }

    /// Number of method parameters the code generator binds for this operator.
    pub fn parameter_count(&self) -> usize {
        match self {
            Operator::Empty | Operator::Null | Operator::True | Operator::False => 0,
            Operator::Between => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operator::After => "AFTER",
            Operator::Before => "BEFORE",
            Operator::Contains => "CONTAINS",
            Operator::EndsWith => "ENDS_WITH",
            Operator::StartsWith => "STARTS_WITH",
            Operator::Equal => "EQUAL",
            Operator::LessThan => "LESS_THAN",
            Operator::LessThanEqual => "LESS_THAN_EQUAL",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterThanEqual => "GREATER_THAN_EQUAL",
            Operator::Between => "BETWEEN",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::Empty => "EMPTY",
            Operator::Null => "NULL",
            Operator::True => "TRUE",
            Operator::False => "FALSE",
        };
        write!(f, "{}", name)
    }
}

/// Logical connective joining a condition to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connective::And => "And",
            Connective::Or => "Or",
        }
    }
}

impl std::fmt::Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connective::And => write!(f, "AND"),
            Connective::Or => write!(f, "OR"),
        }
    }
}

/// Sort direction of an order item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Asc => "Asc",
            Direction::Desc => "Desc",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}
