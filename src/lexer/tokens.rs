//! Token vocabulary of method names.

use nom::bytes::complete::tag;
use serde::Serialize;

use crate::ast::{Action, Connective, Direction, Operator, ProjectionKind};

/// Lexical category of a token, used in expected-sets of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TokenCategory {
    Action,
    All,
    First,
    Digits,
    Distinct,
    Aggregate,
    Property,
    Separator,
    By,
    OrderBy,
    Not,
    IgnoreCase,
    Operator,
    Connective,
    Direction,
    End,
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenCategory::Action => write!(f, "action keyword"),
            TokenCategory::All => write!(f, "'All'"),
            TokenCategory::First => write!(f, "'First<N>'"),
            TokenCategory::Digits => write!(f, "digits"),
            TokenCategory::Distinct => write!(f, "'Distinct'"),
            TokenCategory::Aggregate => write!(f, "aggregate (Max, Min, Sum, Avg)"),
            TokenCategory::Property => write!(f, "property name"),
            TokenCategory::Separator => write!(f, "'_'"),
            TokenCategory::By => write!(f, "'By'"),
            TokenCategory::OrderBy => write!(f, "'OrderBy'"),
            TokenCategory::Not => write!(f, "'Not'"),
            TokenCategory::IgnoreCase => write!(f, "'IgnoreCase'"),
            TokenCategory::Operator => write!(f, "operator"),
            TokenCategory::Connective => write!(f, "'And' or 'Or'"),
            TokenCategory::Direction => write!(f, "'Asc' or 'Desc'"),
            TokenCategory::End => write!(f, "end of input"),
        }
    }
}

/// Token kind with its decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Human-readable text before a capitalized action keyword.
    Prefix,
    Action(Action),
    All,
    First(u32),
    Distinct,
    Aggregate(ProjectionKind),
    By,
    OrderBy,
    /// First segment of a property path.
    PropertyStart,
    /// Segment following a separator.
    PropertyPart,
    Separator,
    Not,
    IgnoreCase,
    Operator(Operator),
    Connective(Connective),
    Direction(Direction),
    End,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Prefix | TokenKind::Action(_) => TokenCategory::Action,
            TokenKind::All => TokenCategory::All,
            TokenKind::First(_) => TokenCategory::First,
            TokenKind::Distinct => TokenCategory::Distinct,
            TokenKind::Aggregate(_) => TokenCategory::Aggregate,
            TokenKind::By => TokenCategory::By,
            TokenKind::OrderBy => TokenCategory::OrderBy,
            TokenKind::PropertyStart | TokenKind::PropertyPart => TokenCategory::Property,
            TokenKind::Separator => TokenCategory::Separator,
            TokenKind::Not => TokenCategory::Not,
            TokenKind::IgnoreCase => TokenCategory::IgnoreCase,
            TokenKind::Operator(_) => TokenCategory::Operator,
            TokenKind::Connective(_) => TokenCategory::Connective,
            TokenKind::Direction(_) => TokenCategory::Direction,
            TokenKind::End => TokenCategory::End,
        }
    }
}

/// A scanned token: kind, matched text and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }
}

/// A fixed keyword and the token it produces.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub text: &'static str,
    pub kind: TokenKind,
}

const fn kw(text: &'static str, kind: TokenKind) -> Keyword {
    Keyword { text, kind }
}

/// Every non-action keyword, longest first.
///
/// Scan modes filter this table by category; the ordering guarantees
/// maximal munch (`GreaterThanEqual` before `GreaterThan`, `OrderBy` before `Or`).
pub const KEYWORDS: &[Keyword] = &[
    kw("GreaterThanEqual", TokenKind::Operator(Operator::GreaterThanEqual)),
    kw("LessThanEqual", TokenKind::Operator(Operator::LessThanEqual)),
    kw("GreaterThan", TokenKind::Operator(Operator::GreaterThan)),
    kw("IgnoreCase", TokenKind::IgnoreCase),
    kw("StartsWith", TokenKind::Operator(Operator::StartsWith)),
    kw("Contains", TokenKind::Operator(Operator::Contains)),
    kw("Distinct", TokenKind::Distinct),
    kw("EndsWith", TokenKind::Operator(Operator::EndsWith)),
    kw("LessThan", TokenKind::Operator(Operator::LessThan)),
    kw("Between", TokenKind::Operator(Operator::Between)),
    kw("OrderBy", TokenKind::OrderBy),
    kw("Before", TokenKind::Operator(Operator::Before)),
    kw("After", TokenKind::Operator(Operator::After)),
    kw("Equal", TokenKind::Operator(Operator::Equal)),
    kw("Empty", TokenKind::Operator(Operator::Empty)),
    kw("False", TokenKind::Operator(Operator::False)),
    kw("Like", TokenKind::Operator(Operator::Like)),
    kw("Null", TokenKind::Operator(Operator::Null)),
    kw("True", TokenKind::Operator(Operator::True)),
    kw("Desc", TokenKind::Direction(Direction::Desc)),
    kw("All", TokenKind::All),
    kw("Max", TokenKind::Aggregate(ProjectionKind::Max)),
    kw("Min", TokenKind::Aggregate(ProjectionKind::Min)),
    kw("Sum", TokenKind::Aggregate(ProjectionKind::Sum)),
    kw("Avg", TokenKind::Aggregate(ProjectionKind::Avg)),
    kw("Not", TokenKind::Not),
    kw("And", TokenKind::Connective(Connective::And)),
    kw("Asc", TokenKind::Direction(Direction::Asc)),
    kw("By", TokenKind::By),
    kw("In", TokenKind::Operator(Operator::In)),
    kw("Or", TokenKind::Connective(Connective::Or)),
];

/// `First` prefix of the `First<N>` projection.
pub const FIRST: &str = "First";

/// Separator between nested path segments (and between order items).
pub const SEPARATOR: u8 = b'_';

/// A keyword ends on a camel-case word boundary: end of input or anything
/// other than a lowercase letter or digit.
pub fn at_boundary(rest: &str) -> bool {
    match rest.as_bytes().first() {
        None => true,
        Some(c) => !(c.is_ascii_lowercase() || c.is_ascii_digit()),
    }
}

/// Match `keyword` at the start of `input`, requiring a word boundary after it.
/// Returns the remaining input.
pub fn match_keyword<'a>(input: &'a str, keyword: &'static str) -> Option<&'a str> {
    match tag::<_, _, nom::error::Error<&str>>(keyword)(input) {
        Ok((rest, _)) if at_boundary(rest) => Some(rest),
        _ => None,
    }
}

/// Longest keyword from [`KEYWORDS`] accepted by `accepts` at the start of `input`.
pub fn longest_keyword(
    input: &str,
    accepts: impl Fn(TokenCategory) -> bool,
) -> Option<&'static Keyword> {
    KEYWORDS
        .iter()
        .filter(|keyword| accepts(keyword.kind.category()))
        .find(|keyword| match_keyword(input, keyword.text).is_some())
}

/// Action keyword at the start of `input`, lowercase or capitalized form.
pub fn action_keyword(input: &str, capitalized: bool) -> Option<Action> {
    Action::ALL.into_iter().find(|action| {
        let text = if capitalized {
            action.capitalized()
        } else {
            action.keyword()
        };
        match_keyword(input, text).is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_longest_first() {
        for pair in KEYWORDS.windows(2) {
            assert!(
                pair[0].text.len() >= pair[1].text.len(),
                "{} must not precede {}",
                pair[0].text,
                pair[1].text
            );
        }
    }

    #[test]
    fn test_every_operator_has_a_keyword() {
        for operator in Operator::ALL {
            assert!(
                KEYWORDS
                    .iter()
                    .any(|keyword| keyword.kind == TokenKind::Operator(operator)
                        && keyword.text == operator.keyword()),
                "missing keyword for {}",
                operator
            );
        }
    }

    #[test]
    fn test_boundary() {
        assert!(match_keyword("And", "And").is_some());
        assert!(match_keyword("AndAge", "And").is_some());
        assert!(match_keyword("And_x", "And").is_some());
        assert!(match_keyword("Android", "And").is_none());
        assert!(match_keyword("And2", "And").is_none());
    }

    #[test]
    fn test_longest_keyword_prefers_longer_match() {
        let any = |_: TokenCategory| true;
        let keyword = longest_keyword("GreaterThanEqual", any).unwrap();
        assert_eq!(keyword.kind, TokenKind::Operator(Operator::GreaterThanEqual));
        let keyword = longest_keyword("GreaterThanName", any).unwrap();
        assert_eq!(keyword.kind, TokenKind::Operator(Operator::GreaterThan));
        let keyword = longest_keyword("OrderByAge", any).unwrap();
        assert_eq!(keyword.kind, TokenKind::OrderBy);
    }

    #[test]
    fn test_longest_keyword_respects_category_filter() {
        let only_direction = |category: TokenCategory| category == TokenCategory::Direction;
        assert!(longest_keyword("Distinct", only_direction).is_none());
        assert!(longest_keyword("Desc", only_direction).is_some());
    }

    #[test]
    fn test_action_keyword_forms() {
        assert_eq!(action_keyword("findByName", false), Some(Action::Find));
        assert_eq!(action_keyword("FindByName", true), Some(Action::Find));
        assert_eq!(action_keyword("finder", false), None);
        assert_eq!(action_keyword("FindByName", false), None);
    }
}
