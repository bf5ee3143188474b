//! Scan modes and the transition table between them.
//!
//! A mode represents the grammatical category expected next. The scanner
//! only lexes tokens whose category the current mode accepts, and
//! [`Mode::next`] is the single place where transitions are declared.

use crate::ast::Action;
use crate::lexer::tokens::{TokenCategory, TokenKind};

use TokenCategory as C;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Looking for the action keyword, possibly after an ignored prefix.
    Initial,
    /// After `exists`, `count` or `get`.
    Projection,
    /// After `find`, `list` or `stream`: projection plus the bare `All`.
    AllProjection,
    /// After `update` or `delete`: only `By` or `All`.
    ModeBy,
    /// After `First<N>`.
    FirstCount,
    /// After `Distinct`.
    Distinct,
    /// After `Max`, `Min`, `Sum` or `Avg`: a target property is required.
    AggregateTarget,
    /// Inside the projected property path.
    ProjectionProperty,
    /// After `All`.
    AfterAll,
    /// After `By`, `And` or `Or`: a property is required.
    CriteriaStart,
    /// Inside a criteria property path.
    CriteriaProperty,
    /// After `Not`.
    Not,
    /// After `IgnoreCase`.
    IgnoreCase,
    /// After `Not` then `IgnoreCase`.
    NotIgnoreCase,
    /// After `IgnoreCase` then `Not`.
    IgnoreCaseNot,
    /// After an operator keyword.
    AfterOperator,
    /// After `OrderBy`: a property is required.
    OrderStart,
    /// Inside an order property path.
    OrderProperty,
    /// After `Asc` or `Desc`.
    AfterDirection,
    /// End of input was emitted.
    Done,
}

const ACTION: &[TokenCategory] = &[C::Action];
const PROJECTION: &[TokenCategory] = &[
    C::First,
    C::Distinct,
    C::Aggregate,
    C::Property,
    C::By,
    C::OrderBy,
    C::End,
];
const ALL_PROJECTION: &[TokenCategory] = &[
    C::First,
    C::Distinct,
    C::Aggregate,
    C::All,
    C::Property,
    C::By,
    C::OrderBy,
    C::End,
];
const MODE_BY: &[TokenCategory] = &[C::All, C::By];
const FIRST_COUNT: &[TokenCategory] = &[C::Distinct, C::Property, C::By, C::OrderBy, C::End];
const DISTINCT: &[TokenCategory] = &[C::Property, C::By, C::OrderBy, C::End];
const PROPERTY: &[TokenCategory] = &[C::Property];
const PROJECTION_PROPERTY: &[TokenCategory] = &[C::Separator, C::By, C::OrderBy, C::End];
const AFTER_ALL: &[TokenCategory] = &[C::OrderBy, C::End];
const CRITERIA_PROPERTY: &[TokenCategory] = &[
    C::Separator,
    C::Not,
    C::IgnoreCase,
    C::Operator,
    C::Connective,
    C::OrderBy,
    C::End,
];
const NOT: &[TokenCategory] = &[C::IgnoreCase, C::Operator, C::Connective, C::OrderBy];
const IGNORE_CASE: &[TokenCategory] = &[C::Not, C::Operator, C::Connective, C::OrderBy, C::End];
const NOT_IGNORE_CASE: &[TokenCategory] = &[C::Operator, C::Connective, C::OrderBy, C::End];
const IGNORE_CASE_NOT: &[TokenCategory] = &[C::Operator, C::Connective, C::OrderBy];
const AFTER_OPERATOR: &[TokenCategory] = &[C::Connective, C::OrderBy, C::End];
const ORDER_PROPERTY: &[TokenCategory] = &[C::Separator, C::Direction, C::End];
const AFTER_DIRECTION: &[TokenCategory] = &[C::Property, C::Separator, C::End];
const DONE: &[TokenCategory] = &[];

impl Mode {
    /// Categories the mode can continue with.
    pub fn expected(self) -> &'static [TokenCategory] {
        match self {
            Mode::Initial => ACTION,
            Mode::Projection => PROJECTION,
            Mode::AllProjection => ALL_PROJECTION,
            Mode::ModeBy => MODE_BY,
            Mode::FirstCount => FIRST_COUNT,
            Mode::Distinct => DISTINCT,
            Mode::AggregateTarget => PROPERTY,
            Mode::ProjectionProperty => PROJECTION_PROPERTY,
            Mode::AfterAll => AFTER_ALL,
            Mode::CriteriaStart => PROPERTY,
            Mode::CriteriaProperty => CRITERIA_PROPERTY,
            Mode::Not => NOT,
            Mode::IgnoreCase => IGNORE_CASE,
            Mode::NotIgnoreCase => NOT_IGNORE_CASE,
            Mode::IgnoreCaseNot => IGNORE_CASE_NOT,
            Mode::AfterOperator => AFTER_OPERATOR,
            Mode::OrderStart => PROPERTY,
            Mode::OrderProperty => ORDER_PROPERTY,
            Mode::AfterDirection => AFTER_DIRECTION,
            Mode::Done => DONE,
        }
    }

    pub fn accepts(self, category: TokenCategory) -> bool {
        self.expected().contains(&category)
    }

    /// Mode entered after the action keyword.
    pub fn after_action(action: Action) -> Mode {
        match action {
            Action::Exists | Action::Count | Action::Get => Mode::Projection,
            Action::Find | Action::List | Action::Stream => Mode::AllProjection,
            Action::Update | Action::Delete => Mode::ModeBy,
        }
    }

    /// Transition table: the mode following `kind`, or `None` when the mode
    /// does not accept it.
    pub fn next(self, kind: &TokenKind) -> Option<Mode> {
        use Mode::*;

        let next = match (self, kind) {
            (Initial, TokenKind::Prefix) => Initial,
            (Initial, TokenKind::Action(action)) => Mode::after_action(*action),

            (Projection | AllProjection, TokenKind::First(_)) => FirstCount,
            (Projection | AllProjection | FirstCount, TokenKind::Distinct) => Distinct,
            (Projection | AllProjection, TokenKind::Aggregate(_)) => AggregateTarget,
            (AllProjection | ModeBy, TokenKind::All) => AfterAll,
            (
                Projection | AllProjection | FirstCount | Distinct | AggregateTarget,
                TokenKind::PropertyStart,
            ) => ProjectionProperty,
            (ProjectionProperty, TokenKind::Separator | TokenKind::PropertyPart) => {
                ProjectionProperty
            }
            (
                Projection | AllProjection | ModeBy | FirstCount | Distinct | ProjectionProperty,
                TokenKind::By,
            ) => CriteriaStart,

            (CriteriaStart, TokenKind::PropertyStart) => CriteriaProperty,
            (CriteriaProperty, TokenKind::Separator | TokenKind::PropertyPart) => {
                CriteriaProperty
            }
            (CriteriaProperty, TokenKind::Not) => Not,
            (CriteriaProperty, TokenKind::IgnoreCase) => IgnoreCase,
            (Not, TokenKind::IgnoreCase) => NotIgnoreCase,
            (IgnoreCase, TokenKind::Not) => IgnoreCaseNot,
            (
                CriteriaProperty | Not | IgnoreCase | NotIgnoreCase | IgnoreCaseNot,
                TokenKind::Operator(_),
            ) => AfterOperator,
            (
                CriteriaProperty | Not | IgnoreCase | NotIgnoreCase | IgnoreCaseNot | AfterOperator,
                TokenKind::Connective(_),
            ) => CriteriaStart,

            (
                Projection
                | AllProjection
                | FirstCount
                | Distinct
                | ProjectionProperty
                | AfterAll
                | CriteriaProperty
                | Not
                | IgnoreCase
                | NotIgnoreCase
                | IgnoreCaseNot
                | AfterOperator,
                TokenKind::OrderBy,
            ) => OrderStart,

            (OrderStart | AfterDirection, TokenKind::PropertyStart) => OrderProperty,
            (OrderProperty, TokenKind::Separator | TokenKind::PropertyPart) => OrderProperty,
            (OrderProperty, TokenKind::Direction(_)) => AfterDirection,
            (AfterDirection, TokenKind::Separator) => OrderStart,

            (mode, TokenKind::End) if mode.accepts(TokenCategory::End) => Done,
            _ => return None,
        };
        Some(next)
    }

    /// Mode a property path scanned from this mode ends up in; its keywords
    /// terminate the path's segments.
    pub fn path_mode(self) -> Option<Mode> {
        match self {
            Mode::Projection
            | Mode::AllProjection
            | Mode::FirstCount
            | Mode::Distinct
            | Mode::AggregateTarget => Some(Mode::ProjectionProperty),
            Mode::CriteriaStart => Some(Mode::CriteriaProperty),
            Mode::OrderStart | Mode::AfterDirection => Some(Mode::OrderProperty),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Connective, Direction, Operator, ProjectionKind};

    const ALL_MODES: [Mode; 20] = [
        Mode::Initial,
        Mode::Projection,
        Mode::AllProjection,
        Mode::ModeBy,
        Mode::FirstCount,
        Mode::Distinct,
        Mode::AggregateTarget,
        Mode::ProjectionProperty,
        Mode::AfterAll,
        Mode::CriteriaStart,
        Mode::CriteriaProperty,
        Mode::Not,
        Mode::IgnoreCase,
        Mode::NotIgnoreCase,
        Mode::IgnoreCaseNot,
        Mode::AfterOperator,
        Mode::OrderStart,
        Mode::OrderProperty,
        Mode::AfterDirection,
        Mode::Done,
    ];

    fn sample(category: TokenCategory) -> TokenKind {
        match category {
            C::Action => TokenKind::Action(Action::Find),
            C::All => TokenKind::All,
            C::First | C::Digits => TokenKind::First(1),
            C::Distinct => TokenKind::Distinct,
            C::Aggregate => TokenKind::Aggregate(ProjectionKind::Max),
            C::Property => TokenKind::PropertyStart,
            C::Separator => TokenKind::Separator,
            C::By => TokenKind::By,
            C::OrderBy => TokenKind::OrderBy,
            C::Not => TokenKind::Not,
            C::IgnoreCase => TokenKind::IgnoreCase,
            C::Operator => TokenKind::Operator(Operator::Like),
            C::Connective => TokenKind::Connective(Connective::Or),
            C::Direction => TokenKind::Direction(Direction::Desc),
            C::End => TokenKind::End,
        }
    }

    #[test]
    fn test_expected_categories_have_transitions() {
        for mode in ALL_MODES {
            for category in mode.expected() {
                assert!(
                    mode.next(&sample(*category)).is_some(),
                    "{:?} advertises {:?} without a transition",
                    mode,
                    category
                );
            }
        }
    }

    #[test]
    fn test_action_modes() {
        assert_eq!(Mode::after_action(Action::Count), Mode::Projection);
        assert_eq!(Mode::after_action(Action::Stream), Mode::AllProjection);
        assert_eq!(Mode::after_action(Action::Delete), Mode::ModeBy);
    }

    #[test]
    fn test_operator_entry_states_agree() {
        let operator = TokenKind::Operator(Operator::GreaterThan);
        for mode in [
            Mode::CriteriaProperty,
            Mode::Not,
            Mode::IgnoreCase,
            Mode::NotIgnoreCase,
            Mode::IgnoreCaseNot,
        ] {
            assert_eq!(mode.next(&operator), Some(Mode::AfterOperator));
        }
    }

    #[test]
    fn test_trailing_not_is_unterminated() {
        assert!(!Mode::Not.accepts(TokenCategory::End));
        assert!(!Mode::IgnoreCaseNot.accepts(TokenCategory::End));
        assert_eq!(Mode::Not.next(&TokenKind::Not), None);
        assert_eq!(Mode::NotIgnoreCase.next(&TokenKind::IgnoreCase), None);
        assert_eq!(Mode::IgnoreCaseNot.next(&TokenKind::IgnoreCase), None);
    }

    #[test]
    fn test_modifier_states_continue_alike() {
        let connective = TokenKind::Connective(Connective::And);
        for mode in [
            Mode::Not,
            Mode::IgnoreCase,
            Mode::NotIgnoreCase,
            Mode::IgnoreCaseNot,
        ] {
            assert_eq!(mode.next(&connective), Some(Mode::CriteriaStart), "{:?}", mode);
            assert_eq!(mode.next(&TokenKind::OrderBy), Some(Mode::OrderStart), "{:?}", mode);
        }
    }

    #[test]
    fn test_mode_by_only_accepts_by_or_all() {
        assert_eq!(Mode::ModeBy.next(&TokenKind::By), Some(Mode::CriteriaStart));
        assert_eq!(Mode::ModeBy.next(&TokenKind::All), Some(Mode::AfterAll));
        assert_eq!(Mode::ModeBy.next(&TokenKind::OrderBy), None);
        assert_eq!(Mode::ModeBy.next(&TokenKind::End), None);
    }
}
