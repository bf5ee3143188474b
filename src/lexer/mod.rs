//! Mode-driven scanner for method names.
//!
//! One pass over the identifier, no backtracking across modes. Each call to
//! [`Scanner::next_token`] lexes the next run of characters using only the
//! keywords the current [`Mode`] accepts, then moves through the
//! transition table in [`Mode::next`].
//!
//! ```text
//! findFirst3DistinctByLastNameOrderByFirstNameDesc
//! ──┬─ ──┬── ───┬─── ┬ ───┬────  ──┬── ────┬────┬──
//!   │    │      │    │    │        │       │    └── Direction
//!   │    │      │    │    │        │       └── order property
//!   │    │      │    │    │        └── OrderBy
//!   │    │      │    │    └── criteria property
//!   │    │      │    └── By
//!   │    └──────┴── projection
//!   └── action
//! ```

pub mod mode;
pub mod tokens;

use std::collections::VecDeque;

use nom::bytes::complete::tag;
use nom::character::complete::digit1;
use tracing::trace;

use crate::ast::Action;
use crate::config::ParserConfig;
use crate::error::ParseError;

pub use self::mode::Mode;
pub use self::tokens::{Keyword, Token, TokenCategory, TokenKind};

use self::tokens::{FIRST, SEPARATOR};

/// Continuations after a direction keyword when `_` between order items is disabled.
const ORDER_ITEM_END: &[TokenCategory] = &[TokenCategory::Property, TokenCategory::End];

/// Per-invocation scanner state.
///
/// The bulk-mutation sentinel lives here, so independent scans never share it.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
    mode: Mode,
    pending: VecDeque<Token<'a>>,
    bulk_mutation: bool,
    config: ParserConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            position: 0,
            mode: Mode::Initial,
            pending: VecDeque::new(),
            bulk_mutation: false,
            config,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Byte offset of the first character not yet scanned.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether an `update` or `delete` action was recognized.
    pub fn is_bulk_mutation(&self) -> bool {
        self.bulk_mutation
    }

    /// Next token, `Ok(None)` after the `End` token was returned.
    ///
    /// After an error the scanner is finished and yields nothing further.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, ParseError> {
        if self.pending.is_empty() && self.mode != Mode::Done {
            if let Err(err) = self.step() {
                self.pending.clear();
                self.mode = Mode::Done;
                return Err(err);
            }
        }
        Ok(self.pending.pop_front())
    }

    fn step(&mut self) -> Result<(), ParseError> {
        if self.position >= self.input.len() {
            if self.mode.accepts(TokenCategory::End) {
                return self.emit(TokenKind::End, self.position, self.position);
            }
            return Err(ParseError::unterminated(self.position, self.mode.expected()));
        }
        match self.mode {
            Mode::Initial => self.scan_action(),
            Mode::Done => Ok(()),
            mode => self.scan_mode(mode),
        }
    }

    /// Shortest prefix followed by an action keyword: lowercase at position 0,
    /// capitalized anywhere after an ignored prefix.
    fn scan_action(&mut self) -> Result<(), ParseError> {
        let input = self.input;
        if let Some(action) = tokens::action_keyword(input, false) {
            return self.emit_action(action, 0);
        }
        for (i, c) in input.bytes().enumerate() {
            if !(c.is_ascii_alphanumeric() || c == SEPARATOR) {
                return Err(ParseError::malformed(i, Mode::Initial.expected()));
            }
            if c.is_ascii_uppercase() {
                if let Some(action) = tokens::action_keyword(&input[i..], true) {
                    if i > 0 {
                        self.emit(TokenKind::Prefix, 0, i)?;
                    }
                    return self.emit_action(action, i);
                }
            }
        }
        Err(ParseError::unterminated(input.len(), Mode::Initial.expected()))
    }

    fn emit_action(&mut self, action: Action, start: usize) -> Result<(), ParseError> {
        if action.is_bulk_mutation() {
            self.bulk_mutation = true;
        }
        self.emit(
            TokenKind::Action(action),
            start,
            start + action.keyword().len(),
        )
    }

    fn scan_mode(&mut self, mode: Mode) -> Result<(), ParseError> {
        let input = self.input;
        let start = self.position;
        let rest = &input[start..];

        if mode.accepts(TokenCategory::First) && self.scan_first()? {
            return Ok(());
        }

        if let Some(keyword) = tokens::longest_keyword(rest, |category| mode.accepts(category)) {
            if keyword.kind == TokenKind::OrderBy && self.bulk_mutation {
                return Err(ParseError::InvalidOrderingWithBulkOperation { position: start });
            }
            return self.emit(keyword.kind, start, start + keyword.text.len());
        }

        let first = rest.as_bytes()[0];
        if mode.accepts(TokenCategory::Property) && self.starts_segment(first) {
            return self.scan_path(mode);
        }

        if first == SEPARATOR {
            if mode == Mode::AfterDirection {
                return self.scan_order_separator();
            }
            if mode.accepts(TokenCategory::Property) {
                return Err(ParseError::DanglingSeparator { position: start });
            }
        }

        Err(ParseError::malformed(start, mode.expected()))
    }

    /// `First<digits>` projection. Returns `false` when `First` only begins a
    /// property name such as `FirstName`.
    fn scan_first(&mut self) -> Result<bool, ParseError> {
        let input = self.input;
        let start = self.position;
        let rest = &input[start..];
        let Ok((after, _)) = tag::<_, _, nom::error::Error<&str>>(FIRST)(rest) else {
            return Ok(false);
        };
        let count_at = start + FIRST.len();

        if let Ok((_, digits)) = digit1::<_, nom::error::Error<&str>>(after) {
            let count = self.projection_count(digits, count_at)?;
            self.emit(TokenKind::First(count), start, count_at + digits.len())?;
            return Ok(true);
        }
        if after.is_empty() {
            return Err(ParseError::unterminated(count_at, &[TokenCategory::Digits]));
        }
        let ends_projection = |category: TokenCategory| {
            matches!(
                category,
                TokenCategory::By | TokenCategory::OrderBy | TokenCategory::Distinct
            )
        };
        if tokens::longest_keyword(after, ends_projection).is_some() {
            return Err(ParseError::InvalidProjectionCount {
                position: count_at,
                text: String::new(),
            });
        }
        Ok(false)
    }

    fn projection_count(&self, digits: &str, position: usize) -> Result<u32, ParseError> {
        let invalid = || ParseError::InvalidProjectionCount {
            position,
            text: digits.to_string(),
        };
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(invalid());
        }
        let count: u32 = digits.parse().map_err(|_| invalid())?;
        if count == 0 && !self.config.allow_zero_count {
            return Err(invalid());
        }
        Ok(count)
    }

    /// A path starts with an uppercase letter, or any letter right after `_`.
    fn starts_segment(&self, c: u8) -> bool {
        c.is_ascii_uppercase() || (c.is_ascii_alphabetic() && self.follows_separator())
    }

    fn follows_separator(&self) -> bool {
        self.position > 0 && self.input.as_bytes()[self.position - 1] == SEPARATOR
    }

    /// Property-path resolver: segments of letters and digits joined by `_`.
    ///
    /// A segment ends before an uppercase letter that begins a keyword of the
    /// mode the path leads into; its first character is never a keyword.
    fn scan_path(&mut self, from: Mode) -> Result<(), ParseError> {
        let Some(path_mode) = from.path_mode() else {
            return Err(ParseError::malformed(self.position, from.expected()));
        };
        let input = self.input;
        let bytes = input.as_bytes();
        let mut kind = TokenKind::PropertyStart;

        loop {
            let start = self.position;
            let mut end = start + 1;
            while let Some(&c) = bytes.get(end) {
                let continues = c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || (c.is_ascii_uppercase()
                        && tokens::longest_keyword(&input[end..], |category| {
                            path_mode.accepts(category)
                        })
                        .is_none());
                if !continues {
                    break;
                }
                end += 1;
            }
            self.emit(kind, start, end)?;

            if bytes.get(end) != Some(&SEPARATOR) {
                return Ok(());
            }
            match bytes.get(end + 1) {
                Some(c) if c.is_ascii_alphabetic() => {}
                _ => return Err(ParseError::DanglingSeparator { position: end }),
            }
            self.emit(TokenKind::Separator, end, end + 1)?;
            kind = TokenKind::PropertyPart;
        }
    }

    /// `_` between order items, after a direction keyword.
    fn scan_order_separator(&mut self) -> Result<(), ParseError> {
        let start = self.position;
        if !self.config.separated_order_items {
            return Err(ParseError::malformed(start, ORDER_ITEM_END));
        }
        match self.input.as_bytes().get(start + 1) {
            Some(c) if c.is_ascii_alphabetic() => self.emit(TokenKind::Separator, start, start + 1),
            _ => Err(ParseError::DanglingSeparator { position: start }),
        }
    }

    /// Queue a token and follow the transition table.
    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) -> Result<(), ParseError> {
        let Some(next) = self.mode.next(&kind) else {
            return Err(ParseError::malformed(start, self.mode.expected()));
        };
        let input = self.input;
        let token = Token::new(kind, &input[start..end], start);
        trace!(
            kind = ?token.kind,
            text = token.text,
            position = start,
            from = ?self.mode,
            to = ?next,
            "token"
        );
        self.pending.push_back(token);
        self.mode = next;
        self.position = end;
        Ok(())
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Scan `input` to completion.
pub fn tokenize(input: &str, config: ParserConfig) -> Result<Vec<Token<'_>>, ParseError> {
    Scanner::with_config(input, config).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Connective, Direction, Operator};
    use crate::error::ErrorKind;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input, ParserConfig::default())
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input, ParserConfig::default())
            .unwrap()
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    fn error(input: &str) -> ParseError {
        tokenize(input, ParserConfig::default()).unwrap_err()
    }

    #[test]
    fn test_tokens_of_simple_criteria() {
        assert_eq!(
            kinds("findByNameAndAgeGreaterThan"),
            vec![
                TokenKind::Action(Action::Find),
                TokenKind::By,
                TokenKind::PropertyStart,
                TokenKind::Connective(Connective::And),
                TokenKind::PropertyStart,
                TokenKind::Operator(Operator::GreaterThan),
                TokenKind::End,
            ]
        );
        assert_eq!(
            texts("findByNameAndAgeGreaterThan"),
            vec!["find", "By", "Name", "And", "Age", "GreaterThan", ""]
        );
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let tokens = tokenize("countByStatus", ParserConfig::default()).unwrap();
        let positions: Vec<usize> = tokens.iter().map(|token| token.position).collect();
        assert_eq!(positions, vec![0, 5, 7, 13]);
    }

    #[test]
    fn test_prefix_before_capitalized_action() {
        assert_eq!(
            texts("activeUsersFindByStatus"),
            vec!["activeUsers", "Find", "By", "Status", ""]
        );
        assert_eq!(kinds("activeUsersFindByStatus")[0], TokenKind::Prefix);
    }

    #[test]
    fn test_lowercase_action_only_at_start() {
        let err = error("myfindByName");
        assert_eq!(err.kind(), ErrorKind::UnterminatedExpression);
        assert_eq!(err.position(), 12);
    }

    #[test]
    fn test_action_requires_word_boundary() {
        assert_eq!(
            texts("getterFindById"),
            vec!["getter", "Find", "By", "Id", ""]
        );
    }

    #[test]
    fn test_non_identifier_character_in_prefix() {
        let err = error("my-findByName");
        assert_eq!(err.kind(), ErrorKind::MalformedIdentifier);
        assert_eq!(err.position(), 2);
        assert_eq!(err.expected(), &[TokenCategory::Action]);
    }

    #[test]
    fn test_keywords_need_camel_case_boundary() {
        assert_eq!(
            texts("findByNotesAndInactiveOrAndroid"),
            vec!["find", "By", "Notes", "And", "Inactive", "Or", "Android", ""]
        );
    }

    #[test]
    fn test_greater_than_equal_is_maximal_munch() {
        assert_eq!(
            kinds("findByAgeGreaterThanEqual")[3],
            TokenKind::Operator(Operator::GreaterThanEqual)
        );
        assert_eq!(
            kinds("findByAgeLessThanEqual")[3],
            TokenKind::Operator(Operator::LessThanEqual)
        );
    }

    #[test]
    fn test_nested_path_tokens() {
        assert_eq!(
            kinds("findByAddress_City"),
            vec![
                TokenKind::Action(Action::Find),
                TokenKind::By,
                TokenKind::PropertyStart,
                TokenKind::Separator,
                TokenKind::PropertyPart,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_separator_between_order_items() {
        assert_eq!(
            kinds("findAllOrderByNameDesc_Age"),
            vec![
                TokenKind::Action(Action::Find),
                TokenKind::All,
                TokenKind::OrderBy,
                TokenKind::PropertyStart,
                TokenKind::Direction(Direction::Desc),
                TokenKind::Separator,
                TokenKind::PropertyStart,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_separator_between_order_items_disabled() {
        let config = ParserConfig {
            separated_order_items: false,
            ..ParserConfig::default()
        };
        let err = tokenize("findAllOrderByNameDesc_Age", config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedIdentifier);
        assert_eq!(err.position(), 22);
    }

    #[test]
    fn test_dangling_separators() {
        for (input, position) in [
            ("findByAddress_", 13),
            ("findByAddress__City", 13),
            ("findByAddress_1", 13),
            ("findBy_Address", 6),
            ("findAllOrderByNameAsc_", 21),
        ] {
            assert_eq!(
                error(input),
                ParseError::DanglingSeparator { position },
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_first_count() {
        assert_eq!(kinds("findFirst10")[1], TokenKind::First(10));
        assert_eq!(texts("findFirst10"), vec!["find", "First10", ""]);
    }

    #[test]
    fn test_first_without_digits() {
        assert_eq!(error("findFirst").kind(), ErrorKind::UnterminatedExpression);
        assert_eq!(error("findFirst").expected(), &[TokenCategory::Digits]);
        assert_eq!(
            error("findFirstByName").kind(),
            ErrorKind::InvalidProjectionCount
        );
        assert_eq!(kinds("findFirstName")[1], TokenKind::PropertyStart);
    }

    #[test]
    fn test_invalid_counts() {
        for input in ["findFirst0", "findFirst007", "findFirst99999999999"] {
            assert_eq!(error(input).kind(), ErrorKind::InvalidProjectionCount, "{}", input);
        }
        let config = ParserConfig {
            allow_zero_count: true,
            ..ParserConfig::default()
        };
        let tokens = tokenize("findFirst0ByName", config).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::First(0));
    }

    #[test]
    fn test_bulk_mutation_sentinel() {
        let mut scanner = Scanner::new("deleteById");
        assert!(!scanner.is_bulk_mutation());
        scanner.next_token().unwrap();
        assert!(scanner.is_bulk_mutation());

        let err = error("deleteByIdOrderByName");
        assert_eq!(
            err,
            ParseError::InvalidOrderingWithBulkOperation { position: 10 }
        );
        assert_eq!(
            error("updateAllOrderByName").kind(),
            ErrorKind::InvalidOrderingWithBulkOperation
        );
    }

    #[test]
    fn test_unterminated_after_keywords() {
        for (input, expected) in [
            ("", &[TokenCategory::Action][..]),
            ("findBy", &[TokenCategory::Property][..]),
            (
                "findByNameNot",
                &[
                    TokenCategory::IgnoreCase,
                    TokenCategory::Operator,
                    TokenCategory::Connective,
                    TokenCategory::OrderBy,
                ][..],
            ),
            (
                "findByNameIgnoreCaseNot",
                &[
                    TokenCategory::Operator,
                    TokenCategory::Connective,
                    TokenCategory::OrderBy,
                ][..],
            ),
            ("findByNameAnd", &[TokenCategory::Property][..]),
            ("findByNameOrderBy", &[TokenCategory::Property][..]),
            ("getMax", &[TokenCategory::Property][..]),
            ("delete", &[TokenCategory::All, TokenCategory::By][..]),
        ] {
            let err = error(input);
            assert_eq!(err.kind(), ErrorKind::UnterminatedExpression, "{}", input);
            assert_eq!(err.position(), input.len(), "{}", input);
            assert_eq!(err.expected(), expected, "{}", input);
        }
    }

    #[test]
    fn test_malformed_after_operator() {
        let err = error("findByAgeGreaterThanX");
        assert_eq!(err.kind(), ErrorKind::MalformedIdentifier);
        assert_eq!(err.position(), 20);
        assert_eq!(
            err.expected(),
            &[
                TokenCategory::Connective,
                TokenCategory::OrderBy,
                TokenCategory::End
            ]
        );
    }

    #[test]
    fn test_scanner_is_fused_after_error() {
        let mut scanner = Scanner::new("findBy");
        assert!(scanner.next_token().unwrap().is_some());
        assert!(scanner.next_token().unwrap().is_some());
        assert!(scanner.next_token().is_err());
        assert!(scanner.next_token().unwrap().is_none());
        assert_eq!(scanner.mode(), Mode::Done);
    }
}
