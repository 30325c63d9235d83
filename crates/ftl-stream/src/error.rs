//! Parse error kinds raised while reading FTL source.

use std::fmt;

/// An error that stops parsing of the current entry.
///
/// Each kind maps to a stable code (`E0003`, ...) and a list of positional
/// arguments; the English message is only a rendering of those two.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// Nothing at this position can start an entry.
    ExpectedEntry,
    /// A specific character was required.
    ExpectedToken(char),
    /// A character from a range (e.g. `a-zA-Z`, `0-9`) was required.
    ExpectedCharRange(String),
    /// A message had neither a value nor attributes.
    ExpectedMessageField(String),
    /// A term had no value.
    ExpectedTermField(String),
    /// Function names must be upper-case identifiers.
    ForbiddenCallee,
    /// Named argument names must be plain identifiers.
    ForbiddenKey,
    /// `->` was not followed by any variant.
    MissingVariants,
    /// A value was required (attribute, variant or argument).
    MissingValue,
    /// A variant key was required.
    MissingVariantKey,
    /// An inline expression was required.
    MissingLiteral,
    /// A string literal ran into a line end.
    UnterminatedStringExpression,
    /// A positional call argument followed a named one.
    PositionalArgumentFollowsNamed,
    /// A variant list was used as the value of a select expression variant.
    VariantListInSelectExpression,
    /// `[key]` was used on a message reference.
    ForbiddenVariantAccessor,
    /// `\` followed by an unsupported character.
    UnknownEscapeSequence(char),
    /// A `\u`/`\U` escape without enough hex digits.
    InvalidUnicodeEscapeSequence(String),
}

impl ParseErrorKind {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedEntry => "E0002",
            ParseErrorKind::ExpectedToken(_) => "E0003",
            ParseErrorKind::ExpectedCharRange(_) => "E0004",
            ParseErrorKind::ExpectedMessageField(_) => "E0005",
            ParseErrorKind::ExpectedTermField(_) => "E0006",
            ParseErrorKind::ForbiddenCallee => "E0008",
            ParseErrorKind::ForbiddenKey => "E0009",
            ParseErrorKind::MissingVariants => "E0011",
            ParseErrorKind::MissingValue => "E0012",
            ParseErrorKind::MissingVariantKey => "E0013",
            ParseErrorKind::MissingLiteral => "E0014",
            ParseErrorKind::UnterminatedStringExpression => "E0020",
            ParseErrorKind::PositionalArgumentFollowsNamed => "E0021",
            ParseErrorKind::VariantListInSelectExpression => "E0023",
            ParseErrorKind::ForbiddenVariantAccessor => "E0024",
            ParseErrorKind::UnknownEscapeSequence(_) => "E0025",
            ParseErrorKind::InvalidUnicodeEscapeSequence(_) => "E0026",
        }
    }

    /// Positional arguments used to format the message.
    pub fn args(&self) -> Vec<String> {
        match self {
            ParseErrorKind::ExpectedToken(ch) | ParseErrorKind::UnknownEscapeSequence(ch) => {
                vec![ch.to_string()]
            }
            ParseErrorKind::ExpectedCharRange(arg)
            | ParseErrorKind::ExpectedMessageField(arg)
            | ParseErrorKind::ExpectedTermField(arg)
            | ParseErrorKind::InvalidUnicodeEscapeSequence(arg) => vec![arg.clone()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::ExpectedEntry => write!(f, "Expected an entry start"),
            ParseErrorKind::ExpectedToken(ch) => write!(f, "Expected token: \"{}\"", ch),
            ParseErrorKind::ExpectedCharRange(range) => {
                write!(f, "Expected a character from range: \"{}\"", range)
            }
            ParseErrorKind::ExpectedMessageField(id) => {
                write!(f, "Expected message \"{}\" to have a value or attributes", id)
            }
            ParseErrorKind::ExpectedTermField(id) => {
                write!(f, "Expected term \"{}\" to have a value", id)
            }
            ParseErrorKind::ForbiddenCallee => {
                write!(f, "The callee has to be a simple, upper-case identifier")
            }
            ParseErrorKind::ForbiddenKey => write!(f, "The key has to be a simple identifier"),
            ParseErrorKind::MissingVariants => {
                write!(f, "Expected at least one variant after \"->\"")
            }
            ParseErrorKind::MissingValue => write!(f, "Expected value"),
            ParseErrorKind::MissingVariantKey => write!(f, "Expected variant key"),
            ParseErrorKind::MissingLiteral => write!(f, "Expected literal"),
            ParseErrorKind::UnterminatedStringExpression => {
                write!(f, "Unterminated string expression")
            }
            ParseErrorKind::PositionalArgumentFollowsNamed => {
                write!(f, "Positional arguments must not follow named arguments")
            }
            ParseErrorKind::VariantListInSelectExpression => {
                write!(f, "VariantLists are only allowed inside of other VariantLists.")
            }
            ParseErrorKind::ForbiddenVariantAccessor => {
                write!(f, "Cannot access variants of a message.")
            }
            ParseErrorKind::UnknownEscapeSequence(ch) => {
                write!(f, "Unknown escape sequence: \\{}.", ch)
            }
            ParseErrorKind::InvalidUnicodeEscapeSequence(seq) => {
                write!(f, "Invalid Unicode escape sequence: {}.", seq)
            }
        }
    }
}

impl std::error::Error for ParseErrorKind {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_args() {
        let err = ParseErrorKind::ExpectedToken('=');
        assert_eq!(err.code(), "E0003");
        assert_eq!(err.args(), vec!["=".to_string()]);
        assert_eq!(err.to_string(), "Expected token: \"=\"");

        let err = ParseErrorKind::ExpectedCharRange("a-zA-Z".into());
        assert_eq!(err.code(), "E0004");
        assert_eq!(err.args(), vec!["a-zA-Z".to_string()]);

        assert!(ParseErrorKind::MissingValue.args().is_empty());
    }

    #[test]
    fn test_escape_messages() {
        assert_eq!(
            ParseErrorKind::UnknownEscapeSequence('q').to_string(),
            "Unknown escape sequence: \\q."
        );
        assert_eq!(
            ParseErrorKind::InvalidUnicodeEscapeSequence("\\u00z".into()).to_string(),
            "Invalid Unicode escape sequence: \\u00z."
        );
    }
}
