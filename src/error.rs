//! Error types for tree access, serialization, and parsing.
use crate::value::Kind;
use thiserror::Error;

/// The primary error type for all tree and serializer operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A typed accessor was used against a value of a different kind.
    #[error("expected {expected} value, found {found}")]
    TypeMismatch {
        /// The kind the accessor requires.
        expected: Kind,
        /// The kind actually stored.
        found: Kind,
    },
    /// An indexing operation was used on an incompatible kind
    /// (a key on a non-object, or a position on a non-array).
    #[error("cannot index a {found} value as {wanted}")]
    WrongKind {
        /// The kind actually stored.
        found: Kind,
        /// The kind the indexing operation requires.
        wanted: Kind,
    },
    /// Ordinal access past the end of an object.
    #[error("ordinal {index} out of range for object of length {len}")]
    OutOfRange { index: usize, len: usize },
    /// A custom-tagged value reached the serializer with no renderer
    /// registered for its tag.
    #[error("cannot serialize custom value with unregistered tag {tag:#x}")]
    UnsupportedKind { tag: u32 },
    /// The parser rejected the input.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A parse failure, carrying the byte offset where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Byte offset into the input where the error was detected.
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: usize) -> Self {
        ParseError { kind, offset }
    }
}

/// The individual parse failure modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A string ran to the end of the input without a closing quote.
    #[error("unterminated string")]
    UnterminatedString,
    /// An array or object ran to the end of the input without its
    /// closing bracket.
    #[error("unterminated container")]
    UnterminatedContainer,
    /// Non-filler content followed the root value.
    #[error("trailing data after root value")]
    TrailingData,
    /// Nesting exceeded the configured depth ceiling.
    #[error("maximum nesting depth exceeded")]
    DepthExceeded,
    /// A lowercase run that is not `null`, `false`, or `true`.
    #[error("invalid literal")]
    InvalidLiteral,
    /// An object member did not start with a string key.
    #[error("expected string key")]
    ExpectedKey,
    /// A byte that cannot start any value.
    #[error("unexpected character")]
    UnexpectedCharacter,
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;

    #[test]
    fn test_display_formats() {
        let err = Error::TypeMismatch {
            expected: Kind::Integer,
            found: Kind::String,
        };
        assert_eq!(err.to_string(), "expected integer value, found string");

        let err = Error::OutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "ordinal 7 out of range for object of length 3"
        );

        let err = Error::from(ParseError::new(ParseErrorKind::UnterminatedString, 5));
        assert_eq!(err.to_string(), "unterminated string at byte 5");
    }
}
