//! Error types for the IRC session library.
//!
//! This module defines error types for line-level failures, message
//! parsing failures, and numeric range violations.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtocolError {
    /// Raw input is empty or longer than the 512 byte line limit.
    #[error("malformed line: {length} bytes (expected 1..=512)")]
    MalformedLine {
        /// Byte length of the rejected line.
        length: usize,
    },

    /// A message type claimed the line but could not populate its fields.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The raw line.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },

    /// A numeric was constructed outside the range its family allows.
    #[error("numeric {code:03} is outside the {expected} range")]
    NumericOutOfRange {
        /// The offending code.
        code: u16,
        /// Human-readable name of the allowed range.
        expected: &'static str,
    },
}

/// Errors encountered when parsing IRC messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Message was empty.
    #[error("empty message")]
    EmptyMessage,

    /// Command was invalid or missing.
    #[error("invalid command")]
    InvalidCommand,

    /// Not enough arguments for command.
    #[error("not enough arguments: expected {expected}, got {got}")]
    NotEnoughArguments {
        /// Expected number of arguments.
        expected: usize,
        /// Actual number of arguments.
        got: usize,
    },

    /// An argument was invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A field that must be numeric held something else.
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Name of the field being converted.
        field: &'static str,
        /// The text that failed to convert.
        value: String,
    },

    /// Tokenizer failure with position information.
    #[error("parsing failed at position {position}: {context}")]
    ParseContext {
        /// Byte position where parsing failed.
        position: usize,
        /// Description of what was being parsed.
        context: String,
    },
}

impl MessageParseError {
    /// Attach the raw line, producing the error surfaced to factory callers.
    pub fn into_protocol(self, raw: &str) -> ProtocolError {
        ProtocolError::InvalidMessage {
            string: raw.to_owned(),
            cause: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::MalformedLine { length: 1024 };
        assert_eq!(
            format!("{}", err),
            "malformed line: 1024 bytes (expected 1..=512)"
        );

        let err = MessageParseError::NotEnoughArguments {
            expected: 2,
            got: 1,
        };
        assert_eq!(
            format!("{}", err),
            "not enough arguments: expected 2, got 1"
        );

        let err = ProtocolError::NumericOutOfRange {
            code: 1,
            expected: "error (400-599)",
        };
        assert_eq!(format!("{}", err), "numeric 001 is outside the error (400-599) range");
    }

    #[test]
    fn test_protocol_error_chaining() {
        let parse_err = MessageParseError::InvalidNumber {
            field: "hopcount",
            value: "x".to_string(),
        };
        let protocol_err = parse_err.clone().into_protocol(":srv 352 me * u h s n H :x real");

        let source = std::error::Error::source(&protocol_err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), parse_err.to_string());

        match protocol_err {
            ProtocolError::InvalidMessage { string, .. } => {
                assert!(string.starts_with(":srv 352"));
            }
            _ => panic!("Expected InvalidMessage variant"),
        }
    }

    #[test]
    fn test_parse_context_error() {
        let context_err = MessageParseError::ParseContext {
            position: 10,
            context: "parsing IRC command".to_string(),
        };

        assert_eq!(
            format!("{}", context_err),
            "parsing failed at position 10: parsing IRC command"
        );
    }
}
