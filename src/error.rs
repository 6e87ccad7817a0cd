//! Error types for the minilisp front end

use crate::lexer::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures that are not caused by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternalErrorKind {
    /// An allocation could not be satisfied
    OutOfMemory,
    /// A buffer, length or reference did not satisfy its invariant
    NullReference,
}

impl std::fmt::Display for InternalErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalErrorKind::OutOfMemory => write!(f, "out of memory"),
            InternalErrorKind::NullReference => write!(f, "null reference"),
        }
    }
}

/// minilisp front end errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LispError {
    /// Error raised while scanning source text
    ///
    /// **Triggered by:** an unrecognized character or an unterminated string
    /// **Example:** `(+ 1 #)`, `"abc`
    #[error("{position}: {message}")]
    Lexer {
        /// Where scanning failed
        position: Position,
        /// Error description
        message: String,
    },

    /// Error raised while building the AST
    ///
    /// **Triggered by:** a token of the wrong kind at some grammar point
    /// **Example:** `(define f (x)` (missing closing parenthesis)
    #[error("{position}: {message}")]
    Parser {
        /// Position of the offending token
        position: Position,
        /// Error description
        message: String,
    },

    /// Allocation or invariant failure unrelated to user input
    #[error("internal error ({kind}): {message}")]
    Internal {
        /// Failure class
        kind: InternalErrorKind,
        /// Error description
        message: String,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The front end itself is in a bad state
    Fatal,
    /// The input was bad; further input may still be processed
    Recoverable,
}

impl LispError {
    /// Create a lexer error at `position`
    pub fn lexer(position: Position, message: impl Into<String>) -> Self {
        LispError::Lexer {
            position,
            message: message.into(),
        }
    }

    /// Create a parser error at `position`
    pub fn parser(position: Position, message: impl Into<String>) -> Self {
        LispError::Parser {
            position,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(kind: InternalErrorKind, message: impl Into<String>) -> Self {
        LispError::Internal {
            kind,
            message: message.into(),
        }
    }

    /// Source position the error points at, if it has one
    pub fn position(&self) -> Option<&Position> {
        match self {
            LispError::Lexer { position, .. } | LispError::Parser { position, .. } => {
                Some(position)
            }
            LispError::Internal { .. } => None,
        }
    }

    /// The bare message, without any positional prefix
    pub fn message(&self) -> &str {
        match self {
            LispError::Lexer { message, .. }
            | LispError::Parser { message, .. }
            | LispError::Internal { message, .. } => message,
        }
    }

    /// Classify error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LispError::Lexer { .. } | LispError::Parser { .. } => ErrorSeverity::Recoverable,
            LispError::Internal { .. } => ErrorSeverity::Fatal,
        }
    }
}

/// Result type for minilisp operations
pub type Result<T> = std::result::Result<T, LispError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn pos(line: usize, column: usize) -> Position {
        Position::new(line, column, Arc::from("stdin"))
    }

    #[test]
    fn test_positional_layout() {
        let err = LispError::lexer(pos(2, 7), "unrecognized token");
        assert_eq!(err.to_string(), "stdin:2:7: unrecognized token");

        let err = LispError::parser(pos(0, 0), "expected `(`, found end of file");
        assert_eq!(err.to_string(), "stdin:0:0: expected `(`, found end of file");
    }

    #[test]
    fn test_internal_layout() {
        let err = LispError::internal(InternalErrorKind::OutOfMemory, "token buffer");
        assert_eq!(err.to_string(), "internal error (out of memory): token buffer");
        assert!(err.position().is_none());
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn test_accessors() {
        let err = LispError::parser(pos(1, 4), "boom");
        assert_eq!(err.position(), Some(&pos(1, 4)));
        assert_eq!(err.message(), "boom");
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    }
}
