// ABOUTME: Error types for compile-time and evaluation-time failures

use thiserror::Error;

/// A single error type carrying a human-readable message and an optional
/// source byte offset, covering both compile-time and evaluation-time
/// failures (spec §7).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("expression too long: {len} bytes exceeds maxExpressionLength of {max}")]
    ExpressionTooLong { len: usize, max: usize },

    #[error("unexpected character {ch:?} at position {pos}")]
    LexUnexpectedChar { ch: char, pos: usize },

    #[error("invalid escape sequence at position {pos}")]
    LexInvalidEscape { pos: usize },

    #[error("unterminated string literal starting at position {pos}")]
    LexUnterminatedString { pos: usize },

    #[error("invalid number literal at position {pos}")]
    LexInvalidNumber { pos: usize },

    #[error("expected {expected}, got {actual} at position {pos}")]
    ParseUnexpectedToken {
        expected: String,
        actual: String,
        pos: usize,
    },

    #[error("expected ':' to complete ternary at position {pos}")]
    ParseMissingColon { pos: usize },

    #[error("expression is too complex: {count} AST nodes exceeds maxAstNodes of {max}")]
    TooComplex { count: usize, max: usize },

    #[error("max call depth exceeded: {depth} exceeds maxCallDepth of {max}")]
    MaxCallDepthExceeded { depth: usize, max: usize },

    #[error("Function not allowed: {0}")]
    FunctionNotAllowed(String),

    #[error("invalid function call target at position {pos}")]
    InvalidCallTarget { pos: usize },

    #[error("regex compilation failed for pattern {pattern:?}: {message}")]
    RegexCompile { pattern: String, message: String },

    #[error("unknown binary operator {0:?}")]
    UnknownBinaryOperator(String),
}

impl Error {
    /// Human-readable message, independent of the byte offset.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Source byte offset this error pertains to, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::LexUnexpectedChar { pos, .. }
            | Error::LexInvalidEscape { pos }
            | Error::LexUnterminatedString { pos }
            | Error::LexInvalidNumber { pos }
            | Error::ParseUnexpectedToken { pos, .. }
            | Error::ParseMissingColon { pos }
            | Error::InvalidCallTarget { pos } => Some(*pos),
            Error::ExpressionTooLong { .. }
            | Error::TooComplex { .. }
            | Error::MaxCallDepthExceeded { .. }
            | Error::FunctionNotAllowed(_)
            | Error::RegexCompile { .. }
            | Error::UnknownBinaryOperator(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
