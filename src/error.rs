use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compiler::token::Token;

/// Main error type for compilation failures
///
/// Every variant carries the offending token where one exists, so hosts can
/// point at the exact column of the problem. Errors are plain values and
/// serialize cleanly for callers that report them across process boundaries.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompileError {
    #[error("search expression contains no terms")]
    EmptyExpression,

    #[error("missing operand for operator `{}` at column {}", .token.text, .token.position)]
    MissingOperand { token: Token },

    #[error("expected a term, found `{}` at column {}", .token.text, .token.position)]
    UnexpectedTokenType { token: Token },

    #[error("evaluation ended with {count} items on the stack, expected exactly one")]
    StackImbalance { count: usize },

    #[error(
        "proximity operator at column {} only accepts simple or prefix terms, not subexpressions",
        .token.position
    )]
    NearProximityOperandError { token: Token },

    #[error("unmatched double quote")]
    UnmatchedDoubleQuote,

    #[error("term `{}` at column {} contains a misplaced asterisk", .token.text, .token.position)]
    MisplacedAsteriskInTerm { token: Token },

    #[error("unmatched right parenthesis at column {}", .token.position)]
    MissingLeftParenthesis { token: Token },

    #[error("unmatched left parenthesis at column {}", .token.position)]
    UnmatchedLeftParenthesis { token: Token },

    #[error("empty parentheses at column {}", .token.position)]
    EmptyParentheses { token: Token },
}

/// Failure category of a [`CompileError`], without the attached context
///
/// Useful for dispatching on the class of failure when the message and the
/// offending token are not needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    EmptyExpression,
    MissingOperand,
    UnexpectedTokenType,
    StackImbalance,
    NearProximityOperandError,
    UnmatchedDoubleQuote,
    MisplacedAsteriskInTerm,
    MissingLeftParenthesis,
    UnmatchedLeftParenthesis,
    EmptyParentheses,
}

impl CompileError {
    /// Get the failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::EmptyExpression => ErrorKind::EmptyExpression,
            CompileError::MissingOperand { .. } => ErrorKind::MissingOperand,
            CompileError::UnexpectedTokenType { .. } => ErrorKind::UnexpectedTokenType,
            CompileError::StackImbalance { .. } => ErrorKind::StackImbalance,
            CompileError::NearProximityOperandError { .. } => ErrorKind::NearProximityOperandError,
            CompileError::UnmatchedDoubleQuote => ErrorKind::UnmatchedDoubleQuote,
            CompileError::MisplacedAsteriskInTerm { .. } => ErrorKind::MisplacedAsteriskInTerm,
            CompileError::MissingLeftParenthesis { .. } => ErrorKind::MissingLeftParenthesis,
            CompileError::UnmatchedLeftParenthesis { .. } => ErrorKind::UnmatchedLeftParenthesis,
            CompileError::EmptyParentheses { .. } => ErrorKind::EmptyParentheses,
        }
    }

    /// Get the token where the problem was detected, if the error has one
    pub fn token(&self) -> Option<&Token> {
        match self {
            CompileError::MissingOperand { token }
            | CompileError::UnexpectedTokenType { token }
            | CompileError::NearProximityOperandError { token }
            | CompileError::MisplacedAsteriskInTerm { token }
            | CompileError::MissingLeftParenthesis { token }
            | CompileError::UnmatchedLeftParenthesis { token }
            | CompileError::EmptyParentheses { token } => Some(token),
            CompileError::EmptyExpression
            | CompileError::StackImbalance { .. }
            | CompileError::UnmatchedDoubleQuote => None,
        }
    }
}

/// Result type alias for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
