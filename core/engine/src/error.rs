//! FILENAME: core/engine/src/error.rs
//! PURPOSE: Error taxonomy for the calculator engine.
//! CONTEXT: Every fallible operation in the engine returns one of these
//! variants. Shells recover all of them at the input loop; none is fatal.

use thiserror::Error;

/// Calculator errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// An operation's precondition was violated (negative square root,
    /// divide by zero, out-of-range factorial, ...).
    #[error("Domain error: {0}")]
    Domain(String),

    /// The operation, category, conversion, or constant name is not registered.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The expression evaluator hit a syntax or runtime fault.
    #[error("Invalid expression: {0}")]
    Expression(String),

    /// A variable lookup missed.
    #[error("Variable not found: {0}")]
    NotFound(String),
}

impl CalcError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn unknown_operation(msg: impl Into<String>) -> Self {
        Self::UnknownOperation(msg.into())
    }

    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}

impl From<parser::ParseError> for CalcError {
    fn from(err: parser::ParseError) -> Self {
        CalcError::Expression(err.message)
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
