//! Core calculator module: operators, keys, display text and the engine
//!
//! Everything here is synchronous and allocation-light. The engine never
//! returns an error to its caller; `CalcError` is used by the pure pieces
//! (`Operator::apply`, key parsing) and absorbed into state by the engine.

pub mod engine;
pub mod format;
pub mod key;
mod operations;

pub use engine::{Calculator, CalculatorState};
pub use format::DisplayFormat;
pub use key::Key;
pub use operations::Operator;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a zero divisor
    #[error("Division by zero")]
    DivisionByZero,

    /// A label that names no calculator key
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    /// A digit outside 0-9
    #[error("Invalid digit: {0}")]
    InvalidDigit(u8),
}
