//! Pocket Calculator - button-driven four-function calculator engine
//!
//! The engine interprets button presses (digits, decimal point, operators,
//! equals, clear, backspace, percent) into a running result, evaluating
//! strictly left to right as operators are pressed. A presentation layer
//! only has to forward presses and redraw [`Calculator::formatted_display`].
//!
//! # Modules
//!
//! - [`core`]: the engine, operators, keys and display text
//! - [`keypad`]: the button grid as data
//! - [`driver`]: one scenario suite for every way of driving the engine
//! - [`tape`]: recorded key sequences and frame-by-frame replay
//!
//! # Example
//!
//! ```rust
//! use pocket_calc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! calc.input_digit(7);
//! calc.input_operator(Operator::Add);
//! calc.input_digit(3);
//! calc.equals();
//! assert_eq!(calc.display(), "10");
//!
//! // Division by zero is absorbed into state
//! calc.input_operator(Operator::Divide);
//! calc.input_digit(0);
//! calc.equals();
//! assert!(calc.is_error());
//! assert_eq!(calc.display(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod keypad;
pub mod tape;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::engine::INITIAL_DISPLAY;
    pub use crate::core::format::{format_number, parse_operand, ERROR_TOKEN};
    pub use crate::core::{
        CalcError, CalcResult, Calculator, CalculatorState, DisplayFormat, Key, Operator,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver, KeypadDriver};
    pub use crate::keypad::{ButtonVariant, Keypad, KeypadButton};
    pub use crate::tape::{Frame, Tape};
}
