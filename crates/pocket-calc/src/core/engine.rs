//! The calculator input state machine
//!
//! Button presses are applied one at a time to an owned [`CalculatorState`].
//! Operators evaluate left to right as they are pressed; there is no
//! precedence. Division by zero is absorbed into state: the display shows
//! [`ERROR_TOKEN`] until a digit, decimal point, backspace, clear or
//! operator press resets it.

use crate::core::format::{format_number, parse_operand, ERROR_TOKEN};
use crate::core::{CalcError, DisplayFormat, Key, Operator};
use serde::{Deserialize, Serialize};

/// Display text of a freshly cleared calculator
pub const INITIAL_DISPLAY: &str = "0";

/// Everything the calculator remembers between presses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Raw display text: a number being composed, a result, or the error token
    pub display: String,
    /// Left operand of the pending operator
    pub previous_value: Option<f64>,
    /// Operator awaiting its right operand
    pub operator: Option<Operator>,
    /// Next digit or decimal point starts a fresh number
    pub waiting_for_operand: bool,
    /// Set by division by zero
    pub error: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            previous_value: None,
            operator: None,
            waiting_for_operand: false,
            error: false,
        }
    }
}

impl CalculatorState {
    /// The state entered when a computation divides by zero
    fn errored() -> Self {
        Self {
            display: ERROR_TOKEN.to_string(),
            previous_value: None,
            operator: None,
            waiting_for_operand: false,
            error: true,
        }
    }

    /// Returns true if this is the state of a freshly cleared calculator
    #[must_use]
    pub fn is_initial(&self) -> bool {
        *self == Self::default()
    }
}

/// Four-function calculator driven by button presses
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
    format: DisplayFormat,
}

impl Calculator {
    /// Creates a calculator showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with a custom display format
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        Self {
            state: CalculatorState::default(),
            format,
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Owned copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> CalculatorState {
        self.state.clone()
    }

    /// Raw display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Display text after the presentation rule for long values
    #[must_use]
    pub fn formatted_display(&self) -> String {
        self.format.apply(&self.state.display)
    }

    /// True while the display shows the error token
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.state.error
    }

    /// The display format in use
    #[must_use]
    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    /// Applies one key press
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Decimal => self.input_decimal_point(),
            Key::Operator(op) => self.input_operator(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::Percent => self.percentage(),
        }
    }

    /// Applies a sequence of key presses in order
    pub fn press_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
    }

    /// Types a digit. Values above 9 are ignored.
    pub fn input_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            tracing::warn!(digit, "ignoring non-decimal digit");
            return;
        };

        let state = &mut self.state;
        if state.error {
            state.error = false;
            state.waiting_for_operand = false;
            state.display = ch.to_string();
        } else if state.waiting_for_operand {
            state.display = ch.to_string();
            state.waiting_for_operand = false;
        } else if state.display == INITIAL_DISPLAY {
            state.display = ch.to_string();
        } else {
            state.display.push(ch);
        }
        tracing::trace!(display = %state.display, "digit");
    }

    /// Types the decimal point; a second point in the same number is ignored
    pub fn input_decimal_point(&mut self) {
        let state = &mut self.state;
        if state.error {
            state.error = false;
            state.waiting_for_operand = false;
            state.display = "0.".to_string();
        } else if state.waiting_for_operand {
            state.display = "0.".to_string();
            state.waiting_for_operand = false;
        } else if !state.display.contains('.') {
            state.display.push('.');
        }
        tracing::trace!(display = %state.display, "decimal point");
    }

    /// Resets everything (the AC button)
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
        tracing::debug!("cleared");
    }

    /// Drops the last display character, never leaving the display empty.
    /// Clears the calculator when it is in the error state.
    pub fn backspace(&mut self) {
        if self.state.error {
            self.clear();
            return;
        }

        let text = &mut self.state.display;
        if text.chars().count() > 1 {
            text.pop();
        } else {
            *text = INITIAL_DISPLAY.to_string();
        }
        tracing::trace!(display = %self.state.display, "backspace");
    }

    /// Divides the display by 100 in place
    pub fn percentage(&mut self) {
        if self.state.error {
            return;
        }
        let value = parse_operand(&self.state.display);
        self.state.display = format_number(value / 100.0);
        tracing::trace!(display = %self.state.display, "percentage");
    }

    /// Presses an operator button.
    ///
    /// Completes the pending operation first when a new operand has been
    /// typed since the last operator. Pressing operators back to back only
    /// swaps the pending operator; the captured left operand is kept as is.
    pub fn input_operator(&mut self, op: Operator) {
        if self.state.error {
            self.state.error = false;
            self.state.display = INITIAL_DISPLAY.to_string();
        }

        let value = parse_operand(&self.state.display);
        match (self.state.previous_value, self.state.operator) {
            (None, _) => self.state.previous_value = Some(value),
            (Some(previous), Some(pending)) if !self.state.waiting_for_operand => {
                match pending.apply(previous, value) {
                    Ok(result) => self.commit(result),
                    Err(err) => {
                        self.fail(&err);
                        return;
                    }
                }
            }
            _ => {}
        }

        self.state.waiting_for_operand = true;
        self.state.operator = Some(op);
        tracing::debug!(
            operator = %op,
            previous = ?self.state.previous_value,
            "operator pending"
        );
    }

    /// Completes the pending operation, if any
    pub fn equals(&mut self) {
        if self.state.error {
            return;
        }
        let (Some(previous), Some(pending)) = (self.state.previous_value, self.state.operator)
        else {
            return;
        };

        let value = parse_operand(&self.state.display);
        match pending.apply(previous, value) {
            Ok(result) => {
                self.commit(result);
                self.state.operator = None;
                self.state.waiting_for_operand = true;
                tracing::debug!(result, "equals");
            }
            Err(err) => self.fail(&err),
        }
    }

    fn commit(&mut self, result: f64) {
        self.state.display = format_number(result);
        self.state.previous_value = Some(result);
    }

    fn fail(&mut self, err: &CalcError) {
        tracing::warn!(error = %err, "calculation failed");
        self.state = CalculatorState::errored();
    }
}
