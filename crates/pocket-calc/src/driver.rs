//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against every way of reaching the engine: direct key presses and
//! presses routed through the keypad layout.

use crate::core::{CalcError, CalcResult, Calculator, Key};
use crate::keypad::Keypad;
use std::collections::BTreeSet;

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses a key
    fn press_key(&mut self, key: Key);

    /// Presses the button with the given face label
    fn press_label(&mut self, label: &str) -> CalcResult<()>;

    /// Presses a whitespace-separated list of labels in order
    fn press_sequence(&mut self, labels: &str) -> CalcResult<()> {
        for label in labels.split_whitespace() {
            self.press_label(label)?;
        }
        Ok(())
    }

    /// Raw display text
    fn display(&self) -> String;

    /// Display text after formatting
    fn formatted_display(&self) -> String;

    /// True while in the error state
    fn is_error(&self) -> bool;

    /// Resets the calculator
    fn clear(&mut self);
}

/// Driver that talks to the engine directly
#[derive(Debug, Default)]
pub struct EngineDriver {
    calculator: Calculator,
}

impl EngineDriver {
    /// Creates a driver around a fresh calculator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }
}

impl CalculatorDriver for EngineDriver {
    fn press_key(&mut self, key: Key) {
        self.calculator.press(key);
    }

    fn press_label(&mut self, label: &str) -> CalcResult<()> {
        self.calculator.press(label.parse()?);
        Ok(())
    }

    fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    fn formatted_display(&self) -> String {
        self.calculator.formatted_display()
    }

    fn is_error(&self) -> bool {
        self.calculator.is_error()
    }

    fn clear(&mut self) {
        self.calculator.clear();
    }
}

/// Driver that presses buttons on the keypad layout and records which
/// buttons were exercised
#[derive(Debug, Default)]
pub struct KeypadDriver {
    calculator: Calculator,
    keypad: Keypad,
    pressed: BTreeSet<String>,
}

impl KeypadDriver {
    /// Creates a driver with the standard keypad
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// IDs of buttons pressed so far
    #[must_use]
    pub fn pressed_ids(&self) -> Vec<&str> {
        self.pressed.iter().map(String::as_str).collect()
    }

    /// IDs of buttons never pressed, in layout order
    #[must_use]
    pub fn untouched_ids(&self) -> Vec<&str> {
        self.keypad
            .buttons()
            .filter(|b| !self.pressed.contains(&b.id))
            .map(|b| b.id.as_str())
            .collect()
    }

    /// Share of buttons pressed at least once, in percent
    #[must_use]
    pub fn button_coverage(&self) -> f64 {
        let total = self.keypad.button_count();
        if total == 0 {
            return 100.0;
        }
        self.pressed.len() as f64 * 100.0 / total as f64
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press_key(&mut self, key: Key) {
        if let Some(button) = self.keypad.find_button_by_key(key) {
            self.pressed.insert(button.id.clone());
        }
        self.calculator.press(key);
    }

    fn press_label(&mut self, label: &str) -> CalcResult<()> {
        let id = self
            .keypad
            .find_button_by_label(label)
            .map(|b| b.id.clone())
            .ok_or_else(|| CalcError::UnknownKey(label.to_string()))?;
        self.keypad.press(&mut self.calculator, &id)?;
        self.pressed.insert(id);
        Ok(())
    }

    fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    fn formatted_display(&self) -> String {
        self.calculator.formatted_display()
    }

    fn is_error(&self) -> bool {
        self.calculator.is_error()
    }

    fn clear(&mut self) {
        self.calculator.clear();
    }
}

// ===== Unified scenario checks =====
// These work with ANY CalculatorDriver implementation

fn expect_display<D: CalculatorDriver>(driver: &mut D, labels: &str, expected: &str) {
    driver.clear();
    let pressed = driver.press_sequence(labels);
    assert!(pressed.is_ok(), "sequence {labels:?} rejected: {pressed:?}");
    assert_eq!(driver.display(), expected, "after {labels:?}");
}

/// Verifies the four operators and left-to-right chaining
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    expect_display(driver, "7 + 3 =", "10");
    expect_display(driver, "1 0 - 4 =", "6");
    expect_display(driver, "6 × 7 =", "42");
    expect_display(driver, "2 0 ÷ 4 =", "5");
    expect_display(driver, "2 + 3 × 4 =", "20");
}

/// Verifies composing numbers: leading zero, decimal point, backspace
pub fn verify_number_entry<D: CalculatorDriver>(driver: &mut D) {
    expect_display(driver, "1 . . 5", "1.5");
    expect_display(driver, "0 0 7", "7");
    expect_display(driver, "0 . 0 5", "0.05");
    expect_display(driver, "1 2 3 ⌫", "12");
    expect_display(driver, "5 ⌫", "0");
}

/// Verifies the percent key
pub fn verify_percentage<D: CalculatorDriver>(driver: &mut D) {
    expect_display(driver, "5 0 %", "0.5");
    expect_display(driver, "2 0 0 + 1 0 % =", "200.1");
}

/// Verifies that a repeated operator press only swaps the operator
pub fn verify_operator_replacement<D: CalculatorDriver>(driver: &mut D) {
    expect_display(driver, "9 × ×", "9");
    expect_display(driver, "9 × × 3 =", "27");
    expect_display(driver, "9 + × 3 =", "27");
}

/// Verifies division by zero and recovery from it
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    expect_display(driver, "5 ÷ 0 =", "Error");
    assert!(driver.is_error());
    assert_eq!(driver.formatted_display(), "Error");

    expect_display(driver, "5 ÷ 0 +", "Error");
    assert!(driver.is_error());

    expect_display(driver, "5 ÷ 0 = 4", "4");
    assert!(!driver.is_error());

    expect_display(driver, "5 ÷ 0 = ⌫", "0");
    assert!(!driver.is_error());
}

/// Verifies the presentation rule for long values
pub fn verify_formatting<D: CalculatorDriver>(driver: &mut D) {
    expect_display(driver, "1 ÷ 3 =", "0.3333333333333333");
    assert_eq!(driver.formatted_display(), "0.33333333");

    expect_display(driver, "1 2 3 4 5 6 7 8 9 0 1 2 3", "1234567890123");
    assert_eq!(driver.formatted_display(), "1.23457e+12");
}

/// Runs every scenario check
pub fn verify_all<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_number_entry(driver);
    verify_percentage(driver);
    verify_operator_replacement(driver);
    verify_error_handling(driver);
    verify_formatting(driver);
}
