//! Keypad layout model
//!
//! The button grid as data: where each button sits, how it is styled, and
//! which key it sends. Rendering is left to the presentation layer, which
//! looks buttons up here and forwards presses to a [`Calculator`].

use crate::core::{CalcError, CalcResult, Calculator, Key, Operator};
use serde::Serialize;

/// Visual class of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Digits and the decimal point
    Number,
    /// The four arithmetic operators
    Operator,
    /// AC, backspace and percent
    Special,
    /// The equals button
    Equals,
}

impl ButtonVariant {
    /// Returns the variant a key's button is drawn with
    #[must_use]
    pub const fn for_key(key: Key) -> Self {
        match key {
            Key::Digit(_) | Key::Decimal => Self::Number,
            Key::Operator(_) => Self::Operator,
            Key::Clear | Key::Backspace | Key::Percent => Self::Special,
            Key::Equals => Self::Equals,
        }
    }
}

/// A single button on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadButton {
    /// Key sent when pressed
    pub key: Key,
    /// Visual class
    pub variant: ButtonVariant,
    /// Stable element ID, e.g. `btn-7` or `btn-equals`
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Leftmost grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub col_span: usize,
}

impl KeypadButton {
    /// Creates a one-column button
    #[must_use]
    pub fn new(key: Key, row: usize, col: usize) -> Self {
        Self::spanning(key, row, col, 1)
    }

    /// Creates a button covering `col_span` columns
    #[must_use]
    pub fn spanning(key: Key, row: usize, col: usize, col_span: usize) -> Self {
        Self {
            key,
            variant: ButtonVariant::for_key(key),
            id: button_id(key),
            row,
            col,
            col_span,
        }
    }

    /// Text on the button face
    #[must_use]
    pub fn label(&self) -> String {
        self.key.label()
    }

    /// True if the button covers grid cell (`row`, `col`)
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.col_span).contains(&col)
    }
}

/// Element ID for a key's button
fn button_id(key: Key) -> String {
    match key {
        Key::Digit(d) => format!("btn-{d}"),
        Key::Decimal => "btn-decimal".to_string(),
        Key::Operator(op) => format!("btn-{}", op_name(op)),
        Key::Equals => "btn-equals".to_string(),
        Key::Clear => "btn-clear".to_string(),
        Key::Backspace => "btn-backspace".to_string(),
        Key::Percent => "btn-percent".to_string(),
    }
}

const fn op_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
    }
}

/// The calculator's button grid
///
/// ```text
/// [AC] [ ⌫ ] [ % ] [ ÷ ]
/// [ 7] [ 8 ] [ 9 ] [ × ]
/// [ 4] [ 5 ] [ 6 ] [ - ]
/// [ 1] [ 2 ] [ 3 ] [ + ]
/// [    0   ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        let op = Key::Operator;
        let buttons = vec![
            // Row 0: AC ⌫ % ÷
            KeypadButton::new(Key::Clear, 0, 0),
            KeypadButton::new(Key::Backspace, 0, 1),
            KeypadButton::new(Key::Percent, 0, 2),
            KeypadButton::new(op(Operator::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButton::new(Key::Digit(7), 1, 0),
            KeypadButton::new(Key::Digit(8), 1, 1),
            KeypadButton::new(Key::Digit(9), 1, 2),
            KeypadButton::new(op(Operator::Multiply), 1, 3),
            // Row 2: 4 5 6 -
            KeypadButton::new(Key::Digit(4), 2, 0),
            KeypadButton::new(Key::Digit(5), 2, 1),
            KeypadButton::new(Key::Digit(6), 2, 2),
            KeypadButton::new(op(Operator::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButton::new(Key::Digit(1), 3, 0),
            KeypadButton::new(Key::Digit(2), 3, 1),
            KeypadButton::new(Key::Digit(3), 3, 2),
            KeypadButton::new(op(Operator::Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButton::spanning(Key::Digit(0), 4, 0, 2),
            KeypadButton::new(Key::Decimal, 4, 2),
            KeypadButton::new(Key::Equals, 4, 3),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions as (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// All buttons in row-major order
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Button by face label; accepts the same aliases as key parsing
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<&KeypadButton> {
        let key = label.parse().ok()?;
        self.find_button_by_key(key)
    }

    /// Button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Button that sends `key`
    #[must_use]
    pub fn find_button_by_key(&self, key: Key) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.key == key)
    }

    /// Presses the button with element ID `id` on `calculator`
    pub fn press(&self, calculator: &mut Calculator, id: &str) -> CalcResult<Key> {
        let button = self
            .find_button_by_id(id)
            .ok_or_else(|| CalcError::UnknownKey(id.to_string()))?;
        tracing::trace!(id, "button pressed");
        calculator.press(button.key);
        Ok(button.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_new() {
        let keypad = Keypad::new();
        assert_eq!(keypad.button_count(), 19);
        assert_eq!(keypad.dimensions(), (5, 4));
    }

    #[test]
    fn test_keypad_default() {
        assert_eq!(Keypad::default().button_count(), 19);
    }

    #[test]
    fn test_every_key_has_exactly_one_button() {
        let keypad = Keypad::new();
        for key in Key::all() {
            let count = keypad.buttons().filter(|b| b.key == key).count();
            assert_eq!(count, 1, "key {key}");
        }
    }

    #[test]
    fn test_every_cell_is_covered_once() {
        let keypad = Keypad::new();
        let (rows, cols) = keypad.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let count = keypad.buttons().filter(|b| b.covers(row, col)).count();
                assert_eq!(count, 1, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_row_0() {
        let keypad = Keypad::new();
        let labels: Vec<_> = (0..4)
            .map(|c| keypad.get_button_at(0, c).unwrap().label())
            .collect();
        assert_eq!(labels, ["AC", "⌫", "%", "÷"]);
    }

    #[test]
    fn test_operator_column() {
        let keypad = Keypad::new();
        let labels: Vec<_> = (0..5)
            .map(|r| keypad.get_button_at(r, 3).unwrap().label())
            .collect();
        assert_eq!(labels, ["÷", "×", "-", "+", "="]);
    }

    #[test]
    fn test_wide_zero() {
        let keypad = Keypad::new();
        let left = keypad.get_button_at(4, 0).unwrap();
        let right = keypad.get_button_at(4, 1).unwrap();
        assert_eq!(left, right);
        assert_eq!(left.key, Key::Digit(0));
        assert_eq!(left.col_span, 2);
        assert_eq!(keypad.get_button_at(4, 2).unwrap().key, Key::Decimal);
    }

    #[test]
    fn test_out_of_bounds() {
        let keypad = Keypad::new();
        assert!(keypad.get_button_at(5, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_variants() {
        let keypad = Keypad::new();
        let variant = |id: &str| keypad.find_button_by_id(id).unwrap().variant;
        assert_eq!(variant("btn-7"), ButtonVariant::Number);
        assert_eq!(variant("btn-decimal"), ButtonVariant::Number);
        assert_eq!(variant("btn-times"), ButtonVariant::Operator);
        assert_eq!(variant("btn-clear"), ButtonVariant::Special);
        assert_eq!(variant("btn-percent"), ButtonVariant::Special);
        assert_eq!(variant("btn-equals"), ButtonVariant::Equals);
    }

    #[test]
    fn test_unique_ids() {
        let keypad = Keypad::new();
        let ids: std::collections::HashSet<_> = keypad.buttons().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), keypad.button_count());
    }

    #[test]
    fn test_find_by_label() {
        let keypad = Keypad::new();
        assert_eq!(keypad.find_button_by_label("÷").unwrap().id, "btn-divide");
        assert_eq!(keypad.find_button_by_label("/").unwrap().id, "btn-divide");
        assert_eq!(keypad.find_button_by_label("AC").unwrap().id, "btn-clear");
        assert!(keypad.find_button_by_label("(").is_none());
    }

    #[test]
    fn test_press_dispatches_to_calculator() {
        let keypad = Keypad::new();
        let mut calc = Calculator::new();
        for id in ["btn-7", "btn-plus", "btn-3", "btn-equals"] {
            keypad.press(&mut calc, id).unwrap();
        }
        assert_eq!(calc.display(), "10");
    }

    #[test]
    fn test_press_unknown_id() {
        let keypad = Keypad::new();
        let mut calc = Calculator::new();
        let result = keypad.press(&mut calc, "btn-sqrt");
        assert_eq!(result, Err(CalcError::UnknownKey("btn-sqrt".into())));
        assert!(calc.state().is_initial());
    }

    #[test]
    fn test_button_serializes() {
        let keypad = Keypad::new();
        let json = serde_json::to_value(keypad.find_button_by_id("btn-0").unwrap()).unwrap();
        assert_eq!(json["key"], "0");
        assert_eq!(json["variant"], "number");
        assert_eq!(json["col_span"], 2);
    }
}
