//! Binary operators and their pure arithmetic

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four operator buttons of the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (-)
    #[serde(rename = "-")]
    Subtract,
    /// Multiplication (×)
    #[serde(rename = "×")]
    Multiply,
    /// Division (÷)
    #[serde(rename = "÷")]
    Divide,
}

impl Operator {
    /// All operators in keypad order, top to bottom
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the symbol printed on the button
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Maps a symbol to an operator, accepting ASCII stand-ins for × and ÷
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '×' | '*' | 'x' | 'X' => Some(Self::Multiply),
            '÷' | '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to `a` and `b`.
    ///
    /// Division by an exact zero is the only failure. Overflow to infinity
    /// and NaN propagate as ordinary values.
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(a / b)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_symbol(c).ok_or_else(|| CalcError::UnknownKey(s.to_string()))
            }
            _ => Err(CalcError::UnknownKey(s.to_string())),
        }
    }
}
