//! Button presses as data

use crate::core::{CalcError, CalcResult, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One press of a calculator button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A digit 0-9
    Digit(u8),
    /// The decimal point
    Decimal,
    /// One of the four operators
    Operator(Operator),
    /// Final computation
    Equals,
    /// Reset everything (AC)
    Clear,
    /// Drop the last typed character
    Backspace,
    /// Divide the display by 100
    Percent,
}

impl Key {
    /// Creates a digit key, rejecting values above 9
    pub fn digit(digit: u8) -> CalcResult<Self> {
        if digit <= 9 {
            Ok(Self::Digit(digit))
        } else {
            Err(CalcError::InvalidDigit(digit))
        }
    }

    /// Returns every distinct key the engine understands
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut keys: Vec<Self> = (0..=9).map(Self::Digit).collect();
        keys.push(Self::Decimal);
        keys.extend(Operator::ALL.into_iter().map(Self::Operator));
        keys.extend([Self::Equals, Self::Clear, Self::Backspace, Self::Percent]);
        keys
    }

    /// Returns the text printed on the button face
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Percent => "%".to_string(),
        }
    }

    /// True for keys that edit the number being typed
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Decimal)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Key {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "." => Ok(Self::Decimal),
            "=" => Ok(Self::Equals),
            "%" => Ok(Self::Percent),
            "AC" | "ac" | "C" | "c" => Ok(Self::Clear),
            "⌫" | "BS" | "bs" | "<" => Ok(Self::Backspace),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Ok(Self::Digit(c as u8 - b'0')),
                    _ => other.parse().map(Self::Operator),
                }
            }
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.label()
    }
}

impl TryFrom<String> for Key {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
