//! Recorded button sequences and their replay
//!
//! A tape is a list of keys, stored as button labels in YAML or JSON:
//!
//! ```yaml
//! name: add
//! keys: ["7", "+", "3", "="]
//! ```
//!
//! Replaying a tape produces one [`Frame`] per key so that a presentation
//! layer (or a test) can check what the display showed after every press.

use crate::core::{CalcResult, Calculator, Key};
use serde::{Deserialize, Serialize};

/// A named sequence of key presses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape {
    /// Optional name for reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Keys in press order
    pub keys: Vec<Key>,
}

/// What the calculator showed after one key press
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Key that was pressed
    pub key: Key,
    /// Raw display text
    pub display: String,
    /// Display text after formatting
    pub formatted: String,
    /// Whether the calculator was in the error state
    pub error: bool,
}

impl Tape {
    /// Creates an empty tape
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tape from keys
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            name: None,
            keys: keys.into_iter().collect(),
        }
    }

    /// Sets the tape name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parses whitespace-separated button labels, e.g. `"7 + 3 ="`
    pub fn parse(labels: &str) -> CalcResult<Self> {
        let keys = labels
            .split_whitespace()
            .map(str::parse)
            .collect::<CalcResult<Vec<Key>>>()?;
        Ok(Self::from_keys(keys))
    }

    /// Appends a key
    pub fn push(&mut self, key: Key) {
        self.keys.push(key);
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the tape has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Presses every key on `calculator`, capturing a frame after each
    pub fn replay(&self, calculator: &mut Calculator) -> Vec<Frame> {
        tracing::debug!(name = ?self.name, keys = self.keys.len(), "replaying tape");
        self.keys
            .iter()
            .map(|&key| {
                calculator.press(key);
                Frame {
                    key,
                    display: calculator.display().to_string(),
                    formatted: calculator.formatted_display(),
                    error: calculator.is_error(),
                }
            })
            .collect()
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }

    /// Deserializes from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Serializes to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for Tape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self.keys.iter().map(Key::label).collect();
        f.write_str(&labels.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, Operator};

    #[test]
    fn test_parse_labels() {
        let tape = Tape::parse("7 + 3 =").unwrap();
        assert_eq!(
            tape.keys,
            vec![
                Key::Digit(7),
                Key::Operator(Operator::Add),
                Key::Digit(3),
                Key::Equals
            ]
        );
        assert_eq!(tape.name, None);
    }

    #[test]
    fn test_parse_empty() {
        let tape = Tape::parse("   ").unwrap();
        assert!(tape.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            Tape::parse("7 + sqrt"),
            Err(CalcError::UnknownKey("sqrt".into()))
        );
    }

    #[test]
    fn test_push_and_len() {
        let mut tape = Tape::new();
        tape.push(Key::Digit(1));
        tape.push(Key::Percent);
        assert_eq!(tape.len(), 2);
        assert_eq!(tape.to_string(), "1 %");
    }

    #[test]
    fn test_replay_frames() {
        let tape = Tape::parse("5 ÷ 0 = 4").unwrap();
        let mut calc = Calculator::new();
        let frames = tape.replay(&mut calc);

        let displays: Vec<_> = frames.iter().map(|f| f.display.as_str()).collect();
        assert_eq!(displays, ["5", "5", "0", "Error", "4"]);
        let errors: Vec<_> = frames.iter().map(|f| f.error).collect();
        assert_eq!(errors, [false, false, false, true, false]);
        assert_eq!(frames[1].key, Key::Operator(Operator::Divide));
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn test_replay_formatted() {
        let tape = Tape::parse("2 ÷ 3 =").unwrap();
        let frames = tape.replay(&mut Calculator::new());
        let last = frames.last().unwrap();
        assert_eq!(last.display, "0.6666666666666666");
        assert_eq!(last.formatted, "0.66666667");
    }

    #[test]
    fn test_yaml_round_trip() {
        let tape = Tape::parse("9 × × 3 =").unwrap().with_name("double operator");
        let yaml = tape.to_yaml().unwrap();
        assert!(yaml.contains("double operator"));
        assert_eq!(Tape::from_yaml(&yaml).unwrap(), tape);
    }

    #[test]
    fn test_from_yaml_with_aliases() {
        let tape = Tape::from_yaml("keys: ['6', '*', '7', '=']\n").unwrap();
        let frames = tape.replay(&mut Calculator::new());
        assert_eq!(frames.last().unwrap().display, "42");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_key() {
        assert!(Tape::from_yaml("keys: ['6', 'sqrt']\n").is_err());
    }

    #[test]
    fn test_json_without_name() {
        let tape = Tape::parse("1 . 5").unwrap();
        let json = tape.to_json().unwrap();
        assert_eq!(json, r#"{"keys":["1",".","5"]}"#);
        assert_eq!(Tape::from_json(&json).unwrap(), tape);
    }
}
