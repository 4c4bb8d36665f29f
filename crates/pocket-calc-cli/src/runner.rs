//! Tape loading and replay

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use pocket_calc::core::{Calculator, CalculatorState};
use pocket_calc::tape::{Frame, Tape};
use serde::Serialize;
use std::path::Path;

/// Outcome of replaying one tape on a fresh calculator
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Tape name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// One frame per key press
    pub frames: Vec<Frame>,
    /// Final raw display
    pub display: String,
    /// Final formatted display
    pub formatted: String,
    /// Whether the calculator ended in the error state
    pub error: bool,
    /// Final engine state
    pub state: CalculatorState,
}

/// Replays `tape` on a fresh calculator using the configured display format
#[must_use]
pub fn run_tape(config: &CliConfig, tape: &Tape) -> Report {
    let mut calculator = Calculator::with_format(config.display.clone());
    let frames = tape.replay(&mut calculator);
    tracing::info!(
        keys = tape.len(),
        display = calculator.display(),
        error = calculator.is_error(),
        "replay finished"
    );
    Report {
        name: tape.name.clone(),
        frames,
        display: calculator.display().to_string(),
        formatted: calculator.formatted_display(),
        error: calculator.is_error(),
        state: calculator.snapshot(),
    }
}

/// Builds a tape from command-line labels. Each argument may itself hold
/// several whitespace-separated labels.
pub fn tape_from_args(labels: &[String]) -> CliResult<Tape> {
    if labels.is_empty() {
        return Err(CliError::invalid_argument("no keys given"));
    }
    Ok(Tape::parse(&labels.join(" "))?)
}

/// Loads a tape file; `.json` files are read as JSON, anything else as YAML
pub fn load_tape(path: &Path) -> CliResult<Tape> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let tape = if is_json {
        Tape::from_json(&text)?
    } else {
        Tape::from_yaml(&text)?
    };
    tracing::debug!(path = %path.display(), keys = tape.len(), "loaded tape");
    Ok(tape)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pocket_calc::core::{DisplayFormat, Key};
    use std::io::Write;

    #[test]
    fn test_run_tape() {
        let report = run_tape(&CliConfig::new(), &Tape::parse("7 + 3 =").unwrap());
        assert_eq!(report.display, "10");
        assert_eq!(report.formatted, "10");
        assert!(!report.error);
        assert_eq!(report.frames.len(), 4);
        assert_eq!(report.state.previous_value, Some(10.0));
    }

    #[test]
    fn test_run_tape_uses_display_format() {
        let config = CliConfig::new().with_display(DisplayFormat {
            max_plain_len: 2,
            fixed_digits: 1,
            ..DisplayFormat::default()
        });
        let report = run_tape(&config, &Tape::parse("1 . 2 6").unwrap());
        assert_eq!(report.display, "1.26");
        assert_eq!(report.formatted, "1.3");
    }

    #[test]
    fn test_run_tape_error() {
        let report = run_tape(&CliConfig::new(), &Tape::parse("5 ÷ 0 =").unwrap());
        assert!(report.error);
        assert_eq!(report.formatted, "Error");
    }

    #[test]
    fn test_tape_from_args_splits() {
        let args = vec!["7".to_string(), "+ 3".to_string(), "=".to_string()];
        let tape = tape_from_args(&args).unwrap();
        assert_eq!(tape.len(), 4);
        assert_eq!(tape.keys[3], Key::Equals);
    }

    #[test]
    fn test_tape_from_args_empty() {
        assert!(matches!(
            tape_from_args(&[]),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_tape_from_args_unknown() {
        let args = vec!["sqrt".to_string()];
        assert!(matches!(tape_from_args(&args), Err(CliError::Calc(_))));
    }

    #[test]
    fn test_load_yaml_tape() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "name: times\nkeys: ['6', '×', '7', '=']").unwrap();
        let tape = load_tape(file.path()).unwrap();
        assert_eq!(tape.name.as_deref(), Some("times"));
        assert_eq!(run_tape(&CliConfig::new(), &tape).display, "42");
    }

    #[test]
    fn test_load_json_tape() {
        let mut file = tempfile::Builder::new().suffix(".JSON").tempfile().unwrap();
        write!(file, r#"{{"keys": ["5", "0", "%"]}}"#).unwrap();
        let tape = load_tape(file.path()).unwrap();
        assert_eq!(run_tape(&CliConfig::new(), &tape).display, "0.5");
    }

    #[test]
    fn test_load_missing_tape() {
        assert!(matches!(
            load_tape(Path::new("/nonexistent/tape.yaml")),
            Err(CliError::Io(_))
        ));
    }

    #[test]
    fn test_load_bad_json_tape() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(load_tape(file.path()), Err(CliError::Json(_))));
    }
}
