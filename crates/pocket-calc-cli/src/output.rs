//! Output formatting

use crate::error::CliResult;
use crate::runner::Report;
use pocket_calc::keypad::Keypad;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Output format for results
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Renders a replay report
pub fn render_report(report: &Report, format: OutputFormat, trace: bool) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_report_text(report, trace)),
        OutputFormat::Json => {
            if trace {
                Ok(serde_json::to_string_pretty(report)?)
            } else {
                Ok(serde_json::to_string_pretty(&report.state)?)
            }
        }
    }
}

/// Renders a replay report as text: the final display, optionally preceded
/// by one line per key press
#[must_use]
pub fn render_report_text(report: &Report, trace: bool) -> String {
    let mut out = String::new();
    if trace {
        if let Some(name) = &report.name {
            let _ = writeln!(out, "# {name}");
        }
        let width = report
            .frames
            .iter()
            .map(|f| f.key.label().chars().count())
            .max()
            .unwrap_or(1);
        for frame in &report.frames {
            let label = frame.key.label();
            let pad = width.saturating_sub(label.chars().count());
            let marker = if frame.error { "  !" } else { "" };
            let _ = writeln!(
                out,
                "{label}{}  -> {}{marker}",
                " ".repeat(pad),
                frame.formatted
            );
        }
    }
    let _ = writeln!(out, "{}", report.formatted);
    out
}

/// Renders the keypad grid, honouring wide buttons
#[must_use]
pub fn render_keypad(keypad: &Keypad) -> String {
    const CELL: usize = 5;
    let (rows, cols) = keypad.dimensions();
    let mut out = String::new();
    for row in 0..rows {
        let mut col = 0;
        while col < cols {
            let Some(button) = keypad.get_button_at(row, col) else {
                out.push_str(&" ".repeat(CELL));
                col += 1;
                continue;
            };
            let width = CELL * button.col_span;
            let label = button.label();
            let inner = width - 2;
            let len = label.chars().count();
            let left = inner.saturating_sub(len) / 2;
            let right = inner.saturating_sub(len + left);
            let _ = write!(out, "[{}{label}{}]", " ".repeat(left), " ".repeat(right));
            col += button.col_span;
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::runner::run_tape;
    use crate::CliConfig;
    use pocket_calc::tape::Tape;

    fn report(labels: &str) -> Report {
        run_tape(&CliConfig::new(), &Tape::parse(labels).unwrap())
    }

    #[test]
    fn test_text_final_only() {
        assert_eq!(render_report_text(&report("7 + 3 ="), false), "10\n");
    }

    #[test]
    fn test_text_trace() {
        let text = render_report_text(&report("5 ÷ 0 ="), true);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, ["5  -> 5", "÷  -> 5", "0  -> 0", "=  -> Error  !", "Error"]);
    }

    #[test]
    fn test_text_trace_pads_wide_labels() {
        let text = render_report_text(&report("1 AC"), true);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "1   -> 1");
        assert_eq!(lines[1], "AC  -> 0");
    }

    #[test]
    fn test_text_trace_shows_name() {
        let tape = Tape::parse("4").unwrap().with_name("four");
        let text = render_report_text(&run_tape(&CliConfig::new(), &tape), true);
        assert!(text.starts_with("# four\n"));
    }

    #[test]
    fn test_json_state() {
        let json = render_report(&report("8 ×"), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["display"], "8");
        assert_eq!(value["operator"], "×");
    }

    #[test]
    fn test_json_trace_has_frames() {
        let json = render_report(&report("1 . 5"), OutputFormat::Json, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["frames"].as_array().unwrap().len(), 3);
        assert_eq!(value["formatted"], "1.5");
    }

    #[test]
    fn test_render_keypad() {
        let grid = render_keypad(&Keypad::new());
        let lines: Vec<_> = grid.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "[AC ][ ⌫ ][ % ][ ÷ ]");
        assert_eq!(lines[4], "[   0    ][ . ][ = ]");
    }
}
