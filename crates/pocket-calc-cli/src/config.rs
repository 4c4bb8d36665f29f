//! CLI configuration

use crate::error::CliResult;
use crate::output::OutputFormat;
use pocket_calc::core::DisplayFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - engine transitions
    Verbose,
    /// Debug - every keystroke
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Output format
    pub output: OutputFormat,
    /// Print every frame, not just the final display
    pub trace: bool,
    /// Presentation rule for long displays
    pub display: DisplayFormat,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set output format
    #[must_use]
    pub const fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set frame tracing
    #[must_use]
    pub const fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Set the display format
    #[must_use]
    pub fn with_display(mut self, display: DisplayFormat) -> Self {
        self.display = display;
        self
    }

    /// Loads the display format from a YAML file
    pub fn with_display_file(self, path: &Path) -> CliResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let format = DisplayFormat::from_yaml(&yaml)?;
        tracing::debug!(path = %path.display(), display = ?format, "loaded display format");
        Ok(self.with_display(format))
    }
}
