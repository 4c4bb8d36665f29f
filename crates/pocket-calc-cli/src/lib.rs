//! pocket-calc CLI library
//!
//! Command-line front end for the `pocket-calc` engine: press keys, replay
//! recorded tapes and print the keypad.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use commands::{Cli, Commands, PressArgs, ReplayArgs};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_keypad, render_report, render_report_text, OutputFormat};
pub use runner::{load_tape, run_tape, tape_from_args, Report};

use tracing_subscriber::EnvFilter;

/// Installs the stderr `tracing` subscriber. `RUST_LOG` wins over the
/// verbosity flags when set.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
