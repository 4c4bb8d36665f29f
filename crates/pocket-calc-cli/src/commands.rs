//! CLI command definitions using clap

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pocket-calc: drive a four-function pocket calculator from the command line
#[derive(Parser, Debug)]
#[command(name = "pocket-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Print the display after every key, not just the final one
    #[arg(long, global = true)]
    pub trace: bool,

    /// YAML file overriding the display format
    #[arg(long, value_name = "FILE", global = true, env = "POCKET_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys on a fresh calculator
    Press(PressArgs),

    /// Replay a recorded key tape (YAML, or JSON with a .json extension)
    Replay(ReplayArgs),

    /// Show the keypad layout
    Keypad,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Key labels, e.g. `7 + 3 =`; quoted arguments may hold several labels
    #[arg(required = true, allow_hyphen_values = true, value_name = "KEY")]
    pub keys: Vec<String>,
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Tape file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
