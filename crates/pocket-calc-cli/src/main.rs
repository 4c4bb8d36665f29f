//! pocket-calc: command-line pocket calculator
//!
//! ## Usage
//!
//! ```bash
//! pocket-calc press 7 + 3 =           # prints 10
//! pocket-calc --trace press 5 ÷ 0 =   # one line per key, ends in Error
//! pocket-calc -o json replay tape.yaml
//! pocket-calc keypad
//! ```

use clap::Parser;
use pocket_calc::keypad::Keypad;
use pocket_calc_cli::{
    init_tracing, load_tape, render_keypad, render_report, run_tape, tape_from_args, Cli,
    CliConfig, CliResult, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(Verbosity::from_flags(cli.quiet, cli.verbose));
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Press(args) => {
            let tape = tape_from_args(&args.keys)?;
            print_report(&config, &tape)
        }
        Commands::Replay(args) => {
            let tape = load_tape(&args.file)?;
            print_report(&config, &tape)
        }
        Commands::Keypad => {
            print!("{}", render_keypad(&Keypad::new()));
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_output(cli.output)
        .with_trace(cli.trace);
    match &cli.config {
        Some(path) => config.with_display_file(path),
        None => Ok(config),
    }
}

fn print_report(config: &CliConfig, tape: &pocket_calc::tape::Tape) -> CliResult<()> {
    let report = run_tape(config, tape);
    let rendered = render_report(&report, config.output, config.trace)?;
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}
