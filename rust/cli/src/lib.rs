//! # handscope CLI Library
//!
//! Command-line front end over `handscope-engine`.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["handscope", "load", "--dir", "/home/me/winamax/accounts/me"];
//! let code = handscope_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `load`: Load a history directory concurrently and print a summary
//! - `parse`: Parse a single history file
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod ui;

use cli::{COMMANDS, Commands, HandscopeCli};
use commands::{handle_cfg_command, handle_load_command, handle_parse_command};
use config::CliOverrides;

pub use error::CliError;

/// Parses `args` and runs the selected command.
///
/// Returns the process exit code: `0` on success, `2` on any error.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandscopeCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Load {
            dir,
            site,
            workers,
            json,
        } => handle_load_command(
            CliOverrides {
                site,
                history_dir: dir,
                workers,
                json,
            },
            out,
            err,
        ),
        Commands::Parse { file, site, json } => handle_parse_command(
            &file,
            CliOverrides {
                site,
                json,
                ..CliOverrides::default()
            },
            out,
        ),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout with a zero exit code.
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Usage: handscope <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            let _ = writeln!(err, "\nFor full help, run: handscope --help");
            exit_code::ERROR
        }
    }
}
