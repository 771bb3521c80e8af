//! Lockwrap: directory lock wrapper for parallel build invocations.
//!
//! This is the main entry point for the `lockwrap` CLI. It parses arguments,
//! runs the guarded execution protocol, and maps outcomes to exit codes: the
//! wrapped command's status is propagated verbatim, wrapper failures exit 1.

mod cli;
pub mod error;
pub mod exit_codes;
pub mod guarded;
pub mod lock;
pub mod supervisor;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders help/version on stdout (exit 0) and usage errors
            // on stderr; usage errors exit 1 per the CLI contract, not clap's
            // default 2.
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            return if is_usage_error {
                ExitCode::from(status_byte(exit_codes::FAILURE))
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match guarded::run(&cli.directory, &cli.command, &cli.args) {
        Ok(status) => ExitCode::from(status_byte(status)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(status_byte(err.exit_code()))
        }
    }
}

/// Convert a propagated exit status to a process exit byte, collapsing
/// anything that does not fit to the generic failure code.
fn status_byte(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(exit_codes::FAILURE as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_byte_passes_small_codes_through() {
        assert_eq!(status_byte(0), 0);
        assert_eq!(status_byte(7), 7);
        assert_eq!(status_byte(137), 137);
    }

    #[test]
    fn status_byte_collapses_out_of_range_codes() {
        assert_eq!(status_byte(-1), 1);
        assert_eq!(status_byte(512), 1);
    }
}
