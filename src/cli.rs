//! CLI argument parsing for lockwrap.
//!
//! Uses clap derive macros for declarative argument definitions. lockwrap
//! deliberately has no subcommands: the whole surface is
//! `lockwrap <directory> <command> [args...]`.

use clap::Parser;
use std::path::PathBuf;

/// Lockwrap: run a command with exclusive access to a directory.
///
/// Serializes independently launched build invocations that write into a
/// common output directory. Once any wrapped command fails, waiting and
/// future invocations for the same directory abort immediately instead of
/// running a doomed build.
#[derive(Parser, Debug)]
#[command(name = "lockwrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory whose access should be serialized.
    pub directory: PathBuf,

    /// Command to run while holding the directory lock.
    pub command: String,

    /// Arguments passed through to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
