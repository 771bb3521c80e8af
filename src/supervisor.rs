//! Wrapped command execution.
//!
//! Runs the guarded command synchronously and reports its exit status.
//! stdin/stdout/stderr are inherited so the wrapped build's output flows
//! through unchanged; the wrapper never captures or rewrites it.

use crate::error::{LockwrapError, Result};
use crate::exit_codes;
use std::process::{Command, ExitStatus};

/// Outcome of running the wrapped command.
#[derive(Debug, Clone, Copy)]
pub struct CommandStatus {
    /// Exit code of the process (None if it did not exit normally).
    pub exit_code: Option<i32>,

    /// Signal that terminated the process, when known (Unix only).
    pub signal: Option<i32>,
}

impl CommandStatus {
    /// Check if the command execution was successful.
    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit status to propagate as the wrapper's own.
    ///
    /// Signal-terminated children have no exit code; report 128 + signal in
    /// the shell convention where the signal is known, the generic failure
    /// code otherwise.
    pub fn propagated_code(&self) -> i32 {
        match (self.exit_code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => exit_codes::FAILURE,
        }
    }
}

impl From<ExitStatus> for CommandStatus {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self {
            exit_code: status.code(),
            signal,
        }
    }
}

/// Run the wrapped command and wait for it to finish.
///
/// # Arguments
///
/// * `program` - The command to run (resolved through PATH)
/// * `args` - Arguments passed through verbatim
///
/// # Returns
///
/// * `Ok(CommandStatus)` - The command ran to completion (any exit status)
/// * `Err(LockwrapError::Launch)` - The command could not be started
pub fn run_command(program: &str, args: &[String]) -> Result<CommandStatus> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| LockwrapError::Launch(format!("'{}': {}", program, e)))?;

    Ok(CommandStatus::from(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_command_success() {
        #[cfg(windows)]
        let status = run_command("cmd", &["/c".to_string(), "exit 0".to_string()]).unwrap();
        #[cfg(not(windows))]
        let status = run_command("true", &[]).unwrap();

        assert!(status.is_success());
        assert_eq!(status.exit_code, Some(0));
        assert_eq!(status.propagated_code(), 0);
    }

    #[test]
    fn run_command_nonzero_exit() {
        #[cfg(windows)]
        let status = run_command("cmd", &["/c".to_string(), "exit 7".to_string()]).unwrap();
        #[cfg(not(windows))]
        let status = run_command("sh", &["-c".to_string(), "exit 7".to_string()]).unwrap();

        assert!(!status.is_success());
        assert_eq!(status.exit_code, Some(7));
        assert_eq!(status.propagated_code(), 7);
    }

    #[test]
    fn run_command_missing_program_is_launch_error() {
        let result = run_command("nonexistent_command_xyz_123", &[]);

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, LockwrapError::Launch(_)));
        assert!(err.to_string().contains("nonexistent_command_xyz_123"));
    }

    #[cfg(unix)]
    #[test]
    fn run_command_signal_death_propagates_shell_convention() {
        let status = run_command("sh", &["-c".to_string(), "kill -9 $$".to_string()]).unwrap();

        assert!(!status.is_success());
        assert_eq!(status.exit_code, None);
        assert_eq!(status.signal, Some(9));
        assert_eq!(status.propagated_code(), 137);
    }

    #[test]
    fn propagated_code_without_any_status_is_failure() {
        let status = CommandStatus {
            exit_code: None,
            signal: None,
        };
        assert_eq!(status.propagated_code(), exit_codes::FAILURE);
    }
}
