//! Error types for the lockwrap CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lockwrap operations.
///
/// Every variant is fatal to the wrapper itself and maps to the generic
/// failure exit code; the wrapped command's own exit status is propagated
/// separately and never travels through this type.
#[derive(Error, Debug)]
pub enum LockwrapError {
    /// The lock file could not be opened or created.
    #[error("could not open lock file: {0}")]
    Open(String),

    /// The lock file could not be locked, read, or updated while held.
    #[error("lock operation failed: {0}")]
    Lock(String),

    /// The wrapped command could not be started.
    #[error("could not launch command: {0}")]
    Launch(String),
}

impl LockwrapError {
    /// Returns the process exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockwrapError::Open(_) => exit_codes::FAILURE,
            LockwrapError::Lock(_) => exit_codes::FAILURE,
            LockwrapError::Launch(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for lockwrap operations.
pub type Result<T> = std::result::Result<T, LockwrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_has_failure_exit_code() {
        let err = LockwrapError::Open("permission denied".to_string());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn lock_error_has_failure_exit_code() {
        let err = LockwrapError::Lock("interrupted".to_string());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn launch_error_has_failure_exit_code() {
        let err = LockwrapError::Launch("'ninja': not found".to_string());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = LockwrapError::Open("'/out/.lockwrap': permission denied".to_string());
        assert_eq!(
            err.to_string(),
            "could not open lock file: '/out/.lockwrap': permission denied"
        );

        let err = LockwrapError::Launch("'ninja': no such file".to_string());
        assert_eq!(err.to_string(), "could not launch command: 'ninja': no such file");
    }
}
