//! Exit code constants for the lockwrap CLI.
//!
//! lockwrap propagates the wrapped command's exit status verbatim; the
//! constants here cover the wrapper's own outcomes:
//! - 0: Success (command succeeded, or a prior failure was already reported)
//! - 1: Usage error, lock-open failure, or launch failure

/// Successful execution, including the poisoned short-circuit.
pub const SUCCESS: i32 = 0;

/// Usage error, lock-open failure, or launch failure.
pub const FAILURE: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(SUCCESS, FAILURE);
    }

    #[test]
    fn exit_codes_match_cli_contract() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(FAILURE, 1);
    }
}
