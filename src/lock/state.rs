//! Lock state definitions.

use serde::{Deserialize, Serialize};

/// State of a lock file generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    /// No failure recorded; guarded commands may run.
    Clean,
    /// A prior guarded command failed; the cascade must fast-abort.
    Poisoned,
}
