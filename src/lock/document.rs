//! Lock state document stored in lock files.

use super::state::LockState;
use crate::error::{LockwrapError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State document stored in the lock file.
///
/// Only `state` is load-bearing; the remaining fields identify who created or
/// poisoned the lock, for diagnostics. Content that does not parse as a
/// document reads as a clean banner, so a banner write racing with concurrent
/// first-openers can never be mistaken for a recorded failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockDocument {
    /// Current state of this lock generation.
    pub state: LockState,

    /// Owner that created the lock file (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the creator (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Timestamp when this generation was created (RFC3339).
    pub created_at: DateTime<Utc>,

    /// Failure record, present once a guarded command has failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poison: Option<PoisonRecord>,
}

/// Details of the failure that poisoned a lock generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoisonRecord {
    /// Owner whose guarded command failed (e.g., `user@HOST`).
    pub poisoned_by: String,

    /// The command that failed.
    pub command: String,

    /// Exit status of the failed command, if it produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Timestamp when the failure was recorded (RFC3339).
    pub poisoned_at: DateTime<Utc>,
}

impl LockDocument {
    /// Create a clean document with the current owner and timestamp.
    pub fn clean() -> Self {
        Self {
            state: LockState::Clean,
            owner: get_owner_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
            poison: None,
        }
    }

    /// Record a failed guarded command, transitioning the document to poisoned.
    ///
    /// `exit_code` is `None` when the command never produced an exit status
    /// (launch failure or signal death).
    pub fn poison(&mut self, command: &str, exit_code: Option<i32>) {
        self.state = LockState::Poisoned;
        self.poison = Some(PoisonRecord {
            poisoned_by: get_owner_string(),
            command: command.to_string(),
            exit_code,
            poisoned_at: Utc::now(),
        });
    }

    /// Parse a document from raw lock file content.
    ///
    /// Empty or unparsable content reads as a fresh clean banner: the banner
    /// write at creation is not synchronized by the exclusive lock, and that
    /// race must never surface as a recorded failure.
    pub fn from_content(content: &[u8]) -> Self {
        serde_json::from_slice(content).unwrap_or_else(|_| Self::clean())
    }

    /// Serialize the document to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LockwrapError::Lock(format!("failed to serialize lock state: {}", e)))
    }

    /// Whether a prior guarded execution failed in this generation.
    pub fn is_poisoned(&self) -> bool {
        self.state == LockState::Poisoned
    }
}

/// Get the owner string for lock documents.
pub(crate) fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}
