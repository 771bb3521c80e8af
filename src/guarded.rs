//! Guarded execution: the open → acquire → check → run → update → release
//! protocol around a wrapped command.
//!
//! Holders serialize strictly through the exclusive section, so the poison
//! check and the poison write are never observed torn. A waiter queued behind
//! a holder that poisons observes the failure on its own turn and
//! short-circuits without running its command: the fast-abort cascade.

use crate::error::Result;
use crate::exit_codes;
use crate::lock::{DirectoryLock, LockDocument};
use crate::supervisor;
use std::path::Path;

/// Run `command` with exclusive access to `directory`.
///
/// Returns the exit status to propagate as the wrapper's own:
/// 1. opens or creates the lock file inside the directory
/// 2. blocks until the exclusive cross-process lock is granted
/// 3. short-circuits with status 0 if a sibling already recorded a failure
/// 4. otherwise runs the command, poisoning the lock if it fails
///
/// Open and launch failures surface as errors; a command that ran and failed
/// does not (the child already reported its own failure).
pub fn run(directory: &Path, command: &str, args: &[String]) -> Result<i32> {
    let mut lock = DirectoryLock::open_or_create(directory)?;
    lock.acquire()?;

    let doc = lock.read_document()?;
    if doc.is_poisoned() {
        // A sibling already reported this failure; stop the cascade without
        // double-reporting it, and re-request cleanup in case the original
        // holder's unlink failed.
        eprintln!("lockwrap: {}", poisoned_notice(&doc));
        lock.mark_for_deletion();
        return Ok(exit_codes::SUCCESS);
    }

    let status = match supervisor::run_command(command, args) {
        Ok(status) => status,
        Err(err) => {
            // Failing to start the command is a failed guarded execution:
            // siblings waiting on this directory must abort too.
            poison(&mut lock, doc, command, None);
            return Err(err);
        }
    };

    if !status.is_success() {
        poison(&mut lock, doc, command, status.exit_code);
    }

    Ok(status.propagated_code())
}

/// Record the failure in the lock file and request a generation reset.
///
/// Best-effort: a write failure here only costs the fast-abort cascade; the
/// command's own outcome still propagates.
fn poison(lock: &mut DirectoryLock, mut doc: LockDocument, command: &str, exit_code: Option<i32>) {
    doc.poison(command, exit_code);
    if let Err(err) = lock.write_document(&doc) {
        eprintln!("Warning: failed to record failure in lock file: {}", err);
    }
    lock.mark_for_deletion();
}

/// One-line stderr notice for the poisoned short-circuit.
fn poisoned_notice(doc: &LockDocument) -> String {
    match &doc.poison {
        Some(record) => match record.exit_code {
            Some(code) => format!(
                "skipping: '{}' already failed with exit code {} (reported by {})",
                record.command, code, record.poisoned_by
            ),
            None => format!(
                "skipping: '{}' already failed to complete (reported by {})",
                record.command, record.poisoned_by
            ),
        },
        None => "skipping: a sibling invocation already failed".to_string(),
    }
}
