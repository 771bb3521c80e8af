//! Locking subsystem for lockwrap.
//!
//! One lock file per guarded directory (`<dir>/.lockwrap`), holding two
//! things: the OS advisory lock that serializes guarded executions across
//! processes, and a small JSON state document recording whether a prior
//! execution failed.
//!
//! # Lock File
//!
//! The file is opened with create-if-absent semantics (never truncated on
//! open) so concurrent first-openers all end up on the same inode. Whichever
//! opener observes an empty file writes the clean banner document; that write
//! is not synchronized by the exclusive lock, but any content that does not
//! parse as a poisoned document reads as clean, so the race is harmless.
//!
//! # Generations
//!
//! A generation is the lifespan of one lock file inode. Poisoning happens at
//! most once per generation: the holder whose command failed rewrites the
//! state document in place and unlinks the file. Waiters that opened before
//! the unlink still observe the poisoned state on the old inode and
//! short-circuit; processes that open after the unlink create a fresh clean
//! generation.
//!
//! # Release
//!
//! The lock and the file handle are released when the `DirectoryLock` is
//! dropped. A process killed mid-section relies on OS handle teardown for
//! release; a failure that was never written stays unreported (known gap).

mod document;
mod handle;
mod state;


// Re-export public API
pub use document::{LockDocument, PoisonRecord};
pub use handle::{DirectoryLock, LOCK_FILE_NAME};
pub use state::LockState;
