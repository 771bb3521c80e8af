//! Lock file lifecycle: open/create, blocking acquisition, state access,
//! and deletion marking.

use super::document::LockDocument;
use crate::error::{LockwrapError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Name of the lock file inside the guarded directory.
pub const LOCK_FILE_NAME: &str = ".lockwrap";

/// Handle to the per-directory lock file.
///
/// Holding a `DirectoryLock` keeps the file open; the exclusive OS lock (once
/// acquired) and the handle are released when the value is dropped, including
/// on abnormal process teardown.
#[derive(Debug)]
pub struct DirectoryLock {
    /// Open handle; also the anchor for the advisory lock.
    file: File,

    /// Path of the lock file, for deletion and error messages.
    path: PathBuf,
}

impl DirectoryLock {
    /// Open the lock file for the given directory, creating it if absent.
    ///
    /// Concurrent first-openers race safely: `create(true)` without truncation
    /// means the first process to create wins and every other process opens
    /// the same inode. Whichever opener observes an empty file writes the
    /// clean banner document. That write is not synchronized by the exclusive
    /// lock; interleaved banner writes can at worst leave unparsable content,
    /// which reads as clean.
    ///
    /// Fails when the path cannot be opened for read/write (permissions,
    /// missing directory). The guarded directory is never created here.
    pub fn open_or_create(directory: &Path) -> Result<Self> {
        let path = directory.join(LOCK_FILE_NAME);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockwrapError::Open(format!("'{}': {}", path.display(), e)))?;

        let mut lock = Self { file, path };

        // Zero length stands in for "this call created the file".
        if lock.content_len()? == 0 {
            let banner = LockDocument::clean();
            lock.write_document(&banner)?;
        }

        Ok(lock)
    }

    /// Block until the exclusive cross-process lock is granted.
    ///
    /// No timeout and no cancellation: waiters park in the OS until the
    /// current holder releases or dies. Fairness among waiters is whatever
    /// the OS primitive provides.
    pub fn acquire(&self) -> Result<()> {
        self.file
            .lock_exclusive()
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))
    }

    /// Read and parse the state document.
    pub fn read_document(&mut self) -> Result<LockDocument> {
        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;

        let mut content = Vec::new();
        self.file
            .read_to_end(&mut content)
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;

        Ok(LockDocument::from_content(&content))
    }

    /// Rewrite the state document in place through the held handle.
    ///
    /// The write must go through this handle rather than a rename-replace:
    /// swapping the file out would change the inode the advisory lock is
    /// anchored to while other processes are still waiting on it.
    pub fn write_document(&mut self, doc: &LockDocument) -> Result<()> {
        let json = doc.to_json()?;

        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;
        self.file
            .set_len(0)
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;
        self.file
            .write_all(json.as_bytes())
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;
        self.file
            .sync_all()
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;

        Ok(())
    }

    /// Request removal of the lock file, starting a fresh generation for the
    /// next opener.
    ///
    /// Unlinks only while the directory entry still refers to the inode this
    /// handle holds: a holder of an already-replaced generation must not
    /// delete its successor. Safe to call redundantly. Failures are reported
    /// as a warning, never as an error; a leftover lock file only delays the
    /// generation reset until the next failed invocation.
    pub fn mark_for_deletion(&self) {
        if !self.names_same_inode() {
            return;
        }

        if let Err(e) = fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            eprintln!(
                "Warning: failed to remove lock file '{}': {}",
                self.path.display(),
                e
            );
        }
    }

    /// Current length of the lock file content.
    fn content_len(&self) -> Result<u64> {
        let metadata = self
            .file
            .metadata()
            .map_err(|e| LockwrapError::Lock(format!("'{}': {}", self.path.display(), e)))?;
        Ok(metadata.len())
    }

    /// Whether the directory entry at `path` still refers to the inode this
    /// handle holds. A missing or replaced entry means another process
    /// already reset the generation.
    #[cfg(unix)]
    fn names_same_inode(&self) -> bool {
        use std::os::unix::fs::MetadataExt;

        let held = match self.file.metadata() {
            Ok(m) => m,
            Err(_) => return false,
        };
        let named = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(_) => return false,
        };

        held.dev() == named.dev() && held.ino() == named.ino()
    }

    /// Windows keeps delete-pending semantics: std opens files with
    /// FILE_SHARE_DELETE, so the remove completes once the last handle closes
    /// and a stale generation's name is already gone for later callers.
    #[cfg(windows)]
    fn names_same_inode(&self) -> bool {
        true
    }
}
