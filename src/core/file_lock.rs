//! Advisory flock(2) serializing read-modify-write of the data file across processes.

use crate::error::{PswdError, Result};
use crate::util::fs as pswd_fs;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::debug;

/// An exclusive file lock. Released on drop (closing the file releases the flock).
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Acquire an exclusive lock, blocking until available.
    pub fn exclusive(path: &Path) -> Result<Self> {
        let file = open_lock_file(path)?;
        match file.try_lock_exclusive() {
            Ok(()) => return Ok(Self { _file: file }),
            Err(ref e) if is_contended(e) => {
                debug!(path = %path.display(), "lock held by another pswd process, waiting");
            }
            Err(e) => return Err(PswdError::io("try lock", path, e)),
        }
        file.lock_exclusive()
            .map_err(|e| PswdError::io("acquire lock", path, e))?;
        Ok(Self { _file: file })
    }
}

fn open_lock_file(path: &Path) -> Result<File> {
    pswd_fs::ensure_parent(path)?;
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|e| PswdError::io("open lock file", path, e))
}

fn is_contended(e: &std::io::Error) -> bool {
    // fs2 on Linux may return Other (EAGAIN) instead of WouldBlock
    e.kind() == std::io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
