use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::debug;

const LOCK_FILE: &str = ".lock";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock on a board directory.
///
/// Every read-modify-write of board.md happens while one of these is held,
/// so the CLI and a running TUI never interleave their writes. The lock is
/// released when the value is dropped.
pub struct FileLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("timed out after {waited:?} waiting for {path}: another sb process is writing")]
    Timeout { path: PathBuf, waited: Duration },
    #[error("lock error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FileLock {
    /// Lock `board_dir`, polling for up to `timeout`.
    pub fn acquire(board_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = board_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockError::CreateError {
                path: path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    debug!("event=lock_acquired path={}", path.display());
                    return Ok(FileLock { _file: file, path });
                }
                Err(e) if e.kind() != std::io::ErrorKind::WouldBlock => {
                    return Err(LockError::IoError(e));
                }
                Err(_) if start.elapsed() < timeout => std::thread::sleep(RETRY_INTERVAL),
                Err(_) => {
                    return Err(LockError::Timeout {
                        path,
                        waited: timeout,
                    });
                }
            }
        }
    }

    /// Acquire with the default 5 second timeout
    pub fn acquire_default(board_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(board_dir, DEFAULT_TIMEOUT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // The lock file itself stays: unlinking it would let a waiter lock a
        // stale inode while a newcomer locks a fresh one.
        debug!("event=lock_released path={}", self.path.display());
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}
