//! Advisory lock serializing extractions into one cache root

use crate::error::{PupprinteerError, PupprinteerResult};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Held exclusive lock on a cache root; released on drop
#[derive(Debug)]
pub struct CacheLock {
    // Closing the descriptor releases the lock
    _file: File,
    path: PathBuf,
}

impl CacheLock {
    /// Block until the lock at `path` is held exclusively
    pub async fn acquire(path: &Path) -> PupprinteerResult<Self> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::acquire_blocking(path))
            .await
            .map_err(|e| PupprinteerError::User(format!("Lock task failed: {}", e)))?
    }

    fn acquire_blocking(path: PathBuf) -> PupprinteerResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| PupprinteerError::CacheLock {
                path: path.clone(),
                source: e,
            })?;

        lock_exclusive(&file).map_err(|e| PupprinteerError::CacheLock {
            path: path.clone(),
            source: e,
        })?;

        debug!("Acquired cache lock {}", path.display());
        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        debug!("Released cache lock {}", self.path.display());
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    loop {
        // SAFETY: the descriptor is owned by `file` and stays open for the call
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
        if rc == 0 {
            return Ok(());
        }
        let err = std::io::Error::last_os_error();
        if err.kind() != std::io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(not(unix))]
fn lock_exclusive(_file: &File) -> std::io::Result<()> {
    debug!("Advisory cache locking is not available on this platform");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn acquire_creates_lock_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lock");

        let lock = CacheLock::acquire(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(lock.path(), path);
    }

    #[tokio::test]
    async fn reacquire_after_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lock");

        drop(CacheLock::acquire(&path).await.unwrap());
        CacheLock::acquire(&path).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn second_holder_waits_for_release() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lock");

        let first = CacheLock::acquire(&path).await.unwrap();
        let released = Arc::new(AtomicBool::new(false));

        let waiter = {
            let path = path.clone();
            let released = released.clone();
            tokio::spawn(async move {
                let _second = CacheLock::acquire(&path).await.unwrap();
                released.load(Ordering::SeqCst)
            })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        released.store(true, Ordering::SeqCst);
        drop(first);

        assert!(waiter.await.unwrap());
    }
}
