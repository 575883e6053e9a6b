use std::fs::{self, File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOCK_FILE_NAME: &str = "wallpick.lock";

/// Advisory single-instance lock. Held until dropped.
#[derive(Debug)]
pub struct InstanceLock {
    _file: File,
    path: PathBuf,
}

impl InstanceLock {
    /// Take a non-blocking exclusive `flock` on `<runtime_dir>/wallpick.lock`.
    /// `None` when another process holds it or anything goes wrong.
    pub fn acquire(runtime_dir: &Path) -> Option<Self> {
        if let Err(err) = fs::create_dir_all(runtime_dir) {
            debug!(dir = %runtime_dir.display(), %err, "cannot create runtime dir");
            return None;
        }

        let path = runtime_dir.join(LOCK_FILE_NAME);
        let file = match OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) => {
                debug!(path = %path.display(), %err, "cannot open lock file");
                return None;
            }
        };

        // SAFETY: the descriptor is owned by `file` and stays open for the call.
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if rc != 0 {
            debug!(path = %path.display(), "instance lock is held elsewhere");
            return None;
        }

        Some(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
