// Advisory lock preventing two driver invocations from interleaving builds
// or clobbering report artifacts in the same results directory

use crate::errors::{CiError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

const LOCK_FILE: &str = ".ci-run.lock";

/// Held for the duration of a run; released on drop.
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Acquire the run lock, creating the results directory if needed.
    /// Non-blocking: a second concurrent run fails fast instead of queuing
    /// behind a build that may take half an hour.
    pub fn acquire(results_dir: &Path) -> Result<Self> {
        fs::create_dir_all(results_dir)?;

        let path = results_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        file.try_lock_exclusive()
            .map_err(|_| CiError::RunInProgress(path.display().to_string()))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
