//! Scoped change of the process working directory

use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Switches into a directory and switches back when dropped
///
/// The working directory is process-wide state; hold at most one guard at a time.
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
}

impl WorkingDirGuard {
    /// Save the current directory and change into `path`
    pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(path.as_ref())?;
        debug!("Entered {}", path.as_ref().display());
        Ok(Self { original })
    }

    /// Directory restored on drop
    pub fn original(&self) -> &Path {
        &self.original
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        match env::set_current_dir(&self.original) {
            Ok(()) => debug!("Restored {}", self.original.display()),
            Err(e) => warn!(
                "Failed to restore working directory {}: {}",
                self.original.display(),
                e
            ),
        }
    }
}
