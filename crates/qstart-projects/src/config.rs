//! Run configuration built once from invocation arguments

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Immutable record describing a single quickstart run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Project name as given on the command line
    pub name: String,
    /// Absolute target directory derived from `name`
    pub project_dir: Utf8PathBuf,
    /// Emit progress messages
    pub verbose: bool,
    /// Suppress banner and external command output
    pub silent: bool,
    /// Bypass the environment variable presence check
    pub skip_sanity_check: bool,
    /// Bypass repository initialization
    pub skip_git_init: bool,
    /// Bypass the initial commit
    pub skip_git_commit: bool,
    /// Remove the bundled LICENSE file after unpacking
    pub skip_license: bool,
}

impl RunConfig {
    /// Create a configuration for `name` with every flag off
    ///
    /// Relative names are resolved against the current working directory.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_path(name));
        }
        let project_dir = resolve_project_dir(Utf8Path::new(&name))?;

        Ok(Self {
            name,
            project_dir,
            verbose: false,
            silent: false,
            skip_sanity_check: false,
            skip_git_init: false,
            skip_git_commit: false,
            skip_license: false,
        })
    }

    /// Reject flag combinations that cannot be honoured together
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.silent {
            return Err(Error::ConflictingVerbosity);
        }
        Ok(())
    }
}

fn resolve_project_dir(name: &Utf8Path) -> Result<Utf8PathBuf> {
    if name.is_absolute() {
        return Ok(name.to_path_buf());
    }
    let absolute = std::path::absolute(name.as_std_path())?;
    Utf8PathBuf::from_path_buf(absolute)
        .map_err(|path| Error::invalid_path(path.to_string_lossy().into_owned()))
}
