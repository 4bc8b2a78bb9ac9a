//! Error types for qstart-projects

use thiserror::Error;

/// Result type alias using qstart-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Settings file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid settings content
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Both verbose and silent requested
    #[error("--verbose and --silent are mutually exclusive")]
    ConflictingVerbosity,

    /// Invalid path
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Template download returned a non-success status
    #[error("Failed to download template from {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    /// Expected top-level directory absent from the template archive
    #[error("Template archive does not contain expected directory: {root}")]
    TemplateRootMissing { root: String },

    /// Template entry required by the cleanup step is missing
    #[error("Template entry missing from project: {entry}")]
    TemplateEntryMissing { entry: String },

    /// Target path exists but is not a directory
    #[error("Target path exists and is not a directory: {path}")]
    TargetNotDirectory { path: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Process execution error
    #[error("Process execution failed: {0}")]
    ProcessExecution(String),

    /// HTTP transport error
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    /// ZIP archive error
    #[error("Archive error")]
    Archive(#[from] zip::result::ZipError),

    /// YAML parsing error
    #[error("YAML parsing error")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a download failed error
    pub fn download_failed(url: impl Into<String>, status: u16) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            status,
        }
    }

    /// Create a template root missing error
    pub fn template_root_missing(root: impl Into<String>) -> Self {
        Self::TemplateRootMissing { root: root.into() }
    }

    /// Create a template entry missing error
    pub fn template_entry_missing(entry: impl Into<String>) -> Self {
        Self::TemplateEntryMissing {
            entry: entry.into(),
        }
    }

    /// Create a target not directory error
    pub fn target_not_directory(path: impl Into<String>) -> Self {
        Self::TargetNotDirectory { path: path.into() }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a process execution error
    pub fn process_execution(message: impl Into<String>) -> Self {
        Self::ProcessExecution(message.into())
    }
}
