//! Tool settings with layered precedence
//!
//! Settings are resolved from the following sources (low to high):
//! 1. Built-in defaults
//! 2. Settings file (`<config dir>/config.yaml` or an explicit path)
//! 3. Environment variables (`QSTART_*` prefix)

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "config.yaml";

/// Top-level settings for a quickstart run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct QuickstartSettings {
    /// Template archive location
    #[serde(default)]
    pub template: TemplateSettings,

    /// Environment sanity check
    #[serde(default)]
    pub sanity: SanitySettings,

    /// Version control tool
    #[serde(default)]
    pub git: GitSettings,

    /// HTTP client
    #[serde(default)]
    pub network: NetworkSettings,
}

/// Template archive settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateSettings {
    /// ZIP archive URL
    #[serde(default = "default_template_url")]
    pub url: String,

    /// Single top-level directory inside the archive
    #[serde(default = "default_template_root")]
    pub root_dir: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            url: default_template_url(),
            root_dir: default_template_root(),
        }
    }
}

/// Sanity check settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SanitySettings {
    /// Variables marking the toolchain location
    #[serde(default = "default_required_env")]
    pub required_env: Vec<String>,
}

impl Default for SanitySettings {
    fn default() -> Self {
        Self {
            required_env: default_required_env(),
        }
    }
}

/// Git settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GitSettings {
    /// Executable looked up in PATH
    #[serde(default = "default_git_command")]
    pub command: String,

    /// Message used for the first commit
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            command: default_git_command(),
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

/// Network settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkSettings {
    /// Download timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with the download request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_template_url() -> String {
    "https://github.com/zgoda/sming-skel/archive/master.zip".to_string()
}
fn default_template_root() -> String {
    "sming-skel-master".to_string()
}
fn default_required_env() -> Vec<String> {
    vec!["ESP_HOME".to_string(), "SMING_HOME".to_string()]
}
fn default_git_command() -> String {
    "git".to_string()
}
fn default_initial_commit_message() -> String {
    "Initial commit".to_string()
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_user_agent() -> String {
    format!("qstart/{}", env!("CARGO_PKG_VERSION"))
}

/// Settings loader
pub struct SettingsLoader {
    /// Settings file to read, if any
    path: Option<Utf8PathBuf>,
    /// Whether a missing file is an error
    explicit: bool,
}

impl SettingsLoader {
    /// Loader reading `config.yaml` from the standard config directory
    pub fn new() -> Self {
        let path = ProjectDirs::from("", "", "qstart")
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok())
            .map(|dir| dir.join(SETTINGS_FILE));
        Self {
            path,
            explicit: false,
        }
    }

    /// Loader reading `config.yaml` from a custom directory
    pub fn with_dir(config_dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: Some(config_dir.as_ref().join(SETTINGS_FILE)),
            explicit: false,
        }
    }

    /// Loader reading an explicit settings file that must exist
    pub fn with_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            explicit: true,
        }
    }

    /// Settings file this loader reads
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Resolve settings from defaults, the settings file and the environment
    pub fn load(&self) -> Result<QuickstartSettings> {
        let mut settings = match &self.path {
            Some(path) if path.exists() => {
                debug!("Loading settings from {}", path);
                let content = fs::read_to_string(path)?;
                parse_yaml(&content)
                    .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?
            }
            Some(path) if self.explicit => return Err(Error::config_not_found(path.as_str())),
            _ => QuickstartSettings::default(),
        };

        Self::apply_env_overrides(&mut settings);
        Ok(settings)
    }

    /// Parse settings YAML, treating an empty document as all defaults
    pub fn parse(content: &str) -> Result<QuickstartSettings> {
        Ok(parse_yaml(content)?)
    }

    fn apply_env_overrides(settings: &mut QuickstartSettings) {
        if let Ok(val) = env::var("QSTART_TEMPLATE_URL") {
            settings.template.url = val;
        }

        if let Ok(val) = env::var("QSTART_TEMPLATE_ROOT") {
            settings.template.root_dir = val;
        }

        if let Ok(val) = env::var("QSTART_GIT_COMMAND") {
            settings.git.command = val;
        }
    }
}

fn parse_yaml(content: &str) -> std::result::Result<QuickstartSettings, serde_yaml_ng::Error> {
    if content.trim().is_empty() {
        return Ok(QuickstartSettings::default());
    }
    serde_yaml_ng::from_str(content)
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}
