//! # qstart-projects
//!
//! Project scaffolding library for the qstart CLI providing:
//! - Run configuration and layered tool settings
//! - Environment sanity check with an interactive override
//! - Template archive download and unpacking
//! - Skeleton cleanup (editor workspace, ignore file, license, readme)
//! - Git repository initialization and initial commit
//!
//! # Examples
//!
//! ```no_run
//! use qstart_projects::{ConsolePrompt, Outcome, Quickstart, RunConfig, SettingsLoader};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = RunConfig::new("blinky")?;
//! config.skip_license = true;
//!
//! let settings = SettingsLoader::new().load()?;
//! let mut quickstart = Quickstart::new(config, settings)?;
//! if quickstart.run(&mut ConsolePrompt).await? == Outcome::Aborted {
//!     println!("cancelled");
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod git;
pub mod quickstart;
pub mod sanity;
pub mod settings;
pub mod skeleton;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use quickstart::{Outcome, Quickstart};
pub use sanity::{ConsolePrompt, Prompt};
pub use settings::{QuickstartSettings, SettingsLoader};
