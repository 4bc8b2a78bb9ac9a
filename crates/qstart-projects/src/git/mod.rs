//! Git operations module
//!
//! Git is treated as an external collaborator: the executable is looked up once and
//! invoked from inside the project directory. The process working directory is
//! switched with [`WorkingDirGuard`] and restored when the guard drops.
//!
//! # Examples
//!
//! ```no_run
//! use qstart_projects::git::GitTool;
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! if let Some(git) = GitTool::locate("git") {
//!     let path = Utf8Path::new("/tmp/blinky");
//!     git.init(path, false).await?;
//!     git.commit_all(path, "Initial commit", false).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod tool;
mod workdir;

pub use tool::GitTool;
pub use workdir::WorkingDirGuard;
