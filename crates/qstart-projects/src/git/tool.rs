//! Git executable invocation

use crate::error::{Error, Result};
use crate::git::WorkingDirGuard;
use camino::Utf8Path;
use std::path::PathBuf;
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info};

/// Git executable resolved from PATH
#[derive(Debug, Clone)]
pub struct GitTool {
    /// Command name as configured
    command: String,
    /// Resolved executable
    program: PathBuf,
}

impl GitTool {
    /// Look up `command` in PATH
    ///
    /// Returns `None` when the executable is not reachable.
    pub fn locate(command: &str) -> Option<Self> {
        match which::which(command) {
            Ok(program) => {
                debug!("Found {} at {}", command, program.display());
                Some(Self {
                    command: command.to_string(),
                    program,
                })
            }
            Err(e) => {
                debug!("{} not found in PATH: {}", command, e);
                None
            }
        }
    }

    /// Run `git init` inside `project_dir`
    pub async fn init(&self, project_dir: &Utf8Path, silent: bool) -> Result<()> {
        info!("Initializing git repository at: {}", project_dir);

        let _cwd = WorkingDirGuard::enter(project_dir)?;
        self.run(&["init"], silent).await?;

        info!("Repository initialized successfully");
        Ok(())
    }

    /// Stage everything in `project_dir` and commit it with `message`
    pub async fn commit_all(
        &self,
        project_dir: &Utf8Path,
        message: &str,
        silent: bool,
    ) -> Result<()> {
        debug!("Creating initial commit");

        let _cwd = WorkingDirGuard::enter(project_dir)?;
        self.run(&["add", "."], silent).await?;
        self.run(&["commit", "-m", message], silent).await?;

        info!("Initial commit created");
        Ok(())
    }

    /// Run git in the current directory
    ///
    /// In silent mode the child's output is captured and only logged; otherwise
    /// it goes straight to the terminal.
    async fn run(&self, args: &[&str], silent: bool) -> Result<()> {
        debug!("Running: {} {}", self.command, args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(args);

        if silent {
            let output = cmd.output().await.map_err(|e| self.spawn_error(args, e))?;
            log_output(&output);
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(Error::git_operation(format!(
                    "{} {} failed: {}",
                    self.command,
                    args.join(" "),
                    stderr.trim()
                )));
            }
        } else {
            let status = cmd.status().await.map_err(|e| self.spawn_error(args, e))?;
            if !status.success() {
                return Err(Error::git_operation(format!(
                    "{} {} exited with {}",
                    self.command,
                    args.join(" "),
                    status
                )));
            }
        }

        Ok(())
    }

    fn spawn_error(&self, args: &[&str], e: std::io::Error) -> Error {
        Error::process_execution(format!("{} {}: {}", self.command, args.join(" "), e))
    }
}

fn log_output(output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        debug!("stdout: {}", stdout.trim());
    }
    if !stderr.trim().is_empty() {
        debug!("stderr: {}", stderr.trim());
    }
}
