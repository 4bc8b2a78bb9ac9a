//! Project quickstart workflow
//!
//! Runs the scaffolding steps strictly in order:
//! 1. Environment sanity check (interactive override)
//! 2. Template download
//! 3. Template unpack into the project directory
//! 4. Skeleton cleanup
//! 5. Git repository initialization
//! 6. Initial commit

use crate::archive::{unpack_template, TemplateFetcher};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::git::GitTool;
use crate::sanity::{confirm_continue, missing_env_vars, Prompt, CONTINUE_PROMPT};
use crate::settings::QuickstartSettings;
use crate::skeleton::{clean_skeleton, CleanOptions};
use tracing::{debug, info, warn};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every enabled step ran
    Completed,
    /// The user declined to continue after the sanity check
    Aborted,
}

/// Scaffolds a single project
pub struct Quickstart {
    config: RunConfig,
    settings: QuickstartSettings,
    /// Located once at construction
    git: Option<GitTool>,
    repository_created: bool,
    show_progress: bool,
}

impl Quickstart {
    /// Prepare a run, locating the git executable
    pub fn new(config: RunConfig, settings: QuickstartSettings) -> Result<Self> {
        config.validate()?;
        let git = GitTool::locate(&settings.git.command);
        let show_progress = !config.silent;

        Ok(Self {
            config,
            settings,
            git,
            repository_created: false,
            show_progress,
        })
    }

    /// Enable or disable the download progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Whether the git executable was found at construction
    pub fn has_git(&self) -> bool {
        self.git.is_some()
    }

    /// Whether `git init` succeeded during this run
    pub fn repository_created(&self) -> bool {
        self.repository_created
    }

    /// Execute the workflow
    pub async fn run(&mut self, prompt: &mut dyn Prompt) -> Result<Outcome> {
        self.progress("performing sanity check...");
        if !self.sanity_check(prompt)? {
            info!("Quickstart cancelled");
            return Ok(Outcome::Aborted);
        }

        self.progress("downloading skeleton code...");
        self.download_skeleton().await?;

        self.progress("cleaning skeleton from unnecessary files...");
        let options = CleanOptions {
            remove_license: self.config.skip_license,
        };
        clean_skeleton(&self.config.project_dir, &self.config.name, &options)?;

        self.git_init().await?;
        self.git_commit().await?;

        self.progress(&format!(
            "project {} initialization done.",
            self.config.name
        ));
        Ok(Outcome::Completed)
    }

    /// Returns `false` when the user chose not to continue
    fn sanity_check(&self, prompt: &mut dyn Prompt) -> Result<bool> {
        if self.config.skip_sanity_check {
            debug!("Sanity check skipped");
            return Ok(true);
        }

        let missing = missing_env_vars(&self.settings.sanity.required_env);
        if missing.is_empty() {
            return Ok(true);
        }

        for var in &missing {
            warn!("{} variable not found in environment", var);
        }

        let answer = prompt.read_line(CONTINUE_PROMPT)?;
        Ok(confirm_continue(&answer))
    }

    async fn download_skeleton(&self) -> Result<()> {
        let fetcher =
            TemplateFetcher::new(&self.settings.network)?.with_progress(self.show_progress);
        let archive = fetcher.fetch(&self.settings.template.url).await?;

        unpack_template(
            archive.path(),
            &self.settings.template.root_dir,
            &self.config.project_dir,
        )
    }

    async fn git_init(&mut self) -> Result<()> {
        if self.config.skip_git_init {
            debug!("Git init skipped");
            return Ok(());
        }

        let Some(git) = &self.git else {
            warn!(
                "{} executable not present in $PATH, skipping step",
                self.settings.git.command
            );
            return Ok(());
        };

        self.progress("initializing local git repository...");
        match git.init(&self.config.project_dir, self.config.silent).await {
            Ok(()) => {
                self.repository_created = true;
                Ok(())
            }
            Err(Error::GitOperation { message }) => {
                warn!("{}", message);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn git_commit(&self) -> Result<()> {
        if !self.repository_created || self.config.skip_git_commit {
            return Ok(());
        }
        let Some(git) = &self.git else {
            return Ok(());
        };

        self.progress("making initial commit to local git repository...");
        let message = &self.settings.git.initial_commit_message;
        match git
            .commit_all(&self.config.project_dir, message, self.config.silent)
            .await
        {
            Ok(()) => Ok(()),
            Err(Error::GitOperation { message }) => {
                warn!("{}", message);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn progress(&self, message: &str) {
        if self.config.verbose {
            info!("{}", message);
        }
    }
}
