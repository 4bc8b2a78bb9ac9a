//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;
use qstart_projects::RunConfig;

/// Sming project quickstart
#[derive(Parser, Debug)]
#[command(name = "qstart")]
#[command(author, version, about = "Sming project quickstart", long_about = None)]
pub struct Cli {
    /// Project directory name, may be relative or absolute path
    pub name: String,

    /// Run in verbose mode
    #[arg(short, long, conflicts_with = "silent")]
    pub verbose: bool,

    /// Run in silent mode
    #[arg(short, long)]
    pub silent: bool,

    /// Skip environment sanity check
    #[arg(long)]
    pub skip_sanity_check: bool,

    /// Skip local git repository initialization
    #[arg(long)]
    pub skip_git_init: bool,

    /// Skip initial git commit
    #[arg(long)]
    pub skip_git_commit: bool,

    /// Remove the template's LICENSE file
    #[arg(long)]
    pub skip_license: bool,

    /// Path to a settings file (defaults to the user config directory)
    #[arg(short, long, env = "QSTART_CONFIG")]
    pub config: Option<Utf8PathBuf>,
}

impl Cli {
    /// Whether the startup banner is printed
    pub fn show_banner(&self) -> bool {
        !self.silent
    }

    /// Build the run configuration from parsed arguments
    pub fn run_config(&self) -> qstart_projects::Result<RunConfig> {
        let mut config = RunConfig::new(&self.name)?;
        config.verbose = self.verbose;
        config.silent = self.silent;
        config.skip_sanity_check = self.skip_sanity_check;
        config.skip_git_init = self.skip_git_init;
        config.skip_git_commit = self.skip_git_commit;
        config.skip_license = self.skip_license;
        Ok(config)
    }
}
