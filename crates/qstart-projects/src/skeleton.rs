//! Post-unpack cleanup of template-only files

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::fs;
use tracing::debug;

/// Editor workspace folder as shipped in the template
pub const VSCODE_TEMPLATE_DIR: &str = "vscode-project";
/// Editor workspace folder name in the project
pub const VSCODE_DIR: &str = ".vscode";
/// Ignore file as shipped in the template
pub const GITIGNORE_TEMPLATE_FILE: &str = "gitignore-project";
/// Ignore file name in the project
pub const GITIGNORE_FILE: &str = ".gitignore";
/// Template license file
pub const LICENSE_FILE: &str = "LICENSE";
/// Project readme
pub const README_FILE: &str = "README.md";

/// Cleanup options
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Remove the template's LICENSE file
    pub remove_license: bool,
}

/// Turn a freshly unpacked template into a project named `name`
///
/// Renames the editor workspace and ignore file to their dotted names, drops the
/// template license when requested and replaces the readme with a single heading.
pub fn clean_skeleton(project_dir: &Utf8Path, name: &str, options: &CleanOptions) -> Result<()> {
    rename_entry(project_dir, VSCODE_TEMPLATE_DIR, VSCODE_DIR)?;
    rename_entry(project_dir, GITIGNORE_TEMPLATE_FILE, GITIGNORE_FILE)?;

    if options.remove_license {
        let license = project_dir.join(LICENSE_FILE);
        if license.exists() {
            debug!("Removing {}", license);
            fs::remove_file(&license)?;
        }
    }

    // Template readme content is discarded on purpose
    fs::write(project_dir.join(README_FILE), readme_heading(name))?;
    Ok(())
}

/// Readme content for a new project
pub fn readme_heading(name: &str) -> String {
    format!("# {}", name)
}

fn rename_entry(project_dir: &Utf8Path, from: &str, to: &str) -> Result<()> {
    let source = project_dir.join(from);
    if !source.exists() {
        return Err(Error::template_entry_missing(from));
    }

    let target = project_dir.join(to);
    if target.is_dir() {
        fs::remove_dir_all(&target)?;
    }

    debug!("Renaming {} to {}", source, target);
    fs::rename(&source, &target)?;
    Ok(())
}
