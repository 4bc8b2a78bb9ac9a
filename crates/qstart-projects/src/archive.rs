//! Template archive download and unpacking
//!
//! The template is a ZIP archive with a single top-level directory. It is
//! downloaded to a temporary file, extracted into a temporary directory and the
//! top-level directory is moved into place as the new project. Both temporary
//! resources are removed when they go out of scope, on success and on error.

use crate::error::{Error, Result};
use crate::settings::NetworkSettings;
use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Downloads template archives over HTTP
pub struct TemplateFetcher {
    /// HTTP client
    client: reqwest::Client,

    /// Show a progress bar while downloading
    show_progress: bool,
}

impl TemplateFetcher {
    /// Create a fetcher using the configured timeout and user agent
    pub fn new(network: &NetworkSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            show_progress: false,
        })
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download `url` into a private temporary file
    ///
    /// The file is deleted when the returned handle is dropped.
    pub async fn fetch(&self, url: &str) -> Result<NamedTempFile> {
        info!("Downloading template from {}", url);

        let mut file = NamedTempFile::new()?;
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::download_failed(url, status.as_u16()));
        }

        let pb = self.progress_bar(response.content_length());
        let mut downloaded: u64 = 0;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            if let Some(pb) = &pb {
                pb.set_position(downloaded);
            }
        }
        file.flush()?;

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        debug!("Downloaded {} bytes to {}", downloaded, file.path().display());
        Ok(file)
    }

    fn progress_bar(&self, total: Option<u64>) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                let style = ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes}",
                )
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
                pb.set_style(style);
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
        };
        pb.set_message("Downloading template");
        Some(pb)
    }
}

/// Extract `archive` and move its `root_dir` entry to `project_dir`
///
/// An existing directory at `project_dir` is removed first.
pub fn unpack_template(archive: &Path, root_dir: &str, project_dir: &Utf8Path) -> Result<()> {
    let staging = TempDir::new()?;
    debug!("Extracting template into {}", staging.path().display());

    let mut zip = ZipArchive::new(File::open(archive)?)?;
    zip.extract(staging.path())?;

    let extracted_root = staging.path().join(root_dir);
    if !extracted_root.is_dir() {
        return Err(Error::template_root_missing(root_dir));
    }

    if project_dir.is_dir() {
        info!("Removing existing directory {}", project_dir);
        fs::remove_dir_all(project_dir)?;
    } else if project_dir.exists() {
        return Err(Error::target_not_directory(project_dir.as_str()));
    }

    if let Some(parent) = project_dir.parent() {
        if !parent.as_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    move_dir(&extracted_root, project_dir.as_std_path())?;
    info!("Template unpacked to {}", project_dir);
    Ok(())
}

/// Rename `src` to `dest`, copying when they live on different filesystems
fn move_dir(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Cross-device move, copying {}", src.display());
            copy_dir(src, dest)
        }
        Err(e) => Err(e.into()),
    }
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::invalid_path(entry.path().to_string_lossy().into_owned()))?;
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use serial_test::serial;
    use std::env;
    use std::ffi::OsString;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_archive(entries: &[(&str, &str)]) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        let mut zip = ZipWriter::new(file.reopen().unwrap());
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        file
    }

    fn utf8_dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    /// Points TMPDIR at a private directory until dropped
    struct ScopedTmpdir {
        dir: TempDir,
        previous: Option<OsString>,
    }

    impl ScopedTmpdir {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let previous = env::var_os("TMPDIR");
            env::set_var("TMPDIR", dir.path());
            Self { dir, previous }
        }

        fn leftovers(&self) -> Vec<String> {
            fs::read_dir(self.dir.path())
                .unwrap()
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        }
    }

    impl Drop for ScopedTmpdir {
        fn drop(&mut self) {
            match &self.previous {
                Some(val) => env::set_var("TMPDIR", val),
                None => env::remove_var("TMPDIR"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_unpack_moves_root_into_place() {
        let archive = write_archive(&[
            ("skel-master/README.md", "# skel"),
            ("skel-master/app/application.cpp", "void init() {}"),
        ]);
        let temp = TempDir::new().unwrap();
        let project = utf8_dir(&temp).join("blinky");

        unpack_template(archive.path(), "skel-master", &project).unwrap();

        assert_eq!(fs::read_to_string(project.join("README.md")).unwrap(), "# skel");
        assert!(project.join("app/application.cpp").is_file());
        assert!(!project.join("skel-master").exists());
    }

    #[test]
    #[serial]
    fn test_unpack_replaces_existing_directory() {
        let archive = write_archive(&[("skel-master/README.md", "# skel")]);
        let temp = TempDir::new().unwrap();
        let project = utf8_dir(&temp).join("blinky");
        fs::create_dir_all(project.join("old")).unwrap();
        fs::write(project.join("old/stale.txt"), "stale").unwrap();

        unpack_template(archive.path(), "skel-master", &project).unwrap();

        assert!(!project.join("old").exists());
        assert!(project.join("README.md").is_file());
    }

    #[test]
    #[serial]
    fn test_unpack_creates_missing_parents() {
        let archive = write_archive(&[("skel-master/README.md", "# skel")]);
        let temp = TempDir::new().unwrap();
        let project = utf8_dir(&temp).join("nested/projects/blinky");

        unpack_template(archive.path(), "skel-master", &project).unwrap();

        assert!(project.join("README.md").is_file());
    }

    #[test]
    #[serial]
    fn test_unpack_missing_root_leaves_target_untouched() {
        let archive = write_archive(&[("other-root/README.md", "# other")]);
        let temp = TempDir::new().unwrap();
        let project = utf8_dir(&temp).join("blinky");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("keep.txt"), "keep").unwrap();

        let result = unpack_template(archive.path(), "skel-master", &project);

        assert!(matches!(result, Err(Error::TemplateRootMissing { .. })));
        assert!(project.join("keep.txt").is_file());
    }

    #[test]
    #[serial]
    fn test_unpack_rejects_file_target() {
        let archive = write_archive(&[("skel-master/README.md", "# skel")]);
        let temp = TempDir::new().unwrap();
        let project = utf8_dir(&temp).join("blinky");
        fs::write(&project, "not a directory").unwrap();

        let result = unpack_template(archive.path(), "skel-master", &project);
        assert!(matches!(result, Err(Error::TargetNotDirectory { .. })));
    }

    #[test]
    #[serial]
    fn test_unpack_rejects_non_zip() {
        let mut archive = NamedTempFile::new().unwrap();
        archive.write_all(b"<html>not found</html>").unwrap();
        let temp = TempDir::new().unwrap();
        let project = utf8_dir(&temp).join("blinky");

        let result = unpack_template(archive.path(), "skel-master", &project);
        assert!(matches!(result, Err(Error::Archive(_))));
        assert!(!project.exists());
    }

    #[test]
    #[serial]
    fn test_copy_dir_preserves_tree() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("a/b")).unwrap();
        fs::write(src.path().join("a/b/file.txt"), "data").unwrap();
        fs::write(src.path().join("top.txt"), "top").unwrap();

        let dest_root = TempDir::new().unwrap();
        let dest = dest_root.path().join("copy");
        copy_dir(src.path(), &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("a/b/file.txt")).unwrap(), "data");
        assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
    }

    #[test]
    #[serial]
    fn test_unpack_releases_staging_dir_on_success() {
        let archive = write_archive(&[("skel-master/README.md", "# skel")]);
        let target = TempDir::new().unwrap();
        let project = utf8_dir(&target).join("blinky");

        let tmpdir = ScopedTmpdir::new();
        unpack_template(archive.path(), "skel-master", &project).unwrap();

        assert!(tmpdir.leftovers().is_empty(), "{:?}", tmpdir.leftovers());
        assert!(project.join("README.md").is_file());
    }

    #[test]
    #[serial]
    fn test_unpack_releases_staging_dir_on_error() {
        let archive = write_archive(&[("other-root/README.md", "# other")]);
        let target = TempDir::new().unwrap();
        let project = utf8_dir(&target).join("blinky");

        let tmpdir = ScopedTmpdir::new();
        let result = unpack_template(archive.path(), "skel-master", &project);

        assert!(matches!(result, Err(Error::TemplateRootMissing { .. })));
        assert!(tmpdir.leftovers().is_empty(), "{:?}", tmpdir.leftovers());
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_releases_temp_file_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/skel.zip"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let fetcher = TemplateFetcher::new(&NetworkSettings::default()).unwrap();

        let tmpdir = ScopedTmpdir::new();
        let result = fetcher.fetch(&format!("{}/skel.zip", server.uri())).await;

        assert!(matches!(result, Err(Error::DownloadFailed { status: 404, .. })));
        assert!(tmpdir.leftovers().is_empty(), "{:?}", tmpdir.leftovers());
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_temp_file_removed_on_drop() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/skel.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK".to_vec()))
            .mount(&server)
            .await;
        let fetcher = TemplateFetcher::new(&NetworkSettings::default()).unwrap();

        let tmpdir = ScopedTmpdir::new();
        let file = fetcher
            .fetch(&format!("{}/skel.zip", server.uri()))
            .await
            .unwrap();
        assert_eq!(fs::read(file.path()).unwrap(), b"PK");
        assert_eq!(tmpdir.leftovers().len(), 1);

        drop(file);
        assert!(tmpdir.leftovers().is_empty(), "{:?}", tmpdir.leftovers());
    }
}
