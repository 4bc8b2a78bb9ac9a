//! Shared fixtures for quickstart integration tests
//!
//! Provides an in-memory sming-skel style archive, a wiremock endpoint serving
//! it and a scripted prompt.

#![allow(dead_code)]

use camino::Utf8PathBuf;
use qstart_projects::settings::QuickstartSettings;
use qstart_projects::{Prompt, RunConfig};
use std::io::{Cursor, Write};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Top-level directory of the test archive
pub const TEMPLATE_ROOT: &str = "sming-skel-master";

/// Archive path served by the mock
pub const ARCHIVE_PATH: &str = "/zgoda/sming-skel/archive/master.zip";

/// Command name that is never on PATH
pub const MISSING_GIT: &str = "qstart-no-such-vcs-binary";

/// Files shipped in the test template
pub const TEMPLATE_FILES: &[(&str, &str)] = &[
    ("Makefile", "include $(SMING_HOME)/Makefile-rboot.mk\n"),
    ("app/application.cpp", "#include <user_config.h>\nvoid init() {}\n"),
    ("include/user_config.h", "#pragma once\n"),
    ("vscode-project/c_cpp_properties.json", "{}\n"),
    ("vscode-project/tasks.json", "{}\n"),
    ("gitignore-project", "out/\n*.o\n"),
    ("LICENSE", "GNU GENERAL PUBLIC LICENSE\n"),
    ("README.md", "# sming-skel\n\nSkeleton for Sming projects.\n"),
];

/// Build the template archive in memory
pub fn template_archive() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.add_directory(format!("{}/", TEMPLATE_ROOT), options)
        .unwrap();
    for (name, content) in TEMPLATE_FILES {
        zip.start_file(format!("{}/{}", TEMPLATE_ROOT, name), options)
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Serve the template archive; `expected` is the number of downloads the test allows
pub async fn mock_template(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(template_archive()),
        )
        .expect(expected)
        .mount(server)
        .await;
}

/// Serve a 404 for the template archive
pub async fn mock_missing_template(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

/// Settings pointing at the mock server
///
/// `required_env` lists the variables the sanity check looks for.
pub fn test_settings(server: &MockServer, required_env: &[&str]) -> QuickstartSettings {
    let mut settings = QuickstartSettings::default();
    settings.template.url = format!("{}{}", server.uri(), ARCHIVE_PATH);
    settings.template.root_dir = TEMPLATE_ROOT.to_string();
    settings.sanity.required_env = required_env.iter().map(|s| s.to_string()).collect();
    settings.network.timeout_secs = 10;
    settings
}

/// Run configuration targeting `<temp>/<name>`
pub fn test_config(temp: &TempDir, name: &str) -> RunConfig {
    let dir = Utf8PathBuf::from_path_buf(temp.path().join(name)).expect("Invalid UTF-8 path");
    RunConfig::new(dir.as_str()).unwrap()
}

/// Prompt replaying canned answers
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Vec<String>,
    /// Messages shown so far
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().rev().map(|s| s.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, message: &str) -> std::io::Result<String> {
        self.asked.push(message.to_string());
        Ok(self.answers.pop().unwrap_or_default())
    }
}

/// Whether a real git executable is available for tests
pub fn git_available() -> bool {
    which::which("git").is_ok()
}
