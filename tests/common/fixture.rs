//! Temp-dir fixtures for driving the `semantic-extract` binary

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A scratch directory holding source files and request documents
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Create a new empty fixture directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the fixture root and return its full path
    pub fn add_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write an analysis request document
    pub fn add_request(&self, relative_path: &str, filename: &str, content: &str, extension: &str) -> PathBuf {
        let request = serde_json::json!({
            "filename": filename,
            "content": content,
            "extension": extension,
        });
        self.add_file(relative_path, &request.to_string())
    }

    /// Run the binary with `args` and return its output
    pub fn run_cli(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to run CLI")
    }

    /// Run the binary with `stdin` piped in
    pub fn run_cli_with_stdin(&self, args: &[&str], stdin: impl AsRef<[u8]>) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(stdin.as_ref())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for CLI")
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args);
        assert!(
            output.status.success(),
            "CLI command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_semantic-extract"));
        command
            .current_dir(self.path())
            .env_remove("SEMANTIC_EXTRACT_INPUT")
            .env_remove("SEMANTIC_EXTRACT_PRETTY")
            .env_remove("RUST_LOG")
            .args(args);
        command
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
