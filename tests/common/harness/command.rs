//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `tags` binary.
pub struct TagsCommand {
    args: Vec<String>,
}

impl TagsCommand {
    /// Creates a new command for the `tags` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--dir` option to specify the storage directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("tags").expect("Failed to find tags binary");
        cmd.env_remove("RUST_LOG");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `add` command.
    pub fn add(self, content_id: &str, tags: &str) -> Self {
        self.args(["add", content_id, tags])
    }

    /// Configures for the `suggest` command.
    pub fn suggest(self, input: &str) -> Self {
        self.args(["suggest", input])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `relate` command.
    pub fn relate(self, tag1: &str, tag2: &str) -> Self {
        self.args(["relate", tag1, tag2])
    }

    /// Configures for the `related` command.
    pub fn related(self, tag: &str) -> Self {
        self.args(["related", tag])
    }

    /// Configures for the `export` command.
    pub fn export(self) -> Self {
        self.args(["export"])
    }

    /// Configures for the `import` command.
    pub fn import(self, file: &Path) -> Self {
        self.args(["import".to_string(), file.to_string_lossy().to_string()])
    }

    // ===========================================
    // Option Modifiers
    // ===========================================

    /// Adds `--format json`.
    pub fn json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--counts`.
    pub fn with_counts(self) -> Self {
        self.args(["--counts"])
    }

    /// Adds `--dry-run`.
    pub fn dry_run(self) -> Self {
        self.args(["--dry-run"])
    }
}

impl Default for TagsCommand {
    fn default() -> Self {
        Self::new()
    }
}
