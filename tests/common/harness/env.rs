//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::TagsCommand;
use std::path::{Path, PathBuf};
use tagstore::infra::FileStorage;
use tagstore::store::STORAGE_KEY;
use tempfile::TempDir;

/// Isolated test environment with a temporary storage directory.
///
/// The directory is removed when the TestEnv is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the storage directory
    data_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    /// Returns the path to the storage directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the persisted snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        FileStorage::open(&self.data_dir)
            .expect("Failed to open storage")
            .path_for(STORAGE_KEY)
    }

    /// Reads the persisted snapshot as JSON.
    pub fn read_snapshot(&self) -> serde_json::Value {
        let contents =
            std::fs::read_to_string(self.snapshot_path()).expect("Failed to read snapshot");
        serde_json::from_str(&contents).expect("Snapshot was not valid JSON")
    }

    /// Writes the persisted snapshot directly.
    pub fn write_snapshot(&self, contents: &str) {
        std::fs::write(self.snapshot_path(), contents).expect("Failed to write snapshot");
    }

    /// Creates a TagsCommand configured for this test environment.
    pub fn cmd(&self) -> TagsCommand {
        TagsCommand::new().dir(&self.data_dir)
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.data_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
