//! Shared helpers for config integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tollgate::config::{AppDataDir, LoadOptions, Override};

/// A throwaway data directory standing in for the user's app data dir.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn app_dir(&self) -> AppDataDir {
        AppDataDir::from_path(self.dir.path())
    }

    /// Write a file inside the sandbox and return its path.
    #[allow(dead_code)]
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[allow(dead_code)]
    pub fn options(&self) -> LoadOptions {
        LoadOptions::new(self.app_dir())
    }
}

/// Parse `key=value` strings into overrides.
#[allow(dead_code)]
pub fn overrides(items: &[&str]) -> Vec<Override> {
    items.iter().map(|s| s.parse().unwrap()).collect()
}
