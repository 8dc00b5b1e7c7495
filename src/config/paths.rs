//! Application data directory resolution.
//!
//! The directory is resolved once in `main` and passed to
//! [`Config::new_default`](crate::config::Config::new_default), so the
//! default factory itself never consults the environment.

use std::path::{Path, PathBuf};

/// OS-appropriate directory under which tollgate keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDataDir(PathBuf);

impl AppDataDir {
    /// Resolve the data directory for an application name.
    ///
    /// - Unix-likes: `~/.<name>`
    /// - macOS: `~/Library/Application Support/<Name>`
    /// - Windows: `%LOCALAPPDATA%\<Name>`
    ///
    /// Falls back to the current directory when no home directory is known.
    /// Nothing is created on disk.
    pub fn for_app(name: &str) -> Self {
        let name = name.trim_start_matches('.');
        Self(resolve(name).unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Use an already-resolved directory (tests, `--basedir`).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Path of a file directly inside the data directory.
    pub fn join(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.0.join(file_name)
    }
}

#[cfg(target_os = "macos")]
fn resolve(name: &str) -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(capitalize(name)))
}

#[cfg(windows)]
fn resolve(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(capitalize(name)))
}

#[cfg(not(any(target_os = "macos", windows)))]
fn resolve(name: &str) -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(format!(".{}", name.to_lowercase())))
}

#[cfg(any(target_os = "macos", windows))]
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
