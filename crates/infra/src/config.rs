//! Storage configuration loading.

use std::path::PathBuf;

/// Environment variable naming the snapshot file.
pub const STORAGE_PATH_ENV: &str = "HBNB_STORAGE_PATH";

pub const DEFAULT_STORAGE_PATH: &str = "file.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Snapshot file location.
    pub path: PathBuf,
}

impl StorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through `lookup`; blank values fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(STORAGE_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            Some(path) => Self::new(path),
            None => {
                tracing::debug!(
                    "{STORAGE_PATH_ENV} not set; using {DEFAULT_STORAGE_PATH}"
                );
                Self::default()
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_PATH)
    }
}
