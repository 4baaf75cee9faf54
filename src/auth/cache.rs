//! Load-once credential cache
//!
//! The credential table is read lazily on first use and shared read-only
//! by every session for the rest of the process lifetime.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::credentials::CredentialStore;
use crate::error::AuthError;

/// Outcome of the single load: the store plus the error to show, if any.
#[derive(Debug, Default)]
pub struct LoadedCredentials {
    pub store: CredentialStore,
    pub error: Option<AuthError>,
}

/// Memoized access to the credential table at `path`.
#[derive(Debug)]
pub struct CredentialCache {
    path: PathBuf,
    loaded: OnceLock<LoadedCredentials>,
}

impl CredentialCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }

    /// Returns the loaded table, reading the file on the first call only.
    pub fn get(&self) -> &LoadedCredentials {
        self.loaded.get_or_init(|| {
            let (store, error) = CredentialStore::load(&self.path);
            if let Some(e) = &error {
                warn!("{}", e);
            }
            LoadedCredentials { store, error }
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_lazily_and_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        fs::write(&path, "name,password\nalice,secret\n").unwrap();

        let cache = CredentialCache::new(&path);
        assert!(!cache.is_loaded());

        assert!(cache.get().store.find_by_name("alice").is_some());
        assert!(cache.is_loaded());

        // Later edits are not picked up.
        fs::write(&path, "name,password\nbob,hunter2\n").unwrap();
        assert!(cache.get().store.find_by_name("alice").is_some());
        assert!(cache.get().store.find_by_name("bob").is_none());
    }

    #[test]
    fn test_missing_file_is_cached_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CredentialCache::new(dir.path().join("nope.csv"));

        let loaded = cache.get();
        assert!(loaded.store.is_empty());
        assert!(matches!(loaded.error, Some(AuthError::MissingStore(_))));
    }
}
