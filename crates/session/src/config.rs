//! Session storage configuration (environment-driven).

use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::{FileStore, InMemoryStore, KeyValueStore, StorageError};

/// Selects the storage backend: `file` (default) or `memory`.
pub const STORE_ENV: &str = "PME360_SESSION_STORE";

/// Path of the file store; defaults to `<data dir>/pme360/session.json`.
pub const PATH_ENV: &str = "PME360_SESSION_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PME360_SESSION_STORE value '{0}' (expected 'file' or 'memory')")]
    InvalidBackend(String),
    #[error("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub backend: StoreBackend,
}

impl SessionConfig {
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StoreBackend::File(path.into()),
        }
    }

    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup(STORE_ENV).unwrap_or_else(|| "file".to_string());

        match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::memory()),
            "file" => {
                let path = match lookup(PATH_ENV) {
                    Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
                    _ => default_store_path()?,
                };
                Ok(Self::file(path))
            }
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }

    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        match &self.backend {
            StoreBackend::Memory => Ok(InMemoryStore::arc()),
            StoreBackend::File(path) => {
                tracing::debug!(path = %path.display(), "opening session file store");
                Ok(Arc::new(FileStore::open(path.clone())?))
            }
        }
    }
}

fn default_store_path() -> Result<PathBuf, ConfigError> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;

    dir.push("pme360");
    dir.push("session.json");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn memory_backend() {
        let config = SessionConfig::from_lookup(lookup_from(&[(STORE_ENV, "Memory")])).unwrap();
        assert_eq!(config, SessionConfig::memory());
    }

    #[test]
    fn file_backend_with_explicit_path() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (STORE_ENV, "file"),
            (PATH_ENV, "/var/lib/pme360/session.json"),
        ]))
        .unwrap();
        assert_eq!(config, SessionConfig::file("/var/lib/pme360/session.json"));
    }

    #[test]
    fn file_backend_defaults_path_under_data_dir() {
        let Ok(config) = SessionConfig::from_lookup(lookup_from(&[])) else {
            // Environments without any home/data dir can't produce a default.
            return;
        };
        let StoreBackend::File(path) = config.backend else {
            panic!("expected file backend by default");
        };
        assert!(path.ends_with("pme360/session.json"));
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = SessionConfig::from_lookup(lookup_from(&[(STORE_ENV, "redis")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackend(ref v) if v == "redis"));
    }

    #[test]
    fn open_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("session.json");
        let store = SessionConfig::file(&path).open_store().unwrap();

        store.set("ecom360_role", "ADMIN").unwrap();
        assert!(path.exists());
    }
}
