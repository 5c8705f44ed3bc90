use crate::FetchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound on manifest size; real manifests are a handful of lines.
pub const DEFAULT_MAX_MANIFEST_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_manifest_bytes")]
    pub max_manifest_bytes: u64,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
            auth_token: None,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_owned());
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_max_manifest_bytes(mut self, limit: u64) -> Self {
        self.max_manifest_bytes = limit;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from `~/.config/mtsp/fetch.json`, falling back to defaults
    /// when no config file exists. A present but invalid file is still an error.
    pub fn load_default_or_builtin() -> Result<Self, FetchError> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FetchError::Config(format!("invalid fetch config: {e}")))
    }

    pub fn save(&self, path: &Path) -> Result<(), FetchError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FetchError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("mtsp/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_manifest_bytes() -> u64 {
    DEFAULT_MAX_MANIFEST_BYTES
}

fn default_config_path() -> Result<PathBuf, FetchError> {
    let home = std::env::var("HOME").map_err(|_| FetchError::Config("HOME not set".to_owned()))?;
    Ok(PathBuf::from(home).join(".config/mtsp/fetch.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fetch.json");

        let config = FetchConfig::default()
            .with_token("secret123")
            .with_timeout_secs(5)
            .with_max_manifest_bytes(4096);
        config.save(&path).unwrap();

        let loaded = FetchConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fetch.json");
        std::fs::write(&path, r#"{"timeout_secs": 3}"#).unwrap();

        let loaded = FetchConfig::load(&path).unwrap();
        assert_eq!(loaded.timeout_secs, 3);
        assert_eq!(loaded.max_manifest_bytes, DEFAULT_MAX_MANIFEST_BYTES);
        assert!(loaded.user_agent.starts_with("mtsp/"));
        assert!(loaded.auth_token.is_none());
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fetch.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FetchConfig::load(&path).unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FetchConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
