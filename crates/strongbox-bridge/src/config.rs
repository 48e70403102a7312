//! Bridge configuration

use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strongbox_types::STRONGBOX_HOST_NAME;

/// Default bound on a single host exchange
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default number of credentials fetched per page
pub const DEFAULT_CREDENTIAL_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Native-messaging host identifier
    pub host_name: String,
    /// Explicit host executable; skips manifest discovery when set
    pub host_path: Option<PathBuf>,
    /// Origin passed to the host as its first argument
    pub origin: Option<String>,
    /// Extra directories searched for the host manifest before the defaults
    pub manifest_dirs: Vec<PathBuf>,
    /// Per-exchange timeout in milliseconds, 0 disables it
    pub request_timeout_ms: u64,
    pub credential_results_page_size: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host_name: STRONGBOX_HOST_NAME.to_string(),
            host_path: None,
            origin: None,
            manifest_dirs: Vec::new(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            credential_results_page_size: DEFAULT_CREDENTIAL_PAGE_SIZE,
        }
    }
}

impl BridgeConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Get the bridge home directory
    pub fn bridge_home() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("STRONGBOX_BRIDGE_HOME") {
            return Ok(PathBuf::from(path));
        }
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BridgeError::Config("could not find config directory".to_string()))?;
        Ok(config_dir.join("strongbox-bridge"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::bridge_home()?.join("bridge.json"))
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            BridgeError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// `STRONGBOX_HOST_PATH` and `STRONGBOX_HOST_NAME` win over the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("STRONGBOX_HOST_PATH") {
            if !path.is_empty() {
                self.host_path = Some(PathBuf::from(path));
            }
        }
        if let Ok(name) = std::env::var("STRONGBOX_HOST_NAME") {
            if !name.is_empty() {
                self.host_name = name;
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict to owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = BridgeConfig::load_from(&temp_dir.path().join("bridge.json")).unwrap();

        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.host_name, "com.markmcguill.strongbox");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("bridge.json");

        let config = BridgeConfig {
            host_path: Some(PathBuf::from("/opt/strongbox/host")),
            request_timeout_ms: 0,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.request_timeout(), None);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bridge.json");
        std::fs::write(&path, r#"{ "credential_results_page_size": 50 }"#).unwrap();

        let config = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(config.credential_results_page_size, 50);
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bridge.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            BridgeConfig::load_from(&path),
            Err(BridgeError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("STRONGBOX_HOST_PATH", "/tmp/override-host");
        std::env::set_var("STRONGBOX_HOST_NAME", "com.example.override");

        let mut config = BridgeConfig::default();
        config.apply_env_overrides();

        std::env::remove_var("STRONGBOX_HOST_PATH");
        std::env::remove_var("STRONGBOX_HOST_NAME");

        assert_eq!(config.host_path, Some(PathBuf::from("/tmp/override-host")));
        assert_eq!(config.host_name, "com.example.override");
    }
}
