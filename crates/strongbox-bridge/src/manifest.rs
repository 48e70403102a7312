//! Native-messaging host manifest discovery
//!
//! Browsers find a native host through a `<host_name>.json` manifest in a
//! per-browser directory. We read the same manifest to find the executable.

use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
    /// Chromium-family extension origins
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Firefox extension ids
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
}

impl HostManifest {
    /// Load and validate a manifest file.
    ///
    /// A relative `path` is resolved against the manifest's directory.
    pub fn load(manifest_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(manifest_path)?;
        let mut manifest: HostManifest = serde_json::from_str(&content).map_err(|e| {
            BridgeError::Config(format!(
                "invalid host manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        if manifest.kind != "stdio" {
            return Err(BridgeError::Config(format!(
                "host manifest {} has unsupported type {:?}",
                manifest_path.display(),
                manifest.kind
            )));
        }

        if manifest.path.is_relative() {
            let base = manifest_path.parent().unwrap_or(Path::new("."));
            manifest.path = base.join(&manifest.path);
        }

        Ok(manifest)
    }
}

/// Directories browsers search for user and system level host manifests
pub fn default_manifest_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            let support = home.join("Library/Application Support");
            for browser in [
                "Google/Chrome",
                "Chromium",
                "BraveSoftware/Brave-Browser",
                "Microsoft Edge",
                "Mozilla",
            ] {
                search.push(support.join(browser).join("NativeMessagingHosts"));
            }
        }
        search.push(PathBuf::from("/Library/Google/Chrome/NativeMessagingHosts"));
        search.push(PathBuf::from(
            "/Library/Application Support/Mozilla/NativeMessagingHosts",
        ));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Some(home) = dirs::home_dir() {
            for browser in [
                ".config/google-chrome",
                ".config/chromium",
                ".config/BraveSoftware/Brave-Browser",
                ".config/microsoft-edge",
            ] {
                search.push(home.join(browser).join("NativeMessagingHosts"));
            }
            search.push(home.join(".mozilla/native-messaging-hosts"));
        }
        search.push(PathBuf::from("/etc/opt/chrome/native-messaging-hosts"));
        search.push(PathBuf::from("/etc/chromium/native-messaging-hosts"));
        search.push(PathBuf::from("/usr/lib/mozilla/native-messaging-hosts"));
    }

    search
}

/// Find the manifest for `host_name`, searching `extra_dirs` first
pub fn locate(host_name: &str, extra_dirs: &[PathBuf]) -> Result<HostManifest> {
    let file_name = format!("{}.json", host_name);

    for dir in extra_dirs.iter().cloned().chain(default_manifest_dirs()) {
        let candidate = dir.join(&file_name);
        if !candidate.is_file() {
            continue;
        }

        debug!("Found host manifest {}", candidate.display());
        let manifest = HostManifest::load(&candidate)?;
        if manifest.name != host_name {
            return Err(BridgeError::Config(format!(
                "manifest {} names host {:?}, expected {:?}",
                candidate.display(),
                manifest.name,
                host_name
            )));
        }
        return Ok(manifest);
    }

    Err(BridgeError::HostNotFound(host_name.to_string()))
}
