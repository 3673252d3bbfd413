//! Persisted configuration: device path, mirror catalog, and flags.
//!
//! The config is a single JSON file under the config directory. A missing
//! or unreadable file never fails a run: `load` falls back to the
//! compiled-in defaults and immediately re-persists them, so the next load
//! sees a valid file again.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.json";

/// Persisted configuration.
///
/// Unknown keys in the file are ignored; missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Mount point of the removable device being provisioned.
    #[serde(default)]
    pub device_path: Option<PathBuf>,

    /// Whether to probe for a device mount automatically.
    #[serde(default = "default_auto_detect", rename = "auto_detect_sd")]
    pub auto_detect_device: bool,

    /// Artifact key -> source URL.
    #[serde(default = "default_mirrors", rename = "download_mirrors")]
    pub mirrors: BTreeMap<String, String>,
}

fn default_auto_detect() -> bool {
    true
}

fn default_mirrors() -> BTreeMap<String, String> {
    let entries = [
        (
            "boot9strap",
            "https://github.com/SciresM/boot9strap/releases/download/1.4/boot9strap-1.4.zip",
        ),
        (
            "luma3ds",
            "https://github.com/LumaTeam/Luma3DS/releases/download/v13.0/Luma3DSv13.0.zip",
        ),
        (
            "godmode9",
            "https://github.com/d0k3/GodMode9/releases/download/v2.1.1/GodMode9-2.1.1.zip",
        ),
        (
            "fbi",
            "https://github.com/Steveice10/FBI/releases/download/2.6.1/FBI-2.6.1.zip",
        ),
        (
            "homebrew_launcher",
            "https://github.com/fincs/new-hbmenu/releases/download/v3.5.1/homebrew_launcher.zip",
        ),
        (
            "anemone",
            "https://github.com/astronautlevel2/Anemone3DS/releases/download/v2.3.0/Anemone3DS.v2.3.0.zip",
        ),
    ];
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_path: None,
            auto_detect_device: default_auto_detect(),
            mirrors: default_mirrors(),
        }
    }
}

impl Config {
    /// Load the config from the default config directory.
    pub fn load() -> Result<Self> {
        let path = paths::config_dir()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    /// Load a config from an explicit path.
    ///
    /// On a missing file or a parse failure the compiled-in defaults are
    /// returned and persisted back, so a corrupted file self-heals.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(config) => Ok(config),
                Err(err) => {
                    log::warn!(
                        "Config at {} is malformed ({err}), resetting to defaults",
                        path.display()
                    );
                    let config = Self::default();
                    config.save_to(path)?;
                    Ok(config)
                }
            },
            Err(_) => {
                log::debug!("No config at {}, writing defaults", path.display());
                let config = Self::default();
                config.save_to(path)?;
                Ok(config)
            }
        }
    }

    /// Save to the default config location.
    pub fn save(&self) -> Result<()> {
        let path = paths::config_dir()?.join(CONFIG_FILE);
        self.save_to(&path)
    }

    /// Save atomically to an explicit path.
    ///
    /// Writes to a temp sibling first and renames over the target, so a
    /// crash mid-write never corrupts the previous valid config.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).with_context(|| format!("Could not write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Could not replace {}", path.display()))?;
        Ok(())
    }

    /// Look up the mirror URL for an artifact key.
    pub fn mirror(&self, key: &str) -> Option<&str> {
        self.mirrors.get(key).map(String::as_str)
    }

    /// Local cache filename for an artifact key.
    ///
    /// Derived solely from the key, never from server metadata.
    pub fn artifact_filename(key: &str) -> String {
        format!("{key}.zip")
    }
}
