//! Centralized path resolution for sdforge.
//!
//! All local state lives under a single base directory, with per-directory
//! environment overrides so the cache or backups can be pointed at an
//! external disk.
//!
//! # Environment Variables
//!
//! - `SDFORGE_CONFIG_DIR` - Override config directory
//! - `SDFORGE_CACHE_DIR` - Override the download cache directory
//! - `SDFORGE_BACKUPS_DIR` - Override the backups root

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override.
pub const ENV_CONFIG_DIR: &str = "SDFORGE_CONFIG_DIR";

/// Environment variable for cache directory override.
pub const ENV_CACHE_DIR: &str = "SDFORGE_CACHE_DIR";

/// Environment variable for backups root override.
pub const ENV_BACKUPS_DIR: &str = "SDFORGE_BACKUPS_DIR";

/// Get the sdforge config directory path.
///
/// Priority:
/// 1. `SDFORGE_CONFIG_DIR` env var
/// 2. `XDG_CONFIG_HOME/sdforge`
/// 3. `~/.config/sdforge`
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        log::debug!("Using config dir from {}: {}", ENV_CONFIG_DIR, dir);
        return Ok(PathBuf::from(dir));
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("sdforge"));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("sdforge"))
}

/// Get the download cache directory path.
///
/// Fetched archives and their extracted contents live here.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
        log::debug!("Using cache dir from {}: {}", ENV_CACHE_DIR, dir);
        return Ok(PathBuf::from(dir));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".local")
        .join("share")
        .join("sdforge")
        .join("downloads"))
}

/// Get the backups root directory path.
pub fn backups_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_BACKUPS_DIR) {
        log::debug!("Using backups dir from {}: {}", ENV_BACKUPS_DIR, dir);
        return Ok(PathBuf::from(dir));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home
        .join(".local")
        .join("share")
        .join("sdforge")
        .join("backups"))
}

/// Create the cache and backups directories if they do not exist yet.
pub fn ensure_base_dirs() -> Result<()> {
    for dir in [cache_dir()?, backups_dir()?] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Could not create {}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir_resolves() {
        let dir = cache_dir().unwrap();
        assert!(dir.is_absolute());
    }

    #[test]
    fn test_backups_dir_resolves() {
        let dir = backups_dir().unwrap();
        assert!(dir.is_absolute());
    }
}
