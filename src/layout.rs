//! Device directory layout.
//!
//! The firmware loader expects a fixed set of directories under the device
//! root. Creating them is purely additive: existing directories and any
//! other content on the device are left untouched.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Directories the loader expects, relative to the device root.
pub const DEVICE_LAYOUT: &[&str] = &[
    "3ds",
    "cias",
    "files9",
    "luma",
    "luma/payloads",
    "themes",
    "gm9",
    "gm9/out",
    "gm9/scripts",
];

/// Ensure every layout directory exists under `device_root`.
///
/// Returns the number of directories created. Pre-existing directories are
/// not an error. The root itself is validated once up front; nothing is
/// written when it is missing or read-only.
pub fn ensure_layout(device_root: &Path, layout: &[&str]) -> Result<usize> {
    check_device_root(device_root)?;

    let mut created = 0;
    for dir in layout {
        let path = device_root.join(dir);
        if !path.is_dir() {
            fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
            log::debug!("Created {}", path.display());
            created += 1;
        }
    }
    Ok(created)
}

/// Validate that the device root exists and is writable.
///
/// Writability is probed with a throwaway file, the same way the loader's
/// own tooling checks a mounted card.
pub fn check_device_root(device_root: &Path) -> Result<()> {
    if !device_root.is_dir() {
        return Err(Error::InvalidDeviceRoot {
            path: device_root.to_path_buf(),
            reason: "not a mounted directory".to_string(),
        });
    }

    let probe = device_root.join(".sdforge_write_test");
    match fs::write(&probe, b"probe") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(err) => Err(Error::InvalidDeviceRoot {
            path: device_root.to_path_buf(),
            reason: format!("not writable: {err}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_layout_creates_all() {
        let root = TempDir::new().unwrap();
        let created = ensure_layout(root.path(), DEVICE_LAYOUT).unwrap();
        assert_eq!(created, DEVICE_LAYOUT.len());
        for dir in DEVICE_LAYOUT {
            assert!(root.path().join(dir).is_dir(), "{dir} missing");
        }
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let root = TempDir::new().unwrap();
        ensure_layout(root.path(), DEVICE_LAYOUT).unwrap();
        let second = ensure_layout(root.path(), DEVICE_LAYOUT).unwrap();
        assert_eq!(second, 0);
    }

    #[test]
    fn test_existing_content_untouched() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("luma")).unwrap();
        std::fs::write(root.path().join("luma/config.ini"), b"keep me").unwrap();

        let created = ensure_layout(root.path(), DEVICE_LAYOUT).unwrap();
        // "luma" already existed; "luma/payloads" still gets created.
        assert_eq!(created, DEVICE_LAYOUT.len() - 1);
        assert_eq!(
            std::fs::read(root.path().join("luma/config.ini")).unwrap(),
            b"keep me"
        );
    }

    #[test]
    fn test_missing_root_rejected_before_any_write() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("not-mounted");
        let err = ensure_layout(&missing, DEVICE_LAYOUT).unwrap_err();
        assert!(matches!(err, Error::InvalidDeviceRoot { .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn test_file_as_root_rejected() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let err = ensure_layout(&file, DEVICE_LAYOUT).unwrap_err();
        assert!(matches!(err, Error::InvalidDeviceRoot { .. }));
    }
}
