//! Backup manager: point-in-time capture of critical device files.
//!
//! A backup set is a timestamped directory under the backups root. The
//! actual NAND dump is a manual hardware step done on the console; this
//! component creates the destination, then validates and records which of
//! the critical files the user placed there. Source files are never moved
//! or deleted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Error, Result};
use crate::verify;

/// Critical files a NAND backup should contain.
pub const CRITICAL_FILES: &[&str] = &[
    "essential.exefs",
    "essential.app",
    "boot9.bin",
    "boot11.bin",
    "NAND MIN.bin",
];

/// Minimum number of critical files for a backup to count as a success.
pub const SUCCESS_THRESHOLD: usize = 3;

/// Directory-name prefix for backup sets.
pub const BACKUP_PREFIX: &str = "nand_backup_";

/// Timestamp format embedded in backup-set ids. Lexical order equals
/// creation order; second-level resolution, so two sets created within the
/// same second collide (documented limitation).
pub const ID_FORMAT: &str = "%Y%m%d_%H%M%S";

/// How complete a backup set is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStatus {
    /// At least [`SUCCESS_THRESHOLD`] critical files present.
    Success,
    /// Some critical files present, fewer than the threshold.
    Partial,
    /// No critical files at all.
    Failed,
}

impl BackupStatus {
    /// Status for a given number of present critical files.
    #[must_use]
    pub fn for_count(present: usize) -> Self {
        if present >= SUCCESS_THRESHOLD {
            Self::Success
        } else if present > 0 {
            Self::Partial
        } else {
            Self::Failed
        }
    }
}

/// One recorded backup set. Immutable once created; restore only reads it.
#[derive(Debug)]
pub struct BackupSet {
    /// Timestamp-derived id, unique per second, lexically sortable.
    pub id: String,
    /// Directory holding the captured files.
    pub directory: PathBuf,
    /// Critical files found in the directory.
    pub present: Vec<String>,
    /// Completeness per the critical-file thresholds.
    pub status: BackupStatus,
    /// Total size of everything under the directory.
    pub total_size: u64,
}

/// Generate a fresh backup id from the current local time.
pub fn new_backup_id() -> String {
    Local::now().format(ID_FORMAT).to_string()
}

/// Create the directory for a new backup set and return its path.
pub fn create_backup_dir(backups_root: &Path) -> Result<PathBuf> {
    let id = new_backup_id();
    let dir = backups_root.join(format!("{BACKUP_PREFIX}{id}"));
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(dir)
}

/// Scan a backup-set directory and record what is present.
///
/// The scan is non-recursive: critical files live directly in the set
/// directory. Extra files are counted in the size but not in the status.
pub fn record_backup_set(directory: &Path, id: &str) -> Result<BackupSet> {
    let present: Vec<String> = CRITICAL_FILES
        .iter()
        .filter(|name| directory.join(name).is_file())
        .map(ToString::to_string)
        .collect();

    let status = BackupStatus::for_count(present.len());
    let total_size = verify::dir_size(directory);

    log::info!(
        "Backup set {id}: {}/{} critical files, {:?}",
        present.len(),
        CRITICAL_FILES.len(),
        status
    );

    Ok(BackupSet {
        id: id.to_string(),
        directory: directory.to_path_buf(),
        present,
        status,
        total_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn place(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"data").unwrap();
        }
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(BackupStatus::for_count(0), BackupStatus::Failed);
        assert_eq!(BackupStatus::for_count(1), BackupStatus::Partial);
        assert_eq!(BackupStatus::for_count(2), BackupStatus::Partial);
        assert_eq!(BackupStatus::for_count(3), BackupStatus::Success);
        assert_eq!(BackupStatus::for_count(5), BackupStatus::Success);
    }

    #[test]
    fn test_record_with_two_files_is_partial() {
        let dir = TempDir::new().unwrap();
        place(dir.path(), &["boot9.bin", "boot11.bin"]);

        let set = record_backup_set(dir.path(), "20240101_010101").unwrap();
        assert_eq!(set.status, BackupStatus::Partial);
        assert_eq!(set.present, vec!["boot9.bin", "boot11.bin"]);
    }

    #[test]
    fn test_record_with_three_files_is_success() {
        let dir = TempDir::new().unwrap();
        place(dir.path(), &["essential.exefs", "boot9.bin", "NAND MIN.bin"]);

        let set = record_backup_set(dir.path(), "20240101_010101").unwrap();
        assert_eq!(set.status, BackupStatus::Success);
    }

    #[test]
    fn test_record_empty_is_failed() {
        let dir = TempDir::new().unwrap();
        let set = record_backup_set(dir.path(), "20240101_010101").unwrap();
        assert_eq!(set.status, BackupStatus::Failed);
        assert!(set.present.is_empty());
        assert_eq!(set.total_size, 0);
    }

    #[test]
    fn test_scan_is_non_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        place(&dir.path().join("nested"), &["boot9.bin", "boot11.bin", "essential.app"]);

        let set = record_backup_set(dir.path(), "20240101_010101").unwrap();
        // Nested files count toward size, not toward the allowlist.
        assert_eq!(set.status, BackupStatus::Failed);
        assert!(set.total_size > 0);
    }

    #[test]
    fn test_create_backup_dir_uses_prefix() {
        let root = TempDir::new().unwrap();
        let dir = create_backup_dir(root.path()).unwrap();
        assert!(dir.is_dir());
        let name = dir.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(BACKUP_PREFIX));
        // Prefix + yyyymmdd_hhmmss.
        assert_eq!(name.len(), BACKUP_PREFIX.len() + 15);
    }

    #[test]
    fn test_backup_never_deletes_sources() {
        let dir = TempDir::new().unwrap();
        place(dir.path(), &["boot9.bin"]);
        record_backup_set(dir.path(), "20240101_010101").unwrap();
        assert!(dir.path().join("boot9.bin").is_file());
    }
}
