//! Restore manager: enumerate and select existing backup sets.
//!
//! Restoring a NAND backup is a guided manual operation on the console;
//! this component's contract ends at handing the caller a validated,
//! addressable backup set.

use std::fs;
use std::path::Path;

use crate::backup::{self, BackupSet, BACKUP_PREFIX};
use crate::error::{Error, Result};

/// List backup sets under `backups_root`, most recent first.
///
/// Sets are discovered purely from directory names matching the backup
/// naming pattern; anything malformed is skipped, not an error.
pub fn list_backup_sets(backups_root: &Path) -> Result<Vec<BackupSet>> {
    if !backups_root.is_dir() {
        return Ok(Vec::new());
    }

    let mut sets = Vec::new();
    let entries = fs::read_dir(backups_root).map_err(|e| Error::io(backups_root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(backups_root, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(id) = name.to_str().and_then(parse_backup_id) else {
            log::debug!("Skipping non-backup entry {:?}", name);
            continue;
        };
        sets.push(backup::record_backup_set(&entry.path(), &id)?);
    }

    // Ids are lexically sortable timestamps; newest first.
    sets.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(sets)
}

/// Select a backup set by list index.
pub fn select_backup_set(sets: &[BackupSet], index: usize) -> Result<&BackupSet> {
    sets.get(index).ok_or(Error::IndexOutOfRange {
        index,
        len: sets.len(),
    })
}

/// Parse a backup id out of a directory name, if it matches the pattern
/// `nand_backup_YYYYmmdd_HHMMSS`.
fn parse_backup_id(dir_name: &str) -> Option<String> {
    let id = dir_name.strip_prefix(BACKUP_PREFIX)?;
    let bytes = id.as_bytes();
    if bytes.len() != 15 || bytes[8] != b'_' {
        return None;
    }
    let digits_ok = id
        .char_indices()
        .all(|(i, c)| i == 8 || c.is_ascii_digit());
    digits_ok.then(|| id.to_string())
}
