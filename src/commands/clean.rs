//! `sdforge clean` - drop extracted directories and partial files from the
//! cache. Downloaded archives and the device root are never touched.

use std::fs;

use anyhow::{Context, Result};

use crate::{paths, ui};

pub fn run() -> Result<()> {
    let cache = paths::cache_dir()?;
    if !cache.is_dir() {
        ui::info("Cache is empty");
        return Ok(());
    }

    let mut removed = 0;
    let entries = fs::read_dir(&cache)
        .with_context(|| format!("Could not read {}", cache.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            // Extracted packages are re-creatable from their archives.
            fs::remove_dir_all(&path)
                .with_context(|| format!("Could not remove {}", path.display()))?;
            ui::dim(&format!("removed {}", entry.file_name().to_string_lossy()));
            removed += 1;
        } else if is_leftover(&path) {
            fs::remove_file(&path)
                .with_context(|| format!("Could not remove {}", path.display()))?;
            ui::dim(&format!("removed {}", entry.file_name().to_string_lossy()));
            removed += 1;
        }
    }

    ui::success(&format!("Cleanup complete, {removed} entries removed"));
    Ok(())
}

/// Partial downloads and interrupted extraction staging.
fn is_leftover(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "tmp" || ext == "partial")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_leftover_suffixes() {
        assert!(is_leftover(Path::new("luma3ds.tmp")));
        assert!(is_leftover(Path::new("godmode9.partial")));
        assert!(!is_leftover(Path::new("luma3ds.zip")));
        assert!(!is_leftover(Path::new("notes.txt")));
    }
}
