//! Archive extraction into the download cache.
//!
//! Archives are unpacked into a cache subdirectory named after the archive's
//! base name. Extraction is staged into a `.partial` sibling and swapped in
//! only once the whole archive has been written, so a failed extraction
//! never leaves a half-populated target behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Result of unpacking one archive.
#[derive(Debug)]
pub struct ExtractedPackage {
    /// Path of the archive that was unpacked.
    pub source: PathBuf,
    /// Directory the entries were written to.
    pub target_dir: PathBuf,
    /// Entry names, in archive order.
    pub files: Vec<String>,
}

/// Unpack `archive_path` into a sibling directory named after its base name.
///
/// The archive is structurally validated before anything is written;
/// a malformed archive fails with [`Error::CorruptArchive`]. Re-extracting
/// the same archive replaces the previous target directory wholesale.
pub fn extract(archive_path: &Path) -> Result<ExtractedPackage> {
    let target_dir = target_dir_for(archive_path)?;
    let staging = staging_dir_for(&target_dir);

    let file = fs::File::open(archive_path).map_err(|e| Error::io(archive_path, e))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| Error::corrupt(archive_path, e.to_string()))?;
    let files: Vec<String> = archive.file_names().map(ToString::to_string).collect();

    // Stale staging from an interrupted run.
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;
    }
    fs::create_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;

    if let Err(err) = archive.extract(&staging) {
        // Leave no partial output on failure.
        let _ = fs::remove_dir_all(&staging);
        return Err(Error::corrupt(archive_path, err.to_string()));
    }

    if target_dir.exists() {
        fs::remove_dir_all(&target_dir).map_err(|e| Error::io(&target_dir, e))?;
    }
    fs::rename(&staging, &target_dir).map_err(|e| Error::io(&target_dir, e))?;

    log::info!(
        "Extracted {} entries from {} into {}",
        files.len(),
        archive_path.display(),
        target_dir.display()
    );

    Ok(ExtractedPackage {
        source: archive_path.to_path_buf(),
        target_dir,
        files,
    })
}

/// Target directory: the archive's base name, next to the archive.
fn target_dir_for(archive_path: &Path) -> Result<PathBuf> {
    let stem = archive_path.file_stem().ok_or_else(|| {
        Error::corrupt(archive_path, "archive has no base name".to_string())
    })?;
    let parent = archive_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(stem))
}

fn staging_dir_for(target_dir: &Path) -> PathBuf {
    let mut name = target_dir.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_creates_named_target() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("luma3ds.zip");
        write_zip(&archive, &[("boot.firm", b"firm bytes")]);

        let package = extract(&archive).unwrap();
        assert_eq!(package.target_dir, dir.path().join("luma3ds"));
        assert_eq!(package.files, vec!["boot.firm".to_string()]);
        assert_eq!(
            fs::read(package.target_dir.join("boot.firm")).unwrap(),
            b"firm bytes"
        );
    }

    #[test]
    fn test_extract_nested_entries() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("godmode9.zip");
        write_zip(
            &archive,
            &[
                ("GodMode9.firm", b"payload"),
                ("gm9/scripts/setup.gm9", b"script"),
            ],
        );

        let package = extract(&archive).unwrap();
        assert!(package.target_dir.join("gm9/scripts/setup.gm9").exists());
    }

    #[test]
    fn test_corrupt_archive_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let err = extract(&archive).unwrap_err();
        assert!(matches!(err, Error::CorruptArchive { .. }));
        assert!(!dir.path().join("broken").exists());
        assert!(!dir.path().join("broken.partial").exists());
    }

    #[test]
    fn test_re_extract_overwrites_target() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("fbi.zip");

        write_zip(&archive, &[("old.cia", b"v1")]);
        extract(&archive).unwrap();
        assert!(dir.path().join("fbi/old.cia").exists());

        write_zip(&archive, &[("FBI.cia", b"v2")]);
        let package = extract(&archive).unwrap();
        assert!(package.target_dir.join("FBI.cia").exists());
        // Previous contents are gone, not merged.
        assert!(!package.target_dir.join("old.cia").exists());
    }
}
