//! Integrity verifier: size and hash facts for user-facing sanity checks.
//!
//! The hash is for human comparison only. It carries no trust: a matching
//! hash says the bytes are what you already have elsewhere, nothing more.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Read buffer for hashing.
const HASH_BUF_SIZE: usize = 64 * 1024;

/// Facts about one file, derived from current filesystem state.
#[derive(Debug)]
pub struct VerificationResult {
    /// Path that was checked.
    pub path: PathBuf,
    /// Whether the path exists as a regular file.
    pub exists: bool,
    /// Actual size in bytes; zero when the file is missing.
    pub size_bytes: u64,
    /// Whether the actual size matched the expected size, when one was given.
    pub size_ok: Option<bool>,
    /// BLAKE3 hex digest of the full content, when requested.
    pub content_hash: Option<String>,
}

/// Report size and (optionally) hash facts about `path`.
///
/// A missing file is not an error: `exists` is false and the remaining
/// fields are zero/absent. A size mismatch is flagged, never raised; the
/// caller decides whether to warn or abort.
pub fn verify(path: &Path, expected_size: Option<u64>, with_hash: bool) -> Result<VerificationResult> {
    if !path.is_file() {
        return Ok(VerificationResult {
            path: path.to_path_buf(),
            exists: false,
            size_bytes: 0,
            size_ok: None,
            content_hash: None,
        });
    }

    let size_bytes = fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
    let size_ok = expected_size.map(|expected| expected == size_bytes);
    let content_hash = if with_hash {
        Some(hash_file(path)?)
    } else {
        None
    };

    Ok(VerificationResult {
        path: path.to_path_buf(),
        exists: true,
        size_bytes,
        size_ok,
        content_hash,
    })
}

/// BLAKE3 hex digest over the whole file, streamed.
fn hash_file(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; HASH_BUF_SIZE];
    loop {
        let read = file.read(&mut buf).map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Total size of a directory tree, for backup reporting.
pub fn dir_size(root: &Path) -> u64 {
    walkdir::WalkDir::new(root)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.metadata().ok())
        .filter(std::fs::Metadata::is_file)
        .map(|meta| meta.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reports_absent() {
        let dir = TempDir::new().unwrap();
        let result = verify(&dir.path().join("movable.sed"), Some(320), true).unwrap();
        assert!(!result.exists);
        assert_eq!(result.size_bytes, 0);
        assert!(result.size_ok.is_none());
        assert!(result.content_hash.is_none());
    }

    #[test]
    fn test_exact_size_matches() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movable.sed");
        fs::write(&path, vec![0u8; 320]).unwrap();

        let result = verify(&path, Some(320), false).unwrap();
        assert!(result.exists);
        assert_eq!(result.size_bytes, 320);
        assert_eq!(result.size_ok, Some(true));
    }

    #[test]
    fn test_size_mismatch_flagged_not_raised() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movable.sed");
        fs::write(&path, vec![0u8; 319]).unwrap();

        let result = verify(&path, Some(320), false).unwrap();
        assert_eq!(result.size_ok, Some(false));
    }

    #[test]
    fn test_hash_only_when_requested() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boot.firm");
        fs::write(&path, b"firmware").unwrap();

        let without = verify(&path, None, false).unwrap();
        assert!(without.content_hash.is_none());

        let with = verify(&path, None, true).unwrap();
        let hash = with.content_hash.unwrap();
        assert_eq!(hash, blake3::hash(b"firmware").to_hex().to_string());
    }

    #[test]
    fn test_dir_size_aggregates_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 100]).unwrap();
        fs::write(dir.path().join("sub/b.bin"), vec![0u8; 50]).unwrap();

        assert_eq!(dir_size(dir.path()), 150);
    }
}
