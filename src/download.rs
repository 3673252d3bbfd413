//! Download manager: fetches mirror artifacts into the local cache.
//!
//! Downloads are streamed in fixed-size chunks with a progress bar when the
//! server reports a total size. There is no resume support: a previously
//! interrupted download restarts from zero, truncating the old partial file.
//! Archives are handed to the extractor before `fetch` returns.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::archive::{self, ExtractedPackage};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ui;

/// Streaming chunk size.
const CHUNK_SIZE: usize = 8192;

/// Maximum download size (512 MB covers every supported artifact).
const MAX_BODY_SIZE: u64 = 512 * 1024 * 1024;

/// Lifecycle of one download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// Created, no bytes transferred yet.
    Pending,
    /// Body is being streamed.
    InProgress,
    /// Fully written to the cache.
    Complete,
    /// Aborted by a network or IO failure.
    Failed,
}

/// One artifact fetched (or being fetched) from a mirror.
#[derive(Debug)]
pub struct DownloadArtifact {
    /// Catalog key.
    pub key: String,
    /// Source URL.
    pub url: String,
    /// Cache file the body is written to.
    pub local_path: PathBuf,
    /// Size reported by the size probe, if any.
    pub total_size: Option<u64>,
    /// Bytes written so far.
    pub bytes_written: u64,
    /// Current lifecycle state.
    pub status: DownloadStatus,
    /// Extraction result, when the artifact was an archive.
    pub extracted: Option<ExtractedPackage>,
}

impl DownloadArtifact {
    fn new(key: &str, url: &str, local_path: PathBuf) -> Self {
        Self {
            key: key.to_string(),
            url: url.to_string(),
            local_path,
            total_size: None,
            bytes_written: 0,
            status: DownloadStatus::Pending,
            extracted: None,
        }
    }

    /// Whether the cache filename marks this artifact as an archive.
    pub fn is_archive(&self) -> bool {
        has_archive_suffix(&self.local_path)
    }
}

/// Whether a cache path carries an archive suffix.
pub fn has_archive_suffix(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Blocking downloader writing into one cache directory.
pub struct Downloader {
    agent: ureq::Agent,
    cache_dir: PathBuf,
}

impl Downloader {
    /// Create a downloader for a cache directory.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Fetch one artifact into the cache.
    ///
    /// The cache filename is derived solely from the catalog key. On
    /// completion of a `.zip` artifact the extractor runs synchronously and
    /// its result is recorded on the returned artifact.
    pub fn fetch(&self, key: &str, url: &str) -> Result<DownloadArtifact> {
        let local_path = self.cache_dir.join(Config::artifact_filename(key));
        let mut artifact = DownloadArtifact::new(key, url, local_path);

        artifact.total_size = self.probe_size(url);
        artifact.status = DownloadStatus::InProgress;

        if let Err(err) = self.stream_body(&mut artifact) {
            artifact.status = DownloadStatus::Failed;
            log::error!("Download of {key} failed: {err}");
            return Err(err);
        }
        artifact.status = DownloadStatus::Complete;
        log::info!(
            "Downloaded {key} ({} bytes) to {}",
            artifact.bytes_written,
            artifact.local_path.display()
        );

        if artifact.is_archive() {
            artifact.extracted = Some(archive::extract(&artifact.local_path)?);
        }

        Ok(artifact)
    }

    /// Best-effort HEAD probe for the content length.
    ///
    /// Absence of a reported size is not an error.
    fn probe_size(&self, url: &str) -> Option<u64> {
        let response = self.agent.head(url).call().ok()?;
        response
            .headers()
            .get("content-length")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    /// Stream the body into the cache file, truncating any prior partial.
    fn stream_body(&self, artifact: &mut DownloadArtifact) -> Result<()> {
        let mut response = self
            .agent
            .get(&artifact.url)
            .header("User-Agent", "sdforge")
            .call()
            .map_err(|err| map_ureq_error(&artifact.url, err))?;

        let mut reader = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .reader();

        let mut file = fs::File::create(&artifact.local_path)
            .map_err(|e| Error::io(&artifact.local_path, e))?;

        let pb = progress_bar(&artifact.key, artifact.total_size);
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            let read = reader
                .read(&mut chunk)
                .map_err(|e| Error::network(&artifact.url, e.to_string(), None))?;
            if read == 0 {
                break;
            }
            file.write_all(&chunk[..read])
                .map_err(|e| Error::io(&artifact.local_path, e))?;
            artifact.bytes_written += read as u64;
            pb.inc(read as u64);
        }
        pb.finish_and_clear();

        Ok(())
    }
}

fn progress_bar(key: &str, total_size: Option<u64>) -> ProgressBar {
    let pb = match total_size {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
                    .unwrap()
                    .progress_chars("=>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {bytes} {msg}")
                    .unwrap(),
            );
            pb
        }
    };
    pb.set_message(ui::truncate_path(key, 40));
    pb
}

fn map_ureq_error(url: &str, err: ureq::Error) -> Error {
    match err {
        ureq::Error::StatusCode(code) => {
            Error::network(url, format!("HTTP {code}"), Some(code))
        }
        other => Error::network(url, other.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_suffix() {
        assert!(has_archive_suffix(Path::new("luma3ds.zip")));
        assert!(has_archive_suffix(Path::new("luma3ds.ZIP")));
        assert!(!has_archive_suffix(Path::new("Checkpoint.cia")));
        assert!(!has_archive_suffix(Path::new("boot9")));
    }

    #[test]
    fn test_artifact_path_derived_from_key() {
        let downloader = Downloader::new("/tmp/cache");
        let artifact = DownloadArtifact::new(
            "luma3ds",
            "https://example.com/whatever-the-server-calls-it.bin",
            downloader.cache_dir.join(Config::artifact_filename("luma3ds")),
        );
        assert_eq!(artifact.local_path, PathBuf::from("/tmp/cache/luma3ds.zip"));
        assert!(artifact.is_archive());
        assert_eq!(artifact.status, DownloadStatus::Pending);
        assert_eq!(artifact.bytes_written, 0);
    }

    #[test]
    fn test_status_code_maps_to_network_error() {
        let err = map_ureq_error("https://x/a.zip", ureq::Error::StatusCode(503));
        match err {
            Error::Network { status, url, .. } => {
                assert_eq!(status, Some(503));
                assert_eq!(url, "https://x/a.zip");
            }
            _ => panic!("expected Error::Network"),
        }
    }
}
