//! Error types for the provisioning pipeline.
//!
//! Each pipeline operation surfaces a tagged error kind so callers can
//! decide whether to continue or abort instead of swallowing failures.

use std::io;
use std::path::PathBuf;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during provisioning operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection failure, timeout, or non-success HTTP status.
    #[error("network error for {url}: {message}")]
    Network {
        /// URL being fetched.
        url: String,
        /// Error message.
        message: String,
        /// HTTP status code if one was received.
        status: Option<u16>,
    },

    /// Archive failed structural validation or could not be unpacked.
    #[error("corrupt archive {path}: {message}")]
    CorruptArchive {
        /// Path to the offending archive.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Device root is missing or not writable.
    #[error("invalid device root {path}: {reason}")]
    InvalidDeviceRoot {
        /// Configured device root.
        path: PathBuf,
        /// Why the root was rejected.
        reason: String,
    },

    /// No candidate source found for a placement rule.
    #[error("no cached source found for {0}")]
    MissingArtifact(String),

    /// Backup selection index outside the valid range.
    #[error("selection {index} out of range (0..{len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of available entries.
        len: usize,
    },

    /// No artifact with this key in the mirror catalog.
    #[error("unknown artifact key: {0}")]
    UnknownArtifact(String),

    /// IO error during file operations.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path involved in the error.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a network error for a URL.
    pub fn network(url: impl Into<String>, message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
            status,
        }
    }

    /// Create a corrupt-archive error.
    pub fn corrupt(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptArchive {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display() {
        let err = Error::network("https://example.com/a.zip", "HTTP 404", Some(404));
        let display = format!("{err}");
        assert!(display.contains("https://example.com/a.zip"));
        assert!(display.contains("404"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = Error::IndexOutOfRange { index: 5, len: 2 };
        let display = format!("{err}");
        assert!(display.contains('5'));
        assert!(display.contains('2'));
    }

    #[test]
    fn test_io_constructor() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = Error::io("/mnt/sd", io_err);
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/mnt/sd")),
            _ => panic!("expected Error::Io"),
        }
    }

    #[test]
    fn test_corrupt_constructor() {
        let err = Error::corrupt("/cache/a.zip", "bad central directory");
        assert!(format!("{err}").contains("a.zip"));
    }
}
