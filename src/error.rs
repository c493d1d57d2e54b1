//! Error types for loading the registry and answering lookups.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::oui::Oui;

/// Failure while acquiring the raw registry text.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to download {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to download {url}; server responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The connection failed while the response body was being streamed.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from the load pipeline. Every variant is fatal to startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// I/O failure while reading the raw registry or writing the cache it produces.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file exists but is structurally invalid.
    #[error("corrupt cache {} at line {line}: {reason}", path.display())]
    CacheFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("failed to read cache {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stale cache or raw download could not be deleted.
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-query errors. Both are expected outcomes, never process faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("invalid hardware address: {0:?}")]
    InvalidAddress(String),

    #[error("no vendor registered for prefix {0}")]
    NotFound(Oui),
}
