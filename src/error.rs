//! Crate-level error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::download::FetchError;
use crate::extract::ExtractError;

/// Failures surfaced by the fetch-and-install flow.
///
/// Every variant carries the URL or path it concerns; nothing is swallowed
/// or retried at this level.
#[derive(Debug, Error)]
pub enum PrebuildError {
    /// No usable template or manifest; a caller error, fatal.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Network, HTTP status, or stream-write failure. The orphaned temp
    /// file has already been removed when this propagates.
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        /// The resolved download URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: FetchError,
    },

    /// Cache directory or commit rename could not be performed.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        /// The path that could not be created or renamed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Extraction failed; the cache entry itself remains valid.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl PrebuildError {
    /// Creates a fetch error with its URL context.
    pub fn fetch(url: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Creates a filesystem error with its path context.
    pub fn filesystem(path: PathBuf, source: std::io::Error) -> Self {
        Self::Filesystem { path, source }
    }
}
