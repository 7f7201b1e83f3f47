//! Tarball extraction of fetched artifacts.
//!
//! Prebuild archives are gzipped tarballs; extraction runs on a blocking
//! thread since `tar`/`flate2` are synchronous. An extraction failure never
//! invalidates the cache entry it came from.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while unpacking an artifact.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The archive is not a readable gzipped tarball.
    #[error("corrupt archive {path}: {source}")]
    Corrupt {
        /// The archive that failed to unpack.
        path: PathBuf,
        /// The underlying decode error.
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error while reading the archive or writing entries.
    #[error("IO error extracting {path}: {source}")]
    Io {
        /// The archive being extracted.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Unpacks the gzipped tarball at `archive` into `dest`.
///
/// # Errors
///
/// Returns [`ExtractError::Corrupt`] for undecodable archive data and
/// [`ExtractError::Io`] for filesystem failures.
#[instrument]
pub async fn extract_tarball(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    let task_archive = archive.clone();
    tokio::task::spawn_blocking(move || extract_tarball_sync(&task_archive, &dest))
        .await
        .map_err(|e| ExtractError::Io {
            path: archive,
            source: std::io::Error::other(e),
        })?
}

fn extract_tarball_sync(archive: &Path, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive).map_err(|source| ExtractError::Io {
        path: archive.to_path_buf(),
        source,
    })?;
    let decoder = GzDecoder::new(file);
    let mut tarball = Archive::new(decoder);
    tarball.unpack(dest).map_err(|source| {
        // flate2 surfaces undecodable input as InvalidData / InvalidInput.
        if matches!(
            source.kind(),
            std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput
        ) {
            ExtractError::Corrupt {
                path: archive.to_path_buf(),
                source,
            }
        } else {
            ExtractError::Io {
                path: archive.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(archive = %archive.display(), dest = %dest.display(), "archive extracted");
    Ok(())
}
