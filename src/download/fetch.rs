//! `fetch_to_cache`: the impure composition of URL resolution, cache
//! lookup, streaming fetch, and atomic commit.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use super::client::HttpClient;
use crate::cache::{TempFileGuard, cached_artifact_path};
use crate::config::ResolvedConfig;
use crate::error::PrebuildError;
use crate::template::resolve_download_url;

/// Fetches the configured artifact into the cache, returning the committed
/// cache file path.
///
/// A pre-existing file at the cache path is a hit and short-circuits the
/// fetch entirely. Note that hits are taken at face value: entries written
/// by this crate are only ever visible after a full atomic commit, so no
/// size or integrity check is applied (a zero-length file predating that
/// discipline would be served as-is; delete the entry to force a refetch).
///
/// On a miss, bytes stream into a process-unique temp file next to the
/// final path; the entry becomes visible only through the closing atomic
/// rename. Any fetch or write failure removes the temp file before the
/// error propagates, leaving the cache untouched.
///
/// # Errors
///
/// Returns [`PrebuildError::Config`] when no template resolves,
/// [`PrebuildError::Fetch`] for transport failures, and
/// [`PrebuildError::Filesystem`] when the cache path cannot be probed, the
/// cache directory created, or the commit rename performed.
#[instrument(skip(config, client), fields(package = %config.package_name))]
pub async fn fetch_to_cache(
    config: &ResolvedConfig,
    client: &HttpClient,
) -> Result<PathBuf, PrebuildError> {
    let url = resolve_download_url(config)?;
    let cache_path = cached_artifact_path(&url, &config.env_paths);

    let cached = tokio::fs::try_exists(&cache_path)
        .await
        .map_err(|e| PrebuildError::filesystem(cache_path.clone(), e))?;
    if cached {
        info!(path = %cache_path.display(), "cache hit, skipping download");
        return Ok(cache_path);
    }

    let cache_dir = cache_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    tokio::fs::create_dir_all(&cache_dir)
        .await
        .map_err(|e| PrebuildError::filesystem(cache_dir.clone(), e))?;

    debug!(url = %url, "cache miss, downloading");
    let guard = TempFileGuard::new(&cache_path);
    let bytes = client
        .download_to_path(&url, guard.path())
        .await
        .map_err(|source| PrebuildError::fetch(&url, source))?;

    guard
        .commit(&cache_path)
        .map_err(|e| PrebuildError::filesystem(cache_path.clone(), e))?;

    info!(url = %url, path = %cache_path.display(), bytes, "artifact cached");
    Ok(cache_path)
}
