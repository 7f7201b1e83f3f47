//! URL to cache-file-name mapping.

use std::path::PathBuf;

use crate::config::EnvPaths;

use super::locator::cache_dir;

/// Maps a resolved download URL to its cache file path.
///
/// Every run of characters outside `[A-Za-z0-9.]` collapses to a single
/// `-`, so `https://host/a/b.tar.gz` stays visually traceable as
/// `https-host-a-b.tar.gz`. The mapping is pure and case-sensitive: the
/// same URL always yields the same path, and URLs differing only in scheme
/// yield distinct paths.
#[must_use]
pub fn cached_artifact_path(url: &str, env_paths: &EnvPaths) -> PathBuf {
    cache_dir(env_paths).join(sanitize_url(url))
}

fn sanitize_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut prev_dash = false;
    for ch in url.chars() {
        if ch.is_ascii_alphanumeric() || ch == '.' {
            out.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    out
}
