//! Cache directory resolution from environment signals.

use std::path::PathBuf;

use crate::config::EnvPaths;

/// Resolves the directory holding cached prebuild artifacts.
///
/// Precedence: the package manager's cache root (`npm_config_cache`) plus a
/// `_prebuilds` subdirectory, then the application-data directory
/// (`APPDATA`) plus `npm-cache/_prebuilds`, then `~/.npm/_prebuilds`.
///
/// The directory is not created here; writers create it lazily before the
/// first temp file lands.
#[must_use]
pub fn cache_dir(env_paths: &EnvPaths) -> PathBuf {
    if let Some(npm_cache) = &env_paths.npm_cache {
        return npm_cache.join("_prebuilds");
    }
    if let Some(app_data) = &env_paths.app_data {
        return app_data.join("npm-cache").join("_prebuilds");
    }
    env_paths
        .home
        .clone()
        .unwrap_or_default()
        .join(".npm")
        .join("_prebuilds")
}
