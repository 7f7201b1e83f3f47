//! Configuration resolution: one immutable [`ResolvedConfig`] per run.
//!
//! All environment access happens here, once, at load time. The rest of the
//! crate receives the resolved value by reference and never touches
//! `std::env`, which keeps URL resolution and cache mapping deterministic
//! and directly testable.

mod package_json;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::version::sanitize_env_component;

pub use package_json::{BinarySection, PackageManifest, RepositoryField};

/// ABI identifier assumed when neither CLI nor environment supplies one.
///
/// Matches the Node.js LTS line current at release time; callers targeting
/// another runtime version pass `--abi` explicitly.
pub const DEFAULT_NODE_ABI: &str = "115";

/// Runtime identifier assumed when none is supplied.
pub const DEFAULT_RUNTIME: &str = "node";

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `package.json` in the working directory.
    #[error("no package.json found at {path}: {source}")]
    ManifestNotFound {
        /// Path that was probed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// `package.json` exists but could not be deserialized.
    #[error("invalid package.json at {path}: {source}")]
    ManifestParse {
        /// Path of the offending manifest.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// No download template could be resolved: no override, no binary
    /// metadata, and no recognizable repository host to fall back to.
    #[error(
        "cannot resolve a download URL for {package}: no --download override, \
         no binary field in package.json, and no GitHub repository to default to"
    )]
    NoTemplate {
        /// The package that failed to resolve.
        package: String,
    },
}

/// The `--download` flag, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DownloadOverride {
    /// Flag absent (or explicitly `false`): no override.
    #[default]
    None,
    /// Bare flag or literal `true`: prefer declared metadata, else default.
    Enabled,
    /// Explicit template string, used verbatim.
    Template(String),
}

impl DownloadOverride {
    /// Normalizes the raw CLI value. An outer `None` means the flag was not
    /// given; an inner `None` means it was given without a value.
    #[must_use]
    pub fn from_cli(raw: Option<Option<String>>) -> Self {
        match raw {
            None => Self::None,
            Some(None) => Self::Enabled,
            Some(Some(value)) => match value.as_str() {
                "" | "false" => Self::None,
                "true" => Self::Enabled,
                _ => Self::Template(value),
            },
        }
    }
}

/// Package-declared binary distribution metadata, normalized from the
/// manifest's `binary` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryMeta {
    /// Download host.
    pub host: String,
    /// Optional path segment between host and file name.
    pub remote_path: Option<String>,
    /// Optional file-name template.
    pub package_name: Option<String>,
    /// Optional native module name.
    pub module_name: Option<String>,
}

/// Environment signals the cache locator consumes, snapshotted at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvPaths {
    /// `npm_config_cache`: the package manager's cache root.
    pub npm_cache: Option<PathBuf>,
    /// `APPDATA`: Windows application-data directory.
    pub app_data: Option<PathBuf>,
    /// The user's home directory.
    pub home: Option<PathBuf>,
}

/// A snapshot of the process environment taken once per run.
///
/// Tests build one from an explicit map instead of mutating global state.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
}

impl ProcessEnv {
    /// Captures the live process environment and home directory.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
            home: dirs::home_dir(),
        }
    }

    /// Builds a snapshot from explicit values.
    #[must_use]
    pub fn from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            vars: vars.into_iter().collect(),
            home,
        }
    }

    /// Looks up a variable in the snapshot.
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn env_paths(&self) -> EnvPaths {
        EnvPaths {
            npm_cache: self.var("npm_config_cache").map(PathBuf::from),
            app_data: self.var("APPDATA").map(PathBuf::from),
            home: self.home.clone(),
        }
    }

    /// Resolves the binary-host mirror override for a package, checking the
    /// plain variable before its `_mirror` variant.
    fn mirror_host(&self, package_name: &str) -> Option<String> {
        let key = format!(
            "npm_config_{}_binary_host",
            sanitize_env_component(package_name)
        );
        self.var(&key)
            .or_else(|| self.var(&format!("{key}_mirror")))
            .map(ToString::to_string)
    }
}

/// Explicit overrides from the CLI layer, all optional.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Target platform identifier.
    pub platform: Option<String>,
    /// Target architecture identifier.
    pub arch: Option<String>,
    /// Target runtime identifier.
    pub runtime: Option<String>,
    /// Target ABI identifier.
    pub abi: Option<String>,
    /// Libc discriminator (e.g. `musl`).
    pub libc: Option<String>,
    /// Select the Debug build configuration.
    pub debug: bool,
    /// The normalized `--download` flag.
    pub download: DownloadOverride,
}

/// Fully-resolved, immutable configuration for one run.
///
/// Built once by [`ResolvedConfig::resolve`] and passed by reference into
/// every subsystem function.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Package name, possibly scoped.
    pub package_name: String,
    /// Package version, verbatim.
    pub package_version: String,
    /// Target platform identifier (`linux`, `darwin`, `win32`, ...).
    pub platform: String,
    /// Target architecture identifier (`x64`, `arm64`, ...).
    pub arch: String,
    /// Target runtime identifier.
    pub runtime: String,
    /// Target ABI identifier.
    pub abi: String,
    /// Libc discriminator suffix; empty on default glibc systems.
    pub libc: String,
    /// Debug vs Release build configuration.
    pub debug: bool,
    /// The `--download` override.
    pub download: DownloadOverride,
    /// Declared binary distribution metadata.
    pub binary: Option<BinaryMeta>,
    /// GitHub host prefix derived from the repository field.
    pub repository_host: Option<String>,
    /// Mirror host from `npm_config_<pkg>_binary_host[_mirror]`.
    pub mirror_host: Option<String>,
    /// Cache-locator environment signals.
    pub env_paths: EnvPaths,
}

impl ResolvedConfig {
    /// Resolves configuration from the manifest, CLI overrides, and an
    /// environment snapshot. Precedence per field: CLI > `npm_config_*`
    /// environment > manifest > built-in default.
    #[must_use]
    pub fn resolve(manifest: &PackageManifest, overrides: Overrides, env: &ProcessEnv) -> Self {
        let pick = |cli: Option<String>, env_key: &str, default: &str| {
            cli.or_else(|| env.var(env_key).map(ToString::to_string))
                .unwrap_or_else(|| default.to_string())
        };

        let platform = pick(
            overrides.platform,
            "npm_config_platform",
            default_platform(),
        );
        let arch = pick(overrides.arch, "npm_config_arch", default_arch());
        let runtime = pick(overrides.runtime, "npm_config_runtime", DEFAULT_RUNTIME);
        let abi = pick(overrides.abi, "npm_config_abi", DEFAULT_NODE_ABI);
        let libc = pick(overrides.libc, "LIBC", "");

        // CLI wins; an npm_config_download value fills in when the flag is
        // absent, same as the other npm_config_* fallbacks.
        let download = match overrides.download {
            DownloadOverride::None => DownloadOverride::from_cli(
                env.var("npm_config_download").map(|v| Some(v.to_string())),
            ),
            explicit => explicit,
        };

        let binary = manifest.binary.as_ref().map(|section| BinaryMeta {
            host: section.host.clone(),
            remote_path: section.remote_path.clone(),
            package_name: section.package_name.clone(),
            module_name: section.module_name.clone(),
        });

        Self {
            package_name: manifest.name.clone(),
            package_version: manifest.version.clone(),
            platform,
            arch,
            runtime,
            abi,
            libc,
            debug: overrides.debug || env.var("npm_config_debug") == Some("true"),
            download,
            binary,
            repository_host: manifest.github_release_host(),
            mirror_host: env.mirror_host(&manifest.name),
            env_paths: env.env_paths(),
        }
    }
}

/// Node-style platform identifier for the host.
fn default_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

/// Node-style architecture identifier for the host.
fn default_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        other => other,
    }
}
