//! Prebuild Fetch Core Library
//!
//! This library resolves, fetches, and caches prebuilt binary artifacts for
//! native npm-style packages, so installs can skip the local compilation
//! step when a matching artifact exists for the target runtime, ABI,
//! platform, architecture, and build configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - One-shot resolution of an immutable run configuration
//! - [`template`] - Download-URL template selection and expansion
//! - [`cache`] - URL-keyed artifact cache with atomic commit semantics
//! - [`download`] - Streaming HTTP transport and `fetch_to_cache`
//! - [`extract`] - Tarball extraction of fetched artifacts
//! - [`version`] - Version and package-identifier string utilities
//!
//! The two public entry points are [`resolve_download_url`] (pure) and
//! [`fetch_to_cache`] (performs the network and filesystem side effects).
//!
//! Artifacts are cached by URL, not package identity, and entries become
//! visible only through an atomic temp-file-then-rename commit, so
//! concurrent installs sharing one cache directory never observe a partial
//! download. Downloaded artifacts are not checksum- or signature-verified
//! before extraction; that gap is inherited deliberately from the system
//! this replaces.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod template;
pub mod version;

// Re-export commonly used types
pub use cache::{TempFileGuard, cache_dir, cached_artifact_path, temp_file_path};
pub use config::{
    BinaryMeta, ConfigError, DownloadOverride, EnvPaths, Overrides, PackageManifest, ProcessEnv,
    ResolvedConfig,
};
pub use download::{FetchError, HttpClient, fetch_to_cache};
pub use error::PrebuildError;
pub use extract::{ExtractError, extract_tarball};
pub use template::{DEFAULT_PACKAGE_NAME_TEMPLATE, expand, resolve_download_url, resolve_template};
pub use version::{VersionParts, strip_scope};
