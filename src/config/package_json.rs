//! `package.json` manifest model for prebuild resolution.
//!
//! Only the fields the resolver cares about are modelled: package identity,
//! the optional `binary` distribution section, and the repository URL used
//! to derive the default GitHub releases host.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// The subset of `package.json` consumed by URL resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    /// Package name, possibly scoped (`@scope/name`).
    pub name: String,
    /// Package version string, verbatim.
    pub version: String,
    /// Binary distribution metadata (`binary` key), if declared.
    #[serde(default)]
    pub binary: Option<BinarySection>,
    /// Repository declaration, either a URL string or `{ "url": ... }`.
    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

/// The `binary` section of a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct BinarySection {
    /// Base host for downloads, e.g. `https://foo.com`.
    pub host: String,
    /// Optional path between host and file name.
    #[serde(default)]
    pub remote_path: Option<String>,
    /// Optional file-name template overriding the default pattern.
    #[serde(default)]
    pub package_name: Option<String>,
    /// Optional native module name used by the `{module_name}` token.
    #[serde(default)]
    pub module_name: Option<String>,
}

/// `repository` accepts both the string shorthand and the object form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    /// `"repository": "user/repo"` or a full URL.
    Url(String),
    /// `"repository": { "type": "git", "url": "..." }`.
    Object {
        /// The repository URL.
        url: String,
    },
}

impl RepositoryField {
    fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Object { url } => url,
        }
    }
}

impl PackageManifest {
    /// Reads and parses `package.json` from the given directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ManifestNotFound`] when the file is absent and
    /// [`ConfigError::ManifestParse`] when it cannot be deserialized.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("package.json");
        let raw = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::ManifestNotFound { path, source })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::ManifestParse {
            path: dir.join("package.json"),
            source,
        })
    }

    /// Derives the GitHub host prefix (`https://github.com/owner/repo`) from
    /// the repository declaration, for the default releases template.
    ///
    /// Accepted forms: `git+https://github.com/o/r.git`,
    /// `git://github.com/o/r.git`, `https://github.com/o/r`, `github:o/r`,
    /// and the `o/r` shorthand. Anything else yields `None`.
    #[must_use]
    pub fn github_release_host(&self) -> Option<String> {
        let raw = self.repository.as_ref()?.url().trim();
        let raw = raw.strip_prefix("git+").unwrap_or(raw);

        let owner_repo = if let Some(rest) = raw.strip_prefix("github:") {
            rest.to_string()
        } else if let Some(idx) = raw.find("github.com/") {
            raw[idx + "github.com/".len()..].to_string()
        } else if !raw.contains(':') && raw.matches('/').count() == 1 {
            // npm shorthand "owner/repo"
            raw.to_string()
        } else {
            return None;
        };

        let owner_repo = owner_repo
            .trim_end_matches('/')
            .trim_end_matches(".git")
            .to_string();
        let mut segments = owner_repo.splitn(2, '/');
        let owner = segments.next().filter(|s| !s.is_empty())?;
        let repo = segments.next().filter(|s| !s.is_empty())?;
        Some(format!("https://github.com/{owner}/{repo}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_with_repo(repo_json: &str) -> PackageManifest {
        let raw = format!(
            r#"{{"name": "leveldown", "version": "1.4.0", "repository": {repo_json}}}"#
        );
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_manifest_parses_binary_section() {
        let raw = r#"{
            "name": "@scope/a-native-module",
            "version": "1.2.3",
            "binary": {
                "host": "https://foo.com",
                "remote_path": "./prebuilds/",
                "module_name": "a-native-module-bindings"
            }
        }"#;
        let manifest: PackageManifest = serde_json::from_str(raw).unwrap();
        let binary = manifest.binary.unwrap();
        assert_eq!(binary.host, "https://foo.com");
        assert_eq!(binary.remote_path.as_deref(), Some("./prebuilds/"));
        assert_eq!(binary.package_name, None);
        assert_eq!(
            binary.module_name.as_deref(),
            Some("a-native-module-bindings")
        );
    }

    #[test]
    fn test_github_host_from_git_plus_https() {
        let m = manifest_with_repo(
            r#"{"type": "git", "url": "git+https://github.com/level/leveldown.git"}"#,
        );
        assert_eq!(
            m.github_release_host().as_deref(),
            Some("https://github.com/level/leveldown")
        );
    }

    #[test]
    fn test_github_host_from_git_protocol() {
        let m = manifest_with_repo(r#""git://github.com/level/leveldown.git""#);
        assert_eq!(
            m.github_release_host().as_deref(),
            Some("https://github.com/level/leveldown")
        );
    }

    #[test]
    fn test_github_host_from_shorthand_forms() {
        let m = manifest_with_repo(r#""level/leveldown""#);
        assert_eq!(
            m.github_release_host().as_deref(),
            Some("https://github.com/level/leveldown")
        );
        let m = manifest_with_repo(r#""github:level/leveldown""#);
        assert_eq!(
            m.github_release_host().as_deref(),
            Some("https://github.com/level/leveldown")
        );
    }

    #[test]
    fn test_non_github_repository_yields_none() {
        let m = manifest_with_repo(r#""https://gitlab.com/level/leveldown""#);
        assert_eq!(m.github_release_host(), None);
        let m = manifest_with_repo(r#""not a repo at all""#);
        assert_eq!(m.github_release_host(), None);
    }

    #[test]
    fn test_missing_repository_yields_none() {
        let raw = r#"{"name": "x", "version": "0.0.1"}"#;
        let m: PackageManifest = serde_json::from_str(raw).unwrap();
        assert_eq!(m.github_release_host(), None);
    }
}
