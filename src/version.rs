//! Version and package-identifier string utilities.
//!
//! These helpers split a semantic-version-like string into the pieces that
//! URL templates can reference, and normalize package names that may carry
//! an npm scope prefix. Everything here is pure string manipulation.

/// Components of a version string as they appear in URL templates.
///
/// Segments are taken verbatim from the raw string, not validated as
/// numbers: the third dot-separated segment keeps any prerelease or build
/// suffix attached, matching how published prebuild URLs are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParts {
    /// First dot-separated segment.
    pub major: String,
    /// Second dot-separated segment.
    pub minor: String,
    /// Third dot-separated segment, including any `-pre` or `+build` tail.
    pub patch: String,
    /// Identifier after the first `-`, truncated at any `+`.
    pub prerelease: String,
    /// Identifier after the first `+`.
    pub build: String,
}

impl VersionParts {
    /// Splits a version string into template-addressable parts.
    ///
    /// Missing segments come back as empty strings so template expansion
    /// stays total for malformed or short versions.
    #[must_use]
    pub fn parse(version: &str) -> Self {
        let mut dotted = version.splitn(3, '.');
        let major = dotted.next().unwrap_or("").to_string();
        let minor = dotted.next().unwrap_or("").to_string();
        let patch = dotted.next().unwrap_or("").to_string();

        let prerelease = version
            .split_once('-')
            .map(|(_, rest)| rest.split('+').next().unwrap_or(""))
            .unwrap_or("")
            .to_string();
        let build = version
            .split_once('+')
            .map(|(_, rest)| rest)
            .unwrap_or("")
            .to_string();

        Self {
            major,
            minor,
            patch,
            prerelease,
            build,
        }
    }
}

/// Strips a leading `@scope/` prefix from a package name.
///
/// Scoped and unscoped spellings of the same package must resolve to
/// identical download URLs, so every name-derived token goes through this.
#[must_use]
pub fn strip_scope(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('@') {
        if let Some((_, unscoped)) = rest.split_once('/') {
            return unscoped;
        }
    }
    name
}

/// Maps a package name to an environment-variable-safe component.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`, the same mapping npm
/// applies when it turns config keys into `npm_config_*` variables.
#[must_use]
pub fn sanitize_env_component(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_version() {
        let parts = VersionParts::parse("1.4.0");
        assert_eq!(parts.major, "1");
        assert_eq!(parts.minor, "4");
        assert_eq!(parts.patch, "0");
        assert_eq!(parts.prerelease, "");
        assert_eq!(parts.build, "");
    }

    #[test]
    fn test_parse_prerelease_stays_attached_to_patch() {
        // Published prebuild URLs embed the full third segment verbatim.
        let parts = VersionParts::parse("x.y.z-alpha5");
        assert_eq!(parts.major, "x");
        assert_eq!(parts.minor, "y");
        assert_eq!(parts.patch, "z-alpha5");
        assert_eq!(parts.prerelease, "alpha5");
        assert_eq!(parts.build, "");
    }

    #[test]
    fn test_parse_build_metadata() {
        let parts = VersionParts::parse("x.y.z+beta77");
        assert_eq!(parts.patch, "z+beta77");
        assert_eq!(parts.prerelease, "");
        assert_eq!(parts.build, "beta77");
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let parts = VersionParts::parse("2.0.1-rc.1+build.5");
        assert_eq!(parts.prerelease, "rc.1");
        assert_eq!(parts.build, "build.5");
    }

    #[test]
    fn test_parse_short_version_yields_empty_segments() {
        let parts = VersionParts::parse("3");
        assert_eq!(parts.major, "3");
        assert_eq!(parts.minor, "");
        assert_eq!(parts.patch, "");
    }

    #[test]
    fn test_strip_scope() {
        assert_eq!(strip_scope("@scope/a-native-module"), "a-native-module");
        assert_eq!(strip_scope("a-native-module"), "a-native-module");
        assert_eq!(strip_scope("@just-a-scope"), "@just-a-scope");
    }

    #[test]
    fn test_sanitize_env_component() {
        assert_eq!(sanitize_env_component("prebuild-fetch"), "prebuild_fetch");
        assert_eq!(
            sanitize_env_component("@scope/pkg.name"),
            "_scope_pkg_name"
        );
    }
}
