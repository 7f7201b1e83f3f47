//! Single-pass `{token}` substitution.

use crate::config::ResolvedConfig;
use crate::version::{VersionParts, strip_scope};

/// Expands every recognized `{token}` in `template` from the configuration.
///
/// The scan is a single left-to-right pass: substituted values are never
/// re-scanned, so a token embedded in another token's value stays literal.
/// Unrecognized tokens pass through unchanged; recognized tokens always
/// resolve, possibly to the empty string (`{libc}` on glibc systems).
#[must_use]
pub fn expand(template: &str, config: &ResolvedConfig) -> String {
    let table = TokenTable::new(config);
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else {
            // Unterminated brace: emit the remainder literally.
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &tail[..close];
        match table.get(token) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Precomputed values for every recognized token.
struct TokenTable<'a> {
    name: &'a str,
    version: &'a str,
    parts: VersionParts,
    abi: &'a str,
    runtime: &'a str,
    platform: &'a str,
    arch: &'a str,
    libc: &'a str,
    configuration: &'static str,
    module_name: &'a str,
}

impl<'a> TokenTable<'a> {
    fn new(config: &'a ResolvedConfig) -> Self {
        let name = strip_scope(&config.package_name);
        Self {
            name,
            version: &config.package_version,
            parts: VersionParts::parse(&config.package_version),
            abi: &config.abi,
            runtime: &config.runtime,
            platform: &config.platform,
            arch: &config.arch,
            libc: &config.libc,
            configuration: if config.debug { "Debug" } else { "Release" },
            module_name: config
                .binary
                .as_ref()
                .and_then(|b| b.module_name.as_deref())
                .unwrap_or(name),
        }
    }

    fn get(&self, token: &str) -> Option<&str> {
        let value = match token {
            "name" | "package_name" => self.name,
            "version" => self.version,
            "major" => self.parts.major.as_str(),
            "minor" => self.parts.minor.as_str(),
            "patch" => self.parts.patch.as_str(),
            "prerelease" => self.parts.prerelease.as_str(),
            "build" => self.parts.build.as_str(),
            "abi" | "node_abi" => self.abi,
            "runtime" => self.runtime,
            "platform" => self.platform,
            "arch" => self.arch,
            "libc" => self.libc,
            "configuration" => self.configuration,
            "module_name" => self.module_name,
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BinaryMeta, DownloadOverride, EnvPaths};

    const EVERY_TOKEN: &str = "{name}-{package_name}-{version}-{major}-{minor}-{patch}-\
        {prerelease}-{abi}-{node_abi}-{platform}-{arch}-{configuration}-{module_name}";

    fn config(name: &str, version: &str, debug: bool) -> ResolvedConfig {
        ResolvedConfig {
            package_name: name.to_string(),
            package_version: version.to_string(),
            platform: "coolplatform".to_string(),
            arch: "futureplatform".to_string(),
            runtime: "node".to_string(),
            abi: "115".to_string(),
            libc: String::new(),
            debug,
            download: DownloadOverride::None,
            binary: Some(BinaryMeta {
                host: "https://foo.com".to_string(),
                remote_path: None,
                package_name: Some(EVERY_TOKEN.to_string()),
                module_name: Some("a-native-module-bindings".to_string()),
            }),
            repository_host: None,
            mirror_host: None,
            env_paths: EnvPaths::default(),
        }
    }

    #[test]
    fn test_expand_propagates_every_token() {
        let config = config("a-native-module", "x.y.z-alpha5", false);
        let url = expand(&format!("https://foo.com/{EVERY_TOKEN}"), &config);
        assert_eq!(
            url,
            "https://foo.com/a-native-module-a-native-module-x.y.z-alpha5-x-y-z-alpha5-\
             alpha5-115-115-coolplatform-futureplatform-Release-a-native-module-bindings"
        );
    }

    #[test]
    fn test_expand_build_metadata_and_debug_configuration() {
        let template = "{version}-{patch}-{build}-{configuration}";
        let config = config("a-native-module", "x.y.z+beta77", true);
        assert_eq!(
            expand(template, &config),
            "x.y.z+beta77-z+beta77-beta77-Debug"
        );
    }

    #[test]
    fn test_expand_scope_does_not_matter() {
        let scoped = config("@scope/a-native-module", "x.y.z+beta77", true);
        let unscoped = config("a-native-module", "x.y.z+beta77", true);
        let template = format!("https://foo.com/{EVERY_TOKEN}");
        assert_eq!(expand(&template, &scoped), expand(&template, &unscoped));
    }

    #[test]
    fn test_expand_libc_token_empty_on_glibc() {
        let config = config("m", "1.0.0", false);
        assert_eq!(expand("{platform}{libc}-{arch}", &config), "coolplatform-futureplatform");
    }

    #[test]
    fn test_expand_libc_token_with_musl() {
        let config = ResolvedConfig {
            libc: "musl".to_string(),
            ..config("m", "1.0.0", false)
        };
        assert_eq!(expand("{platform}{libc}", &config), "coolplatformmusl");
    }

    #[test]
    fn test_expand_module_name_falls_back_to_stripped_name() {
        let config = ResolvedConfig {
            binary: None,
            ..config("@scope/a-native-module", "1.0.0", false)
        };
        assert_eq!(expand("{module_name}", &config), "a-native-module");
    }

    #[test]
    fn test_expand_leaves_unknown_tokens_literal() {
        let config = config("m", "1.0.0", false);
        assert_eq!(
            expand("{name}/{something_else}", &config),
            "m/{something_else}"
        );
    }

    #[test]
    fn test_expand_is_single_pass_not_recursive() {
        // A token value containing brace syntax must not be re-expanded.
        let config = config("pkg{arch}name", "1.0.0", false);
        assert_eq!(expand("{name}", &config), "pkg{arch}name");
    }

    #[test]
    fn test_expand_unterminated_brace_passes_through() {
        let config = config("m", "1.0.0", false);
        assert_eq!(expand("{name}-{oops", &config), "m-{oops");
    }
}
