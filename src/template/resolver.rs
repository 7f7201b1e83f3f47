//! Template selection across the layered configuration sources.

use crate::config::{ConfigError, DownloadOverride, ResolvedConfig};

/// File-name pattern used when the manifest does not declare its own.
pub const DEFAULT_PACKAGE_NAME_TEMPLATE: &str =
    "{name}-v{version}-{runtime}-v{abi}-{platform}{libc}-{arch}.tar.gz";

/// Selects exactly one URL template for the configuration.
///
/// Precedence, highest first:
/// 1. An explicit `--download <template>` string, verbatim.
/// 2. A binary-host mirror from the environment: joined with a literal
///    `v{version}` segment and the default file-name pattern, ignoring any
///    declared `remote_path` or custom `package_name`.
/// 3. Declared `binary` metadata: host, optional `remote_path`, then the
///    declared file-name template or the default pattern.
/// 4. The package's GitHub releases path with the default pattern.
///
/// A bare `--download` (boolean `true`) selects nothing by itself; it falls
/// through to whichever of 2-4 applies.
///
/// # Errors
///
/// Returns [`ConfigError::NoTemplate`] when only the default branch remains
/// and no GitHub repository host could be derived from the manifest.
pub fn resolve_template(config: &ResolvedConfig) -> Result<String, ConfigError> {
    if let DownloadOverride::Template(template) = &config.download {
        return Ok(template.clone());
    }

    if let Some(mirror) = &config.mirror_host {
        return Ok(format!(
            "{}/v{{version}}/{DEFAULT_PACKAGE_NAME_TEMPLATE}",
            trim_segment(mirror)
        ));
    }

    if let Some(binary) = &config.binary {
        let segments = [
            Some(binary.host.as_str()),
            binary.remote_path.as_deref(),
            Some(
                binary
                    .package_name
                    .as_deref()
                    .unwrap_or(DEFAULT_PACKAGE_NAME_TEMPLATE),
            ),
        ];
        let joined: Vec<&str> = segments
            .into_iter()
            .flatten()
            .map(trim_segment)
            .filter(|s| !s.is_empty())
            .collect();
        return Ok(joined.join("/"));
    }

    let host = config
        .repository_host
        .as_deref()
        .ok_or_else(|| ConfigError::NoTemplate {
            package: config.package_name.clone(),
        })?;
    Ok(format!(
        "{host}/releases/download/v{{version}}/{DEFAULT_PACKAGE_NAME_TEMPLATE}"
    ))
}

/// Strips one leading `./` or `/` and one trailing `/` from a path segment.
fn trim_segment(segment: &str) -> &str {
    let segment = segment.strip_prefix("./").unwrap_or(segment);
    let segment = segment.strip_prefix('/').unwrap_or(segment);
    segment.strip_suffix('/').unwrap_or(segment)
}
