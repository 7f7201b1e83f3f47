//! Download-URL templates: selection and placeholder expansion.
//!
//! A template is a URL string carrying `{token}` placeholders. Exactly one
//! template is selected per run from the layered configuration sources
//! ([`resolve_template`]), then expanded in a single substitution pass
//! ([`expand`]). [`resolve_download_url`] composes the two and is the pure
//! entry point the CLI calls.

mod expand;
mod resolver;

pub use expand::expand;
pub use resolver::{DEFAULT_PACKAGE_NAME_TEMPLATE, resolve_template};

use crate::config::{ConfigError, ResolvedConfig};

/// Resolves the concrete download URL for a configuration.
///
/// # Errors
///
/// Returns [`ConfigError::NoTemplate`] when no template source applies and
/// no repository host can be derived for the default.
pub fn resolve_download_url(config: &ResolvedConfig) -> Result<String, ConfigError> {
    let template = resolve_template(config)?;
    Ok(expand(&template, config))
}
