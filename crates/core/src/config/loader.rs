use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides, e.g. `CINEFETCH_SERVER__PORT`.
const ENV_PREFIX: &str = "CINEFETCH_";

/// Variables holding the OMDb key, lowest precedence first.
const API_KEY_VARS: [&str; 2] = ["API_KEY", "CINEFETCH_OMDB__API_KEY"];

/// Load configuration from file with environment variable overrides.
///
/// The file must exist.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::new().merge(Toml::file(path)))
}

/// Load configuration from `path` if it exists, otherwise from the
/// environment alone.
pub fn load_config_or_env(path: &Path) -> Result<Config, ConfigError> {
    let figment = if path.exists() {
        Figment::new().merge(Toml::file(path))
    } else {
        Figment::new()
    };

    extract(figment)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    let mut figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    // Keys are opaque strings: an all-digit key must not be parsed as a number
    for var in API_KEY_VARS {
        if let Ok(key) = std::env::var(var) {
            figment = figment.merge(Serialized::default("omdb.api_key", key));
        }
    }

    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
