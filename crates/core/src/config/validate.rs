use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - OMDb API key is present
/// - OMDb base URL and timeout are usable
/// - Server port is not 0
/// - Fan-out allows at least one lookup in flight
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.omdb.api_key.trim().is_empty() {
        return Err(ConfigError::MissingApiKey);
    }

    if config.omdb.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "omdb.base_url cannot be empty".to_string(),
        ));
    }

    if config.omdb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "omdb.timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.fetch.max_concurrent_lookups == 0 {
        return Err(ConfigError::ValidationError(
            "fetch.max_concurrent_lookups must be at least 1".to_string(),
        ));
    }

    Ok(())
}
