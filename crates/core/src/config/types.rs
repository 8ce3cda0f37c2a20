use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub titles: TitlesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served as static files for any non-API path.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("views")
}

/// OMDb metadata provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    /// Provider API key (required). Empty means "not configured".
    #[serde(default)]
    pub api_key: String,
    /// Base URL; the client appends the `apikey` and `t` query parameters.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-lookup timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_timeout() -> u32 {
    10
}

/// Title list configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TitlesConfig {
    /// Newline-delimited file of titles to look up.
    #[serde(default = "default_titles_path")]
    pub path: PathBuf,
}

impl Default for TitlesConfig {
    fn default() -> Self {
        Self {
            path: default_titles_path(),
        }
    }
}

fn default_titles_path() -> PathBuf {
    PathBuf::from("movies.txt")
}

/// Fan-out configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Maximum number of lookups in flight at once.
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: default_max_concurrent_lookups(),
        }
    }
}

fn default_max_concurrent_lookups() -> usize {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub omdb: SanitizedOmdbConfig,
    pub titles: TitlesConfig,
    pub fetch: FetchConfig,
}

/// Sanitized OMDb config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOmdbConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            omdb: SanitizedOmdbConfig {
                base_url: config.omdb.base_url.clone(),
                api_key_configured: !config.omdb.api_key.is_empty(),
                timeout_secs: config.omdb.timeout_secs,
            },
            titles: config.titles.clone(),
            fetch: config.fetch.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
static_dir = "public"

[omdb]
api_key = "abc123"
base_url = "http://localhost:8081/"
timeout_secs = 5

[titles]
path = "/data/titles.txt"

[fetch]
max_concurrent_lookups = 4
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.server.static_dir.to_str().unwrap(), "public");
        assert_eq!(config.omdb.api_key, "abc123");
        assert_eq!(config.omdb.base_url, "http://localhost:8081/");
        assert_eq!(config.omdb.timeout_secs, 5);
        assert_eq!(config.titles.path.to_str().unwrap(), "/data/titles.txt");
        assert_eq!(config.fetch.max_concurrent_lookups, 4);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.server.static_dir.to_str().unwrap(), "views");
        assert!(config.omdb.api_key.is_empty());
        assert_eq!(config.omdb.base_url, "http://www.omdbapi.com/");
        assert_eq!(config.omdb.timeout_secs, 10);
        assert_eq!(config.titles.path.to_str().unwrap(), "movies.txt");
        assert_eq!(config.fetch.max_concurrent_lookups, 10);
    }

    #[test]
    fn test_deserialize_partial_omdb_section() {
        let toml = r#"
[omdb]
api_key = "key"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.omdb.api_key, "key");
        assert_eq!(config.omdb.timeout_secs, 10); // default
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let mut config = Config::default();
        config.omdb.api_key = "secret-key".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.omdb.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }

    #[test]
    fn test_sanitized_config_without_api_key() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.omdb.api_key_configured);
        assert_eq!(sanitized.fetch.max_concurrent_lookups, 10);
    }
}
