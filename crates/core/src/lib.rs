pub mod config;
pub mod fanout;
pub mod metadata;
pub mod metrics;
pub mod testing;
pub mod titles;

pub use config::{
    load_config, load_config_from_str, load_config_or_env, validate_config, Config, ConfigError,
    FetchConfig, OmdbConfig, SanitizedConfig, ServerConfig, TitlesConfig,
};
pub use fanout::{aggregate_all, Aggregate, FanOut, Permit, PermitPool, DEFAULT_CAPACITY};
pub use metadata::{
    classify, Classified, LookupError, LookupFailure, MetadataClient, MetadataClientError,
    MovieRecord, OmdbClient,
};
pub use titles::{FileTitleSource, StaticTitleSource, TitleSource, TitleSourceError};
