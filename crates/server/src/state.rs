use std::path::Path;
use std::sync::Arc;

use cinefetch_core::{Config, FanOut, MetadataClient, SanitizedConfig, TitleSource};

/// Shared application state
pub struct AppState {
    config: Config,
    fan_out: FanOut,
    titles: Arc<dyn TitleSource>,
}

impl AppState {
    pub fn new(
        config: Config,
        client: Arc<dyn MetadataClient>,
        titles: Arc<dyn TitleSource>,
    ) -> Self {
        let fan_out = FanOut::new(client, config.fetch.max_concurrent_lookups);
        Self {
            config,
            fan_out,
            titles,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn fan_out(&self) -> &FanOut {
        &self.fan_out
    }

    pub fn titles(&self) -> &dyn TitleSource {
        self.titles.as_ref()
    }

    pub fn static_dir(&self) -> &Path {
        &self.config.server.static_dir
    }
}
