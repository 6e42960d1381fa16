//! Builds a presence client per access token.

use std::sync::Arc;

use bridge_common::GraphSettings;
use bridge_core::{PortResult, PresenceApi, PresenceApiFactory};

use crate::client::GraphClient;
use crate::config::GraphConfig;

#[derive(Debug, Clone)]
pub struct GraphClientFactory {
    settings: GraphSettings,
}

impl GraphClientFactory {
    pub fn new(settings: GraphSettings) -> Self {
        Self { settings }
    }
}

impl PresenceApiFactory for GraphClientFactory {
    fn connect(&self, access_token: &str) -> PortResult<Arc<dyn PresenceApi>> {
        let config = GraphConfig::from_settings(&self.settings, access_token);
        let client = GraphClient::new(config)?;
        Ok(Arc::new(client))
    }
}
