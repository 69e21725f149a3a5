use std::sync::Arc;

use crate::{config::ServerConfig, content::DeliveryOptions, store::DataStore};

#[derive(Clone)]
pub struct AppState {
    store: Arc<DataStore>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = DataStore::new(&config.site_root, &config.data_dir);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Content delivery settings before request overrides.
    pub fn default_delivery(&self) -> DeliveryOptions {
        DeliveryOptions {
            include: crate::content::IncludeContent::Auto,
            check_base64: true,
            max_size_kb: self.config.content_max_size_kb,
        }
    }
}
