//! App core for navpanel.
//!
//! Wires the configured backend and navigator into an `AppStore` and runs the
//! startup and shutdown sequences.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::services::api_client::{ApiClient, HttpApiClient};
use crate::services::memory_backend::InMemoryBackend;
use crate::services::search::{Navigator, SystemNavigator};
use crate::store::AppStore;
use crate::types::errors::StoreError;

/// Central application struct: the configuration and the store built from it.
pub struct App {
    pub config: AppConfig,
    pub store: AppStore,
}

impl App {
    /// Builds the app against the HTTP backend named by the config, or against the
    /// in-memory sample backend in demo mode.
    pub fn new(config: AppConfig) -> Self {
        let api: Arc<dyn ApiClient> = if config.demo {
            info!("Demo mode: using the in-memory backend");
            Arc::new(InMemoryBackend::with_sample_data())
        } else {
            info!("Using backend at {}", config.api_base_url);
            Arc::new(
                HttpApiClient::new(&config.api_base_url).with_icon_transport(config.icon_transport),
            )
        };
        Self::with_client(config, api, Arc::new(SystemNavigator))
    }

    /// Builds the app around an explicit backend and navigator.
    pub fn with_client(
        config: AppConfig,
        api: Arc<dyn ApiClient>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            store: AppStore::new(api, navigator),
        }
    }

    /// Startup sequence: check the backend is reachable, then load everything.
    ///
    /// An unreachable backend is only a warning; `load_data` applies its own fallbacks.
    pub async fn startup(&mut self) -> Result<(), StoreError> {
        if let Err(e) = self.store.api().ping().await {
            warn!("Backend health check failed: {}", e);
        }
        self.store.load_data().await
    }

    /// Shutdown sequence: report anything the UI never picked up.
    pub fn shutdown(&mut self) {
        let pending = self.store.take_notifications();
        if !pending.is_empty() {
            info!("Dropping {} undelivered notifications", pending.len());
        }
        if let Some(err) = self.store.last_error() {
            warn!("Shutting down with error: {}", err);
        }
        info!("navpanel stopped");
    }
}
