//! Settings operations. These only log; they queue no notifications.

use tracing::{info, warn};

use super::AppStore;
use crate::types::errors::StoreError;
use crate::types::search_engine::SearchEngine;
use crate::types::settings::{AppSettings, PartialSettings};

impl AppStore {
    /// Sends a partial settings update and merges the backend's answer.
    ///
    /// When the answer carries no usable engine list the engines are fetched
    /// again, falling back to the built-ins. Afterwards `defaultEngineId` is
    /// checked and the session engine is kept if it still exists, otherwise it
    /// becomes the default.
    pub async fn update_settings(&mut self, patch: PartialSettings) -> Result<(), StoreError> {
        let _busy = self.begin();
        let updated = match self.api.update_settings(&patch).await {
            Ok(updated) => updated,
            Err(e) => return Err(self.fail("Error updating settings", e)),
        };

        if !self.settings.apply_update(&updated) {
            self.settings.search.engines = match self.api.get_search_engines().await {
                Ok(engines) if !engines.is_empty() => engines,
                Ok(_) => SearchEngine::builtin_defaults(),
                Err(e) => {
                    warn!("Failed to load search engines, using defaults: {}", e);
                    SearchEngine::builtin_defaults()
                }
            };
        }

        if self.settings.ensure_default_engine() {
            warn!(
                "Default search engine was invalid, reset to {}",
                self.settings.search.default_engine_id
            );
        }

        let current_exists = self
            .current_engine_id
            .as_deref()
            .map(|id| self.settings.engine(id).is_some())
            .unwrap_or(false);
        if !current_exists {
            self.current_engine_id = self.default_search_engine().map(|e| e.id.clone());
        }

        info!("Settings updated");
        Ok(())
    }

    /// Sends the complete default settings, built-in engines included.
    pub async fn reset_settings(&mut self) -> Result<(), StoreError> {
        let defaults = PartialSettings::from(&AppSettings::default());
        match self.update_settings(defaults).await {
            Ok(()) => {
                info!("Settings reset to default");
                Ok(())
            }
            Err(e) => Err(self.fail("Error resetting settings", e)),
        }
    }
}
