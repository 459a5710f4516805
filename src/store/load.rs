//! Bulk load of the whole dashboard.

use std::sync::Arc;

use tracing::{info, warn};

use super::AppStore;
use crate::services::reconcile::backfill_membership;
use crate::types::errors::{ApiError, StoreError};
use crate::types::search_engine::SearchEngine;

/// Downgrades a failed fetch to `fallback`, logging the cause.
fn or_fallback<T>(what: &str, result: Result<T, ApiError>, fallback: T) -> T {
    result.unwrap_or_else(|e| {
        warn!("Failed to load {}: {}", what, e);
        fallback
    })
}

impl AppStore {
    /// Fetches websites, settings, search engines, groups and the nested group
    /// view concurrently and rebuilds local state from them.
    ///
    /// Each fetch falls back on its own, so one failing endpoint doesn't block the
    /// rest. Only when every fetch fails does the call return an error; the engine
    /// list is then reset to the built-ins so search keeps working.
    pub async fn load_data(&mut self) -> Result<(), StoreError> {
        let _busy = self.begin();
        info!("Loading data from API");

        let api = Arc::clone(&self.api);
        let (websites, settings, engines, groups, nested) = tokio::join!(
            api.get_websites(),
            api.get_settings(),
            api.get_search_engines(),
            api.get_groups(),
            api.get_groups_with_websites(),
        );

        if let (Err(err), Err(_), Err(_), Err(_), Err(_)) =
            (&websites, &settings, &engines, &groups, &nested)
        {
            let err = err.clone();
            self.settings.search.engines = SearchEngine::builtin_defaults();
            self.settings.ensure_default_engine();
            self.current_engine_id = self.settings.search.engines.first().map(|e| e.id.clone());
            return Err(self.fail("Error loading data from API", err));
        }

        let mut websites = or_fallback("websites", websites, Vec::new());
        let settings = settings
            .map_err(|e| warn!("Failed to load settings: {}", e))
            .ok();
        let mut engines = or_fallback("search engines", engines, Vec::new());
        let groups = or_fallback("groups", groups, Vec::new());
        let nested = or_fallback("groups with websites", nested, Vec::new());

        if engines.is_empty() {
            info!("No search engines found in backend, creating defaults");
            engines = self.seed_default_engines().await;
        }

        self.settings.merge_loaded(settings, engines);
        if self.settings.ensure_default_engine() {
            warn!(
                "Default search engine was invalid, reset to {}",
                self.settings.search.default_engine_id
            );
        }
        self.current_engine_id = self.settings.default_engine().map(|e| e.id.clone());

        let backfilled = backfill_membership(&mut websites, &nested);
        if backfilled > 0 {
            info!("Backfilled group membership for {} websites", backfilled);
        }
        self.sites = websites;
        self.groups = groups;
        self.refresh_groups();

        info!(
            sites = self.sites.len(),
            groups = self.groups.len(),
            engines = self.settings.search.engines.len(),
            current_engine = ?self.current_engine_id,
            "Data loaded"
        );
        Ok(())
    }

    /// Creates the built-in engines on the backend one at a time.
    ///
    /// An engine the backend refuses is kept in its local form.
    async fn seed_default_engines(&self) -> Vec<SearchEngine> {
        let mut created = Vec::new();
        for engine in SearchEngine::builtin_defaults() {
            match self.api.create_search_engine(&engine.to_draft()).await {
                Ok(saved) => created.push(saved),
                Err(e) => {
                    warn!("Failed to create default search engine {}: {}", engine.name, e);
                    created.push(engine);
                }
            }
        }
        created
    }
}
