//! Search dispatch from the dashboard search box.

use tracing::{error, info};

use super::AppStore;
use crate::services::search::{build_search_url, NavigationTarget};

impl AppStore {
    /// Runs `query` on `engine_id` (or the current engine) and opens the result.
    ///
    /// Returns the opened URL. A blank query or an unknown engine does nothing and
    /// returns `None`; a navigator failure is logged the same way.
    pub fn perform_search(&self, query: &str, engine_id: Option<&str>) -> Option<String> {
        if query.trim().is_empty() {
            return None;
        }

        let engine = match engine_id {
            Some(id) => self.settings.engine(id),
            None => self.current_search_engine(),
        };
        let Some(engine) = engine else {
            error!("No search engine found for {:?}", engine_id);
            return None;
        };

        let url = build_search_url(engine, query);
        let target = NavigationTarget::from_new_tab(self.settings.search.open_in_new_tab);
        if let Err(e) = self.navigator.navigate(&url, target) {
            error!("Failed to open {}: {}", url, e);
            return None;
        }
        info!("Search on {}: {}", engine.id, url);
        Some(url)
    }
}
