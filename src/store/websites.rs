//! Website operations.

use tracing::{error, info};

use super::AppStore;
use crate::types::errors::StoreError;
use crate::types::website::{Website, WebsiteDraft};

impl AppStore {
    /// Websites matching the search query (name, url or description, case-insensitive).
    ///
    /// An empty query returns every website.
    pub fn filtered_sites(&self) -> Vec<&Website> {
        if self.search_query.is_empty() {
            return self.sites.iter().collect();
        }
        self.sites
            .iter()
            .filter(|site| site.matches(&self.search_query))
            .collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn site(&self, id: &str) -> Option<&Website> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub async fn add_site(&mut self, draft: WebsiteDraft) -> Result<Website, StoreError> {
        let _busy = self.begin();
        match self.api.create_website(&draft).await {
            Ok(site) => {
                info!("Site added: {} ({})", site.name, site.id);
                self.sites.push(site.clone());
                self.refresh_groups();
                self.notify_success(format!("Added {}", site.name));
                Ok(site)
            }
            Err(e) => Err(self.fail_with_notice("Error adding site", e)),
        }
    }

    pub async fn update_site(&mut self, site: Website) -> Result<Website, StoreError> {
        let _busy = self.begin();
        match self.api.update_website(&site.id, &site).await {
            Ok(mut updated) => {
                // Some backends omit the membership in update responses.
                if updated.group_id.is_none() {
                    updated.group_id = site.group_id.clone();
                }
                info!("Site updated: {}", updated.id);
                self.update_website_in_groups(updated.clone());
                self.notify_success(format!("Updated {}", updated.name));
                Ok(updated)
            }
            Err(e) => Err(self.fail_with_notice("Error updating site", e)),
        }
    }

    pub async fn delete_site(&mut self, id: &str) -> Result<(), StoreError> {
        let _busy = self.begin();
        match self.api.delete_website(id).await {
            Ok(()) => {
                info!("Site deleted: {}", id);
                self.sites.retain(|s| s.id != id);
                self.refresh_groups();
                self.notify_success("Website deleted");
                Ok(())
            }
            Err(e) => Err(self.fail_with_notice("Error deleting site", e)),
        }
    }

    /// Replaces (or appends) `site` in the flat list and rebuilds the grouped view,
    /// so the site ends up in exactly the group its `group_id` names.
    pub fn update_website_in_groups(&mut self, site: Website) {
        match self.sites.iter_mut().find(|s| s.id == site.id) {
            Some(existing) => *existing = site,
            None => self.sites.push(site),
        }
        self.refresh_groups();
    }

    /// Moves the site at `from` to `to`, shows the new order immediately and then
    /// persists it.
    ///
    /// If the backend rejects the order, everything is reloaded from the backend
    /// and the rejection is returned.
    pub async fn reorder_sites(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        if from == to {
            return Ok(());
        }
        let len = self.sites.len();
        for index in [from, to] {
            if index >= len {
                return Err(self.fail("Error reordering sites", StoreError::InvalidIndex(index)));
            }
        }

        let _busy = self.begin();
        let moved = self.sites.remove(from);
        self.sites.insert(to, moved);
        for (position, site) in self.sites.iter_mut().enumerate() {
            site.sort_order = Some(position as i64);
        }
        self.refresh_groups();

        let ids: Vec<String> = self.sites.iter().map(|s| s.id.clone()).collect();
        match self.api.reorder_websites(&ids).await {
            Ok(()) => {
                info!("Sites reordered: {} -> {}", from, to);
                self.notify_success("Website order saved");
                Ok(())
            }
            Err(e) => {
                error!("Failed to reorder sites: {}", e);
                if let Err(reload) = self.load_data().await {
                    error!("Reload after failed reorder also failed: {}", reload);
                }
                Err(self.fail_with_notice("Error reordering sites", e))
            }
        }
    }
}
