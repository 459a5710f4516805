//! Group operations.

use std::sync::Arc;

use tracing::{info, warn};

use super::AppStore;
use crate::services::reconcile::backfill_membership;
use crate::types::errors::StoreError;
use crate::types::group::{Group, GroupDraft, GroupPatch, MoveWebsiteRequest};

impl AppStore {
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Fetches the flat group list and the nested view concurrently.
    ///
    /// Membership only the nested view reports is copied onto the flat websites.
    pub async fn load_groups(&mut self) -> Result<(), StoreError> {
        let _busy = self.begin();
        let api = Arc::clone(&self.api);
        let (groups, nested) = tokio::join!(api.get_groups(), api.get_groups_with_websites());
        let groups = match groups {
            Ok(groups) => groups,
            Err(e) => return Err(self.fail("Error loading groups", e)),
        };
        match nested {
            Ok(nested) => {
                backfill_membership(&mut self.sites, &nested);
            }
            Err(e) => warn!("Failed to load groups with websites: {}", e),
        }
        info!("Loaded {} groups", groups.len());
        self.groups = groups;
        self.refresh_groups();
        Ok(())
    }

    /// Creates a group, then reloads the group lists.
    pub async fn create_group(&mut self, draft: GroupDraft) -> Result<Group, StoreError> {
        let _busy = self.begin();
        let group = match self.api.create_group(&draft).await {
            Ok(group) => group,
            Err(e) => return Err(self.fail_with_notice("Error creating group", e)),
        };
        info!("Group created: {} ({})", group.name, group.id);
        self.groups.push(group.clone());
        self.refresh_groups();
        self.notify_success(format!("Created group {}", group.name));

        if let Err(e) = self.load_groups().await {
            warn!("Reload after creating group failed: {}", e);
        }
        Ok(group)
    }

    /// Updates a group; its member websites are untouched.
    pub async fn update_group(&mut self, id: &str, patch: GroupPatch) -> Result<Group, StoreError> {
        let _busy = self.begin();
        match self.api.update_group(id, &patch).await {
            Ok(updated) => {
                info!("Group updated: {}", id);
                match self.groups.iter_mut().find(|g| g.id == id) {
                    Some(group) => *group = updated.clone(),
                    None => self.groups.push(updated.clone()),
                }
                self.refresh_groups();
                self.notify_success(format!("Updated group {}", updated.name));
                Ok(updated)
            }
            Err(e) => Err(self.fail_with_notice("Error updating group", e)),
        }
    }

    /// Deletes a group. The backend detaches its websites, so the website list is
    /// fetched again afterwards.
    pub async fn delete_group(&mut self, id: &str) -> Result<(), StoreError> {
        let _busy = self.begin();
        if let Err(e) = self.api.delete_group(id).await {
            return Err(self.fail_with_notice("Error deleting group", e));
        }
        info!("Group deleted: {}", id);
        self.groups.retain(|g| g.id != id);

        match self.api.get_websites().await {
            Ok(websites) => self.sites = websites,
            Err(e) => {
                warn!("Failed to reload websites after deleting group: {}", e);
                for site in self.sites.iter_mut().filter(|s| s.group() == Some(id)) {
                    site.group_id = None;
                }
            }
        }
        self.refresh_groups();
        self.notify_success("Group deleted");
        Ok(())
    }

    /// Flips the fold state locally; nothing is sent to the backend.
    pub fn toggle_group_collapse(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == id) else {
            return Err(self.fail("Error toggling group", StoreError::NotFound(id.to_string())));
        };
        group.is_collapsed = !group.is_collapsed;
        let collapsed = group.is_collapsed;
        self.refresh_groups();
        Ok(collapsed)
    }

    /// Moves a website into `group_id` (or out of every group with `None`), then
    /// reloads groups and data from the backend.
    pub async fn move_website_to_group(
        &mut self,
        website_id: &str,
        group_id: Option<&str>,
        position: Option<i64>,
    ) -> Result<(), StoreError> {
        let _busy = self.begin();
        let request = MoveWebsiteRequest {
            website_id: website_id.to_string(),
            group_id: group_id.map(str::to_string),
            position,
        };
        if let Err(e) = self.api.move_website_to_group(&request).await {
            return Err(self.fail_with_notice("Error moving website", e));
        }
        info!("Website {} moved to group {:?}", website_id, group_id);

        if let Err(e) = self.load_data().await {
            warn!("Reload after moving website failed: {}", e);
        }
        self.notify_success("Website moved");
        Ok(())
    }

    /// Persists a new group order, then applies it locally.
    ///
    /// Groups missing from `group_ids` keep their relative order after the listed ones.
    pub async fn reorder_groups(&mut self, group_ids: &[String]) -> Result<(), StoreError> {
        let _busy = self.begin();
        if let Err(e) = self.api.reorder_groups(group_ids).await {
            return Err(self.fail_with_notice("Error reordering groups", e));
        }

        let mut ordered = Vec::with_capacity(self.groups.len());
        for id in group_ids {
            if let Some(pos) = self.groups.iter().position(|g| &g.id == id) {
                ordered.push(self.groups.remove(pos));
            }
        }
        ordered.append(&mut self.groups);
        for (position, group) in ordered.iter_mut().enumerate() {
            group.sort_order = position as i64;
        }
        self.groups = ordered;
        self.refresh_groups();

        info!("Groups reordered");
        self.notify_success("Group order saved");
        Ok(())
    }
}
