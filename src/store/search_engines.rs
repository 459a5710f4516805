//! Search engine operations.
//!
//! These only log; they queue no notifications.

use tracing::{info, warn};

use super::AppStore;
use crate::services::icon_upload::IconFile;
use crate::types::errors::StoreError;
use crate::types::search_engine::{SearchEngine, SearchEngineDraft, SearchEnginePatch};
use crate::types::settings::{PartialSearchSettings, PartialSettings};

impl AppStore {
    /// The engine referenced by `defaultEngineId`, else the first engine.
    pub fn default_search_engine(&self) -> Option<&SearchEngine> {
        self.settings.default_engine()
    }

    /// The engine selected in this session.
    pub fn current_search_engine(&self) -> Option<&SearchEngine> {
        self.current_engine_id
            .as_deref()
            .and_then(|id| self.settings.engine(id))
    }

    pub fn current_engine_id(&self) -> Option<&str> {
        self.current_engine_id.as_deref()
    }

    /// Selects the session engine without persisting anything.
    pub fn select_search_engine(&mut self, id: &str) -> Result<(), StoreError> {
        if self.settings.engine(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.current_engine_id = Some(id.to_string());
        Ok(())
    }

    /// Selects the session engine and persists it as the default.
    ///
    /// Unknown ids are ignored.
    pub async fn set_current_search_engine(&mut self, id: &str) -> Result<(), StoreError> {
        if self.settings.engine(id).is_none() {
            warn!("Ignoring unknown search engine {}", id);
            return Ok(());
        }
        self.current_engine_id = Some(id.to_string());

        let mut search = PartialSearchSettings::from(&self.settings.search);
        search.default_engine_id = Some(id.to_string());
        let patch = PartialSettings {
            search: Some(search),
            ..Default::default()
        };
        self.update_settings(patch).await
    }

    pub async fn add_search_engine(
        &mut self,
        draft: SearchEngineDraft,
    ) -> Result<SearchEngine, StoreError> {
        let _busy = self.begin();
        match self.api.create_search_engine(&draft).await {
            Ok(engine) => {
                info!("Search engine added: {}", engine.id);
                self.push_engine(engine.clone());
                Ok(engine)
            }
            Err(e) => Err(self.fail("Error adding search engine", e)),
        }
    }

    pub async fn add_search_engine_with_icon(
        &mut self,
        draft: SearchEngineDraft,
        icon: Option<IconFile>,
    ) -> Result<SearchEngine, StoreError> {
        let _busy = self.begin();
        match self
            .api
            .create_search_engine_with_icon(&draft, icon.as_ref())
            .await
        {
            Ok(engine) => {
                info!("Search engine with icon added: {}", engine.id);
                self.push_engine(engine.clone());
                Ok(engine)
            }
            Err(e) => Err(self.fail("Error adding search engine with icon", e)),
        }
    }

    pub async fn update_search_engine(
        &mut self,
        id: &str,
        patch: SearchEnginePatch,
    ) -> Result<SearchEngine, StoreError> {
        let _busy = self.begin();
        match self.api.update_search_engine(id, &patch).await {
            Ok(engine) => {
                info!("Search engine updated: {}", id);
                self.replace_engine(id, engine.clone());
                Ok(engine)
            }
            Err(e) => Err(self.fail("Error updating search engine", e)),
        }
    }

    pub async fn update_search_engine_with_icon(
        &mut self,
        id: &str,
        patch: SearchEnginePatch,
        icon: Option<IconFile>,
    ) -> Result<SearchEngine, StoreError> {
        let _busy = self.begin();
        match self
            .api
            .update_search_engine_with_icon(id, &patch, icon.as_ref())
            .await
        {
            Ok(engine) => {
                info!("Search engine with icon updated: {}", id);
                self.replace_engine(id, engine.clone());
                Ok(engine)
            }
            Err(e) => Err(self.fail("Error updating search engine with icon", e)),
        }
    }

    /// Deletes an engine. Refused locally when it is the only one left.
    ///
    /// Deleting the default or the current engine moves that role to the first
    /// remaining engine.
    pub async fn delete_search_engine(&mut self, id: &str) -> Result<(), StoreError> {
        let _busy = self.begin();
        if self.settings.search.engines.len() <= 1 {
            return Err(self.fail("Error deleting search engine", StoreError::LastSearchEngine));
        }
        if let Err(e) = self.api.delete_search_engine(id).await {
            return Err(self.fail("Error deleting search engine", e));
        }
        info!("Search engine deleted: {}", id);
        self.settings.search.engines.retain(|e| e.id != id);

        let first = self.settings.search.engines.first().map(|e| e.id.clone());
        if self.settings.search.default_engine_id == id {
            if let Some(first) = &first {
                self.settings.search.default_engine_id = first.clone();
                self.current_engine_id = Some(first.clone());
            }
        }
        if self.current_engine_id.as_deref() == Some(id) {
            self.current_engine_id = self.default_search_engine().map(|e| e.id.clone());
        }
        Ok(())
    }

    fn push_engine(&mut self, engine: SearchEngine) {
        self.settings.search.engines.push(engine);
        if self.settings.search.engines.len() == 1 {
            let id = self.settings.search.engines[0].id.clone();
            self.settings.search.default_engine_id = id.clone();
            self.current_engine_id = Some(id);
        }
    }

    /// Swaps in the backend's copy. The current engine is tracked by id, so it
    /// picks up the new data on its own.
    fn replace_engine(&mut self, id: &str, engine: SearchEngine) {
        let new_id = engine.id.clone();
        if let Some(slot) = self.settings.search.engines.iter_mut().find(|e| e.id == id) {
            *slot = engine;
        }
        if new_id != id && self.current_engine_id.as_deref() == Some(id) {
            self.current_engine_id = Some(new_id);
        }
    }
}
