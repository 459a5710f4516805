//! In-process backend.
//!
//! `InMemoryBackend` implements `ApiClient` against plain in-memory tables with the
//! same semantics as the REST backend: it issues ids and timestamps, keeps
//! `sortOrder` per group, detaches websites from deleted groups and echoes
//! settings with the live engine table. It powers the offline demo mode and the
//! test suites. Individual operations can be made to fail to simulate outages.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::services::api_client::ApiClient;
use crate::services::icon_upload::{generate_engine_id_now, IconFile};
use crate::types::errors::ApiError;
use crate::types::group::{Group, GroupDraft, GroupPatch, GroupWithWebsites, MoveWebsiteRequest};
use crate::types::search_engine::{SearchEngine, SearchEngineDraft, SearchEnginePatch};
use crate::types::settings::{AppSettings, PartialSettings};
use crate::types::transfer::DataBundle;
use crate::types::website::{Website, WebsiteDraft};

/// Status code answered by an operation marked as failing.
pub const SIMULATED_FAILURE_STATUS: u16 = 500;

#[derive(Debug, Default)]
struct BackendState {
    websites: Vec<Website>,
    engines: Vec<SearchEngine>,
    settings: AppSettings,
    groups: Vec<Group>,
    failing: HashSet<String>,
    calls: Vec<String>,
}

/// `ApiClient` backed by in-memory tables.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
}

impl InMemoryBackend {
    /// An empty backend: no websites, groups or engines.
    pub fn new() -> Self {
        let backend = Self::default();
        backend.lock().settings.search.engines.clear();
        backend
    }

    /// A backend pre-filled with a couple of groups and websites.
    pub fn with_sample_data() -> Self {
        let backend = Self::new();
        {
            let mut state = backend.lock();
            let dev = new_group(&mut state, &GroupDraft::new("Development"));
            let news = new_group(&mut state, &GroupDraft::new("News"));
            let samples = [
                ("Rust", "https://www.rust-lang.org", Some(&dev.id)),
                ("crates.io", "https://crates.io", Some(&dev.id)),
                ("docs.rs", "https://docs.rs", Some(&dev.id)),
                ("Hacker News", "https://news.ycombinator.com", Some(&news.id)),
                ("Wikipedia", "https://www.wikipedia.org", None),
            ];
            for (name, url, group) in samples {
                let mut draft = WebsiteDraft::new(name, url);
                draft.group_id = group.cloned();
                new_website(&mut state, &draft);
            }
        }
        backend
    }

    /// Makes every later call to `operation` (an `ApiClient` method name) fail.
    pub fn fail(&self, operation: &str) {
        self.lock().failing.insert(operation.to_string());
    }

    /// Undoes [`InMemoryBackend::fail`].
    pub fn recover(&self, operation: &str) {
        self.lock().failing.remove(operation);
    }

    /// Names of the operations invoked so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of times `operation` was invoked.
    pub fn call_count(&self, operation: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == operation).count()
    }

    pub fn websites(&self) -> Vec<Website> {
        self.lock().websites.clone()
    }

    pub fn search_engines(&self) -> Vec<SearchEngine> {
        self.lock().engines.clone()
    }

    pub fn groups(&self) -> Vec<Group> {
        self.lock().groups.clone()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records the call and returns the locked state unless the operation is failing.
    fn begin(&self, operation: &str) -> Result<MutexGuard<'_, BackendState>, ApiError> {
        let mut state = self.lock();
        state.calls.push(operation.to_string());
        if state.failing.contains(operation) {
            debug!(operation, "simulated backend failure");
            return Err(ApiError::Status(SIMULATED_FAILURE_STATUS));
        }
        Ok(state)
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn not_found() -> ApiError {
    ApiError::Status(404)
}

fn bad_request() -> ApiError {
    ApiError::Status(400)
}

fn encode_rows<T: Serialize>(rows: &[T]) -> Result<Vec<Value>, ApiError> {
    rows.iter()
        .map(|row| serde_json::to_value(row).map_err(ApiError::from))
        .collect()
}

/// Imported rows the backend can't bind are rejected as a bad request.
fn decode_rows<T: DeserializeOwned>(rows: &[Value]) -> Result<Vec<T>, ApiError> {
    rows.iter()
        .map(|row| serde_json::from_value(row.clone()).map_err(|_| bad_request()))
        .collect()
}

fn next_sort_order(websites: &[Website], group: Option<&str>) -> i64 {
    websites
        .iter()
        .filter(|w| w.group() == group)
        .filter_map(|w| w.sort_order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

fn new_website(state: &mut BackendState, draft: &WebsiteDraft) -> Website {
    let group = draft.group_id.as_deref().filter(|g| !g.is_empty());
    let stamp = now();
    let website = Website {
        id: Uuid::new_v4().to_string(),
        name: draft.name.clone(),
        url: draft.url.clone(),
        icon: draft.icon.clone(),
        description: draft.description.clone(),
        category: draft.category.clone(),
        group_id: group.map(str::to_string),
        sort_order: Some(next_sort_order(&state.websites, group)),
        created_at: Some(stamp.clone()),
        updated_at: Some(stamp),
    };
    state.websites.push(website.clone());
    website
}

fn new_group(state: &mut BackendState, draft: &GroupDraft) -> Group {
    let sort_order = state
        .groups
        .iter()
        .map(|g| g.sort_order)
        .max()
        .map(|max| max + 1)
        .unwrap_or(0);
    let stamp = now();
    let group = Group {
        id: Uuid::new_v4().to_string(),
        name: draft.name.clone(),
        color: draft.color.clone(),
        icon: draft.icon.clone(),
        sort_order,
        is_collapsed: false,
        created_at: Some(stamp.clone()),
        updated_at: Some(stamp),
    };
    state.groups.push(group.clone());
    group
}

fn insert_engine(state: &mut BackendState, engine: SearchEngine) -> Result<SearchEngine, ApiError> {
    if state.engines.iter().any(|e| e.id == engine.id) {
        return Err(ApiError::Status(409));
    }
    state.engines.push(engine.clone());
    Ok(engine)
}

fn engine_from_draft(draft: &SearchEngineDraft, id: String) -> SearchEngine {
    SearchEngine {
        id,
        name: draft.name.clone(),
        url: draft.url.clone(),
        icon: draft.icon.clone(),
        icon_type: None,
        placeholder: draft.placeholder.clone(),
        is_default: draft.is_default,
    }
}

fn settings_view(state: &BackendState) -> PartialSettings {
    let mut settings = state.settings.clone();
    settings.search.engines = state.engines.clone();
    PartialSettings::from(&settings)
}

#[async_trait]
impl ApiClient for InMemoryBackend {
    async fn ping(&self) -> Result<(), ApiError> {
        self.begin("ping").map(|_| ())
    }

    async fn get_websites(&self) -> Result<Vec<Website>, ApiError> {
        let state = self.begin("get_websites")?;
        Ok(state.websites.clone())
    }

    async fn create_website(&self, draft: &WebsiteDraft) -> Result<Website, ApiError> {
        let mut state = self.begin("create_website")?;
        Ok(new_website(&mut state, draft))
    }

    async fn update_website(&self, id: &str, website: &Website) -> Result<Website, ApiError> {
        let mut state = self.begin("update_website")?;
        let stored = state
            .websites
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(not_found)?;
        stored.name = website.name.clone();
        stored.url = website.url.clone();
        stored.icon = website.icon.clone();
        stored.description = website.description.clone();
        stored.category = website.category.clone();
        stored.group_id = website.group().map(str::to_string);
        if website.sort_order.is_some() {
            stored.sort_order = website.sort_order;
        }
        stored.updated_at = Some(now());
        Ok(stored.clone())
    }

    async fn delete_website(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_website")?;
        let before = state.websites.len();
        state.websites.retain(|w| w.id != id);
        if state.websites.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn reorder_websites(&self, website_ids: &[String]) -> Result<(), ApiError> {
        let mut state = self.begin("reorder_websites")?;
        let mut ordered = Vec::with_capacity(state.websites.len());
        for (index, id) in website_ids.iter().enumerate() {
            if let Some(pos) = state.websites.iter().position(|w| &w.id == id) {
                let mut website = state.websites.remove(pos);
                website.sort_order = Some(index as i64);
                ordered.push(website);
            }
        }
        ordered.append(&mut state.websites);
        state.websites = ordered;
        Ok(())
    }

    async fn get_search_engines(&self) -> Result<Vec<SearchEngine>, ApiError> {
        let state = self.begin("get_search_engines")?;
        Ok(state.engines.clone())
    }

    async fn create_search_engine(&self, draft: &SearchEngineDraft) -> Result<SearchEngine, ApiError> {
        let mut state = self.begin("create_search_engine")?;
        let id = draft
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        insert_engine(&mut state, engine_from_draft(draft, id))
    }

    async fn create_search_engine_with_icon(
        &self,
        draft: &SearchEngineDraft,
        icon: Option<&IconFile>,
    ) -> Result<SearchEngine, ApiError> {
        let mut state = self.begin("create_search_engine_with_icon")?;
        let id = draft
            .id
            .clone()
            .unwrap_or_else(|| generate_engine_id_now(&draft.name));
        let mut engine = engine_from_draft(draft, id);
        if let Some(icon) = icon {
            engine.icon = Some(icon.to_data_url());
            engine.icon_type = Some(icon.mime_type.clone());
        }
        insert_engine(&mut state, engine)
    }

    async fn update_search_engine(
        &self,
        id: &str,
        patch: &SearchEnginePatch,
    ) -> Result<SearchEngine, ApiError> {
        let mut state = self.begin("update_search_engine")?;
        let engine = state
            .engines
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(not_found)?;
        patch.apply_to(engine);
        Ok(engine.clone())
    }

    async fn update_search_engine_with_icon(
        &self,
        id: &str,
        patch: &SearchEnginePatch,
        icon: Option<&IconFile>,
    ) -> Result<SearchEngine, ApiError> {
        let mut state = self.begin("update_search_engine_with_icon")?;
        let engine = state
            .engines
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(not_found)?;
        patch.apply_to(engine);
        if let Some(icon) = icon {
            engine.icon = Some(icon.to_data_url());
            engine.icon_type = Some(icon.mime_type.clone());
        }
        Ok(engine.clone())
    }

    async fn delete_search_engine(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_search_engine")?;
        let before = state.engines.len();
        state.engines.retain(|e| e.id != id);
        if state.engines.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn get_settings(&self) -> Result<PartialSettings, ApiError> {
        let state = self.begin("get_settings")?;
        Ok(settings_view(&state))
    }

    async fn update_settings(&self, patch: &PartialSettings) -> Result<PartialSettings, ApiError> {
        let mut state = self.begin("update_settings")?;
        // Engines live in their own table; the settings row only keeps scalars.
        state.settings.apply_update(patch);
        Ok(settings_view(&state))
    }

    async fn export_data(&self) -> Result<DataBundle, ApiError> {
        let state = self.begin("export_data")?;
        Ok(DataBundle {
            websites: Some(encode_rows(&state.websites)?),
            search_engines: Some(encode_rows(&state.engines)?),
            settings: Some(serde_json::to_value(settings_view(&state))?),
        })
    }

    async fn import_data(&self, bundle: &DataBundle) -> Result<(), ApiError> {
        let mut state = self.begin("import_data")?;
        let websites = bundle.websites.as_deref().map(decode_rows::<Website>).transpose()?;
        let engines = bundle
            .search_engines
            .as_deref()
            .map(decode_rows::<SearchEngine>)
            .transpose()?;
        let settings = bundle
            .settings
            .clone()
            .map(serde_json::from_value::<PartialSettings>)
            .transpose()
            .map_err(|_| bad_request())?;
        if let Some(websites) = websites {
            state.websites = websites;
        }
        if let Some(engines) = engines {
            state.engines = engines;
        }
        if let Some(settings) = settings {
            state.settings.apply_update(&settings);
        }
        Ok(())
    }

    async fn get_groups(&self) -> Result<Vec<Group>, ApiError> {
        let state = self.begin("get_groups")?;
        let mut groups = state.groups.clone();
        groups.sort_by_key(|g| g.sort_order);
        Ok(groups)
    }

    async fn get_groups_with_websites(&self) -> Result<Vec<GroupWithWebsites>, ApiError> {
        let state = self.begin("get_groups_with_websites")?;
        let mut groups = state.groups.clone();
        groups.sort_by_key(|g| g.sort_order);
        Ok(groups
            .into_iter()
            .map(|group| {
                let mut websites: Vec<Website> = state
                    .websites
                    .iter()
                    .filter(|w| w.group() == Some(group.id.as_str()))
                    .cloned()
                    .collect();
                websites.sort_by_key(|w| w.sort_order.unwrap_or(0));
                GroupWithWebsites { group, websites }
            })
            .collect())
    }

    async fn create_group(&self, draft: &GroupDraft) -> Result<Group, ApiError> {
        let mut state = self.begin("create_group")?;
        Ok(new_group(&mut state, draft))
    }

    async fn update_group(&self, id: &str, patch: &GroupPatch) -> Result<Group, ApiError> {
        let mut state = self.begin("update_group")?;
        let group = state
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(not_found)?;
        patch.apply_to(group);
        group.updated_at = Some(now());
        Ok(group.clone())
    }

    async fn delete_group(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.begin("delete_group")?;
        let before = state.groups.len();
        state.groups.retain(|g| g.id != id);
        if state.groups.len() == before {
            return Err(not_found());
        }
        for website in state.websites.iter_mut() {
            if website.group() == Some(id) {
                website.group_id = None;
            }
        }
        Ok(())
    }

    async fn move_website_to_group(&self, request: &MoveWebsiteRequest) -> Result<(), ApiError> {
        let mut state = self.begin("move_website_to_group")?;
        let target = request.group_id.as_deref().filter(|g| !g.is_empty());
        if let Some(group_id) = target {
            if !state.groups.iter().any(|g| g.id == group_id) {
                return Err(not_found());
            }
        }
        if !state.websites.iter().any(|w| w.id == request.website_id) {
            return Err(not_found());
        }

        let sort_order = match (target, request.position) {
            (Some(group_id), Some(position)) => {
                for website in state.websites.iter_mut() {
                    if website.group() == Some(group_id)
                        && website.sort_order.unwrap_or(0) >= position
                    {
                        website.sort_order = Some(website.sort_order.unwrap_or(0) + 1);
                    }
                }
                position
            }
            _ => next_sort_order(&state.websites, target),
        };

        let stamp = now();
        if let Some(website) = state
            .websites
            .iter_mut()
            .find(|w| w.id == request.website_id)
        {
            website.group_id = target.map(str::to_string);
            website.sort_order = Some(sort_order);
            website.updated_at = Some(stamp);
        }
        Ok(())
    }

    async fn reorder_groups(&self, group_ids: &[String]) -> Result<(), ApiError> {
        let mut state = self.begin("reorder_groups")?;
        for (index, id) in group_ids.iter().enumerate() {
            if let Some(group) = state.groups.iter_mut().find(|g| &g.id == id) {
                group.sort_order = index as i64;
            }
        }
        Ok(())
    }
}
