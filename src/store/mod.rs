//! Application store.
//!
//! `AppStore` owns every in-memory copy of the dashboard data and is the only
//! thing that mutates it. Each mutating operation marks the store busy, clears
//! the previous error, calls the backend and then patches local state. On
//! failure it records a readable message, logs the cause and returns the error.
//! The grouped view is rebuilt from the flat lists after every change.

mod busy;
mod groups;
mod load;
mod search;
mod search_engines;
mod settings;
mod transfer;
mod ui;
mod websites;

pub use busy::{BusyCounter, BusyGuard};
pub use ui::UiState;

use std::sync::Arc;

use tracing::error;

use crate::services::api_client::ApiClient;
use crate::services::reconcile::reconcile;
use crate::services::search::Navigator;
use crate::types::errors::StoreError;
use crate::types::group::{Group, GroupWithWebsites};
use crate::types::notification::Notification;
use crate::types::search_engine::SearchEngine;
use crate::types::settings::AppSettings;
use crate::types::website::Website;

pub struct AppStore {
    api: Arc<dyn ApiClient>,
    navigator: Arc<dyn Navigator>,
    sites: Vec<Website>,
    groups: Vec<Group>,
    groups_with_websites: Vec<GroupWithWebsites>,
    settings: AppSettings,
    current_engine_id: Option<String>,
    search_query: String,
    ui: UiState,
    busy: BusyCounter,
    last_error: Option<String>,
    notifications: Vec<Notification>,
}

impl AppStore {
    /// Creates a store with default settings and no data loaded.
    pub fn new(api: Arc<dyn ApiClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            sites: Vec::new(),
            groups: Vec::new(),
            groups_with_websites: Vec::new(),
            settings: AppSettings::default(),
            current_engine_id: None,
            search_query: String::new(),
            ui: UiState::default(),
            busy: BusyCounter::new(),
            last_error: None,
            notifications: Vec::new(),
        }
    }

    pub fn api(&self) -> Arc<dyn ApiClient> {
        Arc::clone(&self.api)
    }

    pub fn sites(&self) -> &[Website] {
        &self.sites
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn groups_with_websites(&self) -> &[GroupWithWebsites] {
        &self.groups_with_websites
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn search_engines(&self) -> &[SearchEngine] {
        &self.settings.search.engines
    }

    /// True while any operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.busy.is_busy()
    }

    /// Shared handle on the busy count, for callers tracking work of their own.
    pub fn busy(&self) -> BusyCounter {
        self.busy.clone()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Drains the queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Starts a mutating operation: clears the last error and marks the store busy.
    fn begin(&mut self) -> BusyGuard {
        self.last_error = None;
        self.busy.enter()
    }

    /// Records a failed operation and hands the error back for propagation.
    fn fail(&mut self, context: &str, err: impl Into<StoreError>) -> StoreError {
        let err = err.into();
        error!("{}: {}", context, err);
        self.last_error = Some(err.to_string());
        err
    }

    /// [`AppStore::fail`] plus an error notification.
    fn fail_with_notice(&mut self, context: &str, err: impl Into<StoreError>) -> StoreError {
        let err = self.fail(context, err);
        self.notifications
            .push(Notification::error(format!("{}: {}", context, err)));
        err
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification::success(message));
    }

    /// Rebuilds the grouped view from the flat lists.
    fn refresh_groups(&mut self) {
        self.groups_with_websites = reconcile(&self.groups, &self.sites);
    }
}
