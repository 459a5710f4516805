//! Web search dispatch.
//!
//! Builds the target URL from an engine template and hands it to a `Navigator`,
//! which opens it in the user's browser (or records it, in tests).

use std::sync::Mutex;

use crate::types::search_engine::{SearchEngine, QUERY_PLACEHOLDER};

/// Where a search result page should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    NewTab,
    CurrentTab,
}

impl NavigationTarget {
    pub fn from_new_tab(open_in_new_tab: bool) -> Self {
        if open_in_new_tab {
            NavigationTarget::NewTab
        } else {
            NavigationTarget::CurrentTab
        }
    }
}

/// Opens URLs on behalf of the dashboard.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str, target: NavigationTarget) -> std::io::Result<()>;
}

/// Opens URLs with the desktop's default browser.
///
/// A desktop browser decides on its own whether a URL lands in a new tab, so
/// `target` is only logged.
#[derive(Debug, Default)]
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn navigate(&self, url: &str, target: NavigationTarget) -> std::io::Result<()> {
        tracing::info!(url, ?target, "opening search results");
        open::that(url)
    }
}

/// Keeps every navigation in memory instead of opening anything.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<(String, NavigationTarget)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<(String, NavigationTarget)> {
        self.visits
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    pub fn last(&self) -> Option<(String, NavigationTarget)> {
        self.visits().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str, target: NavigationTarget) -> std::io::Result<()> {
        let mut visits = self.visits.lock().unwrap_or_else(|e| e.into_inner());
        visits.push((url.to_string(), target));
        Ok(())
    }
}

/// Replaces the first `{}` in the engine's template with the percent-encoded query.
///
/// The query is encoded exactly as typed, surrounding whitespace included. A
/// template without a placeholder is returned unchanged.
pub fn build_search_url(engine: &SearchEngine, query: &str) -> String {
    let encoded = urlencoding::encode(query);
    engine.url.replacen(QUERY_PLACEHOLDER, &encoded, 1)
}
