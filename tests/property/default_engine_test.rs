//! Property-based tests for default search engine resolution.
//!
//! Whatever engine list and `defaultEngineId` the backend reports, the settings
//! always end up pointing at an engine that exists (or at the fallback id when
//! there are no engines at all).

use std::sync::Arc;

use navpanel::services::memory_backend::InMemoryBackend;
use navpanel::services::search::RecordingNavigator;
use navpanel::store::AppStore;
use navpanel::types::search_engine::SearchEngine;
use navpanel::types::settings::{AppSettings, FALLBACK_ENGINE_ID};
use proptest::prelude::*;

fn engine(id: &str) -> SearchEngine {
    SearchEngine {
        id: id.to_string(),
        name: id.to_uppercase(),
        url: format!("https://{}.example/?q={{}}", id),
        ..Default::default()
    }
}

/// Distinct short engine ids.
fn arb_engine_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,6}", 0..6).prop_map(|ids| ids.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn default_engine_always_resolves(ids in arb_engine_ids(), default_id in "[a-z]{1,6}") {
        let mut settings = AppSettings::default();
        settings.search.engines = ids.iter().map(|id| engine(id)).collect();
        settings.search.default_engine_id = default_id.clone();

        let corrected = settings.ensure_default_engine();

        let resolved = &settings.search.default_engine_id;
        if ids.is_empty() {
            prop_assert_eq!(resolved.as_str(), FALLBACK_ENGINE_ID);
        } else {
            prop_assert!(ids.contains(resolved));
            prop_assert_eq!(settings.default_engine().map(|e| &e.id), Some(resolved));
        }
        prop_assert_eq!(corrected, !ids.contains(&default_id));
    }

    #[test]
    fn ensure_default_engine_is_idempotent(ids in arb_engine_ids(), default_id in "[a-z]{1,6}") {
        let mut settings = AppSettings::default();
        settings.search.engines = ids.iter().map(|id| engine(id)).collect();
        settings.search.default_engine_id = default_id;

        settings.ensure_default_engine();
        let once = settings.clone();
        prop_assert!(!settings.ensure_default_engine() || ids.is_empty());
        prop_assert_eq!(settings, once);
    }
}

#[tokio::test]
async fn test_empty_backend_loads_builtin_engines() {
    navpanel::logging::init_for_tests();
    let backend = Arc::new(InMemoryBackend::new());
    let mut store = AppStore::new(backend.clone(), Arc::new(RecordingNavigator::new()));

    store.load_data().await.unwrap();

    let ids: Vec<&str> = store.search_engines().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["google", "baidu", "bing", "github"]);
    assert_eq!(store.settings().search.default_engine_id, "google");
    assert_eq!(store.current_engine_id(), Some("google"));
    assert_eq!(backend.search_engines().len(), 4);
}
