//! Tests for `AppStore::load_data`: fan-out, fallbacks and engine seeding.

use std::sync::Arc;

use navpanel::services::api_client::ApiClient;
use navpanel::services::memory_backend::InMemoryBackend;
use navpanel::services::search::RecordingNavigator;
use navpanel::store::AppStore;
use navpanel::types::search_engine::SearchEngine;
use navpanel::types::settings::{PartialSearchSettings, PartialSettings, Theme};

const LOAD_OPERATIONS: [&str; 5] = [
    "get_websites",
    "get_settings",
    "get_search_engines",
    "get_groups",
    "get_groups_with_websites",
];

fn setup(backend: InMemoryBackend) -> (AppStore, Arc<InMemoryBackend>) {
    navpanel::logging::init_for_tests();
    let backend = Arc::new(backend);
    let store = AppStore::new(backend.clone(), Arc::new(RecordingNavigator::new()));
    (store, backend)
}

fn engine_ids(store: &AppStore) -> Vec<&str> {
    store.search_engines().iter().map(|e| e.id.as_str()).collect()
}

#[tokio::test]
async fn test_empty_backend_is_seeded_with_builtins() {
    let (mut store, backend) = setup(InMemoryBackend::new());
    store.load_data().await.unwrap();

    assert_eq!(engine_ids(&store), vec!["google", "baidu", "bing", "github"]);
    assert_eq!(store.settings().search.default_engine_id, "google");
    assert_eq!(store.current_engine_id(), Some("google"));
    assert_eq!(backend.call_count("create_search_engine"), 4);
    assert_eq!(backend.search_engines().len(), 4);
    assert!(!store.is_loading());
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn test_failed_seed_uses_local_definitions() {
    let (mut store, backend) = setup(InMemoryBackend::new());
    backend.fail("create_search_engine");

    store.load_data().await.unwrap();

    assert_eq!(engine_ids(&store), vec!["google", "baidu", "bing", "github"]);
    assert_eq!(backend.call_count("create_search_engine"), 4);
    assert!(backend.search_engines().is_empty());
}

#[tokio::test]
async fn test_one_failing_endpoint_does_not_block_the_rest() {
    let (mut store, backend) = setup(InMemoryBackend::with_sample_data());
    backend.fail("get_websites");

    store.load_data().await.unwrap();

    assert!(store.sites().is_empty());
    assert_eq!(store.groups().len(), 2);
    assert_eq!(store.search_engines().len(), 4);
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn test_total_failure_falls_back_to_builtins_and_reports() {
    let (mut store, backend) = setup(InMemoryBackend::with_sample_data());
    for op in LOAD_OPERATIONS {
        backend.fail(op);
    }

    let result = store.load_data().await;

    assert!(result.is_err());
    assert_eq!(store.last_error(), Some("HTTP error! status: 500"));
    assert_eq!(engine_ids(&store), vec!["google", "baidu", "bing", "github"]);
    assert_eq!(store.current_engine_id(), Some("google"));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_remote_settings_merge_over_local() {
    let (mut store, backend) = setup(InMemoryBackend::new());
    backend
        .update_settings(&PartialSettings {
            theme: Some(Theme::Dark),
            search: Some(PartialSearchSettings {
                open_in_new_tab: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await
        .unwrap();

    store.load_data().await.unwrap();

    assert_eq!(store.settings().theme, Theme::Dark);
    assert!(!store.settings().search.open_in_new_tab);
    assert!(store.settings().search.enabled);
    assert_eq!(store.settings().layout.columns, 6);
}

#[tokio::test]
async fn test_invalid_default_engine_is_corrected_on_load() {
    let (mut store, backend) = setup(InMemoryBackend::new());
    let bing = SearchEngine::builtin_defaults().remove(2);
    backend.create_search_engine(&bing.to_draft()).await.unwrap();
    backend
        .update_settings(&PartialSettings {
            search: Some(PartialSearchSettings {
                default_engine_id: Some("removed-engine".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .await
        .unwrap();

    store.load_data().await.unwrap();

    assert_eq!(engine_ids(&store), vec!["bing"]);
    assert_eq!(store.settings().search.default_engine_id, "bing");
    assert_eq!(store.current_engine_id(), Some("bing"));
}

#[tokio::test]
async fn test_load_builds_grouped_view() {
    let (mut store, _backend) = setup(InMemoryBackend::with_sample_data());
    store.load_data().await.unwrap();

    let view = store.groups_with_websites();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].group.name, "Development");
    assert_eq!(view[0].websites.len(), 3);
    assert_eq!(view[1].websites.len(), 1);
    assert_eq!(store.sites().len(), 5);
}

#[tokio::test]
async fn test_load_fetches_all_five_resources() {
    let (mut store, backend) = setup(InMemoryBackend::with_sample_data());
    store.load_data().await.unwrap();
    for op in LOAD_OPERATIONS {
        assert_eq!(backend.call_count(op), 1, "{} not fetched once", op);
    }
}
