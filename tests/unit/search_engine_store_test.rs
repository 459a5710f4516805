//! Tests for search engine operations on `AppStore`.

use std::sync::Arc;

use navpanel::services::api_client::ApiClient;
use navpanel::services::icon_upload::IconFile;
use navpanel::services::memory_backend::InMemoryBackend;
use navpanel::services::search::RecordingNavigator;
use navpanel::store::AppStore;
use navpanel::types::errors::StoreError;
use navpanel::types::search_engine::{SearchEngine, SearchEngineDraft, SearchEnginePatch};

async fn setup() -> (AppStore, Arc<InMemoryBackend>) {
    navpanel::logging::init_for_tests();
    let backend = Arc::new(InMemoryBackend::with_sample_data());
    let mut store = AppStore::new(backend.clone(), Arc::new(RecordingNavigator::new()));
    store.load_data().await.unwrap();
    (store, backend)
}

/// A loaded store whose only engine is Bing.
async fn setup_single_engine() -> (AppStore, Arc<InMemoryBackend>) {
    navpanel::logging::init_for_tests();
    let backend = Arc::new(InMemoryBackend::new());
    let bing = SearchEngine::builtin_defaults().remove(2);
    backend.create_search_engine(&bing.to_draft()).await.unwrap();
    let mut store = AppStore::new(backend.clone(), Arc::new(RecordingNavigator::new()));
    store.load_data().await.unwrap();
    (store, backend)
}

fn ddg() -> SearchEngineDraft {
    SearchEngineDraft::new("DuckDuckGo", "https://duckduckgo.com/?q={}")
}

#[tokio::test]
async fn test_add_engine_appends() {
    let (mut store, _backend) = setup().await;
    let engine = store.add_search_engine(ddg()).await.unwrap();

    assert_eq!(store.search_engines().len(), 5);
    assert_eq!(store.search_engines().last().unwrap().id, engine.id);
    assert_eq!(store.current_engine_id(), Some("google"));
    assert!(store.take_notifications().is_empty());
}

#[tokio::test]
async fn test_add_engine_with_icon() {
    let (mut store, backend) = setup().await;
    let icon = IconFile::new("ddg.svg", "image/svg+xml", b"<svg/>".to_vec());

    let engine = store
        .add_search_engine_with_icon(ddg(), Some(icon))
        .await
        .unwrap();

    assert!(engine.id.starts_with("duckduckgo_"));
    assert!(engine.icon.unwrap().starts_with("data:image/svg+xml;base64,"));
    assert_eq!(backend.call_count("create_search_engine_with_icon"), 1);
    assert_eq!(store.search_engines().len(), 5);
}

#[tokio::test]
async fn test_add_engine_failure_is_logged_not_notified() {
    let (mut store, backend) = setup().await;
    backend.fail("create_search_engine");

    assert!(store.add_search_engine(ddg()).await.is_err());
    assert_eq!(store.search_engines().len(), 4);
    assert!(store.last_error().is_some());
    assert!(store.take_notifications().is_empty());
}

#[tokio::test]
async fn test_update_current_engine_refreshes_its_data() {
    let (mut store, _backend) = setup().await;
    let patch = SearchEnginePatch {
        name: Some("Google (EN)".to_string()),
        url: Some("https://www.google.com/search?hl=en&q={}".to_string()),
        ..SearchEnginePatch::default()
    };

    store.update_search_engine("google", patch).await.unwrap();

    let current = store.current_search_engine().unwrap();
    assert_eq!(current.name, "Google (EN)");
    assert_eq!(current.url, "https://www.google.com/search?hl=en&q={}");
}

#[tokio::test]
async fn test_update_engine_with_icon() {
    let (mut store, _backend) = setup().await;
    let icon = IconFile::new("b.png", "image/png", vec![9]);

    let engine = store
        .update_search_engine_with_icon("bing", SearchEnginePatch::default(), Some(icon))
        .await
        .unwrap();

    assert_eq!(engine.icon_type.as_deref(), Some("image/png"));
    let local = store.search_engines().iter().find(|e| e.id == "bing").unwrap();
    assert_eq!(local.icon, engine.icon);
}

#[tokio::test]
async fn test_delete_last_engine_is_rejected_locally() {
    let (mut store, backend) = setup_single_engine().await;

    let result = store.delete_search_engine("bing").await;

    assert_eq!(result, Err(StoreError::LastSearchEngine));
    assert_eq!(store.search_engines().len(), 1);
    assert_eq!(backend.call_count("delete_search_engine"), 0);
    assert_eq!(
        store.last_error(),
        Some("Cannot delete the last search engine")
    );
}

#[tokio::test]
async fn test_delete_default_engine_reassigns_default_and_current() {
    let (mut store, _backend) = setup().await;

    store.delete_search_engine("google").await.unwrap();

    assert_eq!(store.search_engines().len(), 3);
    assert_eq!(store.settings().search.default_engine_id, "baidu");
    assert_eq!(store.current_engine_id(), Some("baidu"));
}

#[tokio::test]
async fn test_delete_current_engine_falls_back_to_default() {
    let (mut store, _backend) = setup().await;
    store.select_search_engine("github").unwrap();

    store.delete_search_engine("github").await.unwrap();

    assert_eq!(store.current_engine_id(), Some("google"));
    assert_eq!(store.settings().search.default_engine_id, "google");
}

#[tokio::test]
async fn test_delete_other_engine_keeps_selection() {
    let (mut store, _backend) = setup().await;
    store.select_search_engine("bing").unwrap();

    store.delete_search_engine("baidu").await.unwrap();

    assert_eq!(store.current_engine_id(), Some("bing"));
}

#[tokio::test]
async fn test_select_engine_is_local_only() {
    let (mut store, backend) = setup().await;
    let calls = backend.calls().len();

    store.select_search_engine("bing").unwrap();

    assert_eq!(store.current_engine_id(), Some("bing"));
    assert_eq!(store.settings().search.default_engine_id, "google");
    assert_eq!(backend.calls().len(), calls);
    assert_eq!(
        store.select_search_engine("nope"),
        Err(StoreError::NotFound("nope".to_string()))
    );
}

#[tokio::test]
async fn test_set_current_engine_persists_default() {
    let (mut store, backend) = setup().await;

    store.set_current_search_engine("github").await.unwrap();

    assert_eq!(store.current_engine_id(), Some("github"));
    assert_eq!(store.settings().search.default_engine_id, "github");
    assert_eq!(store.default_search_engine().unwrap().id, "github");
    assert_eq!(backend.call_count("update_settings"), 1);
}

#[tokio::test]
async fn test_set_current_engine_ignores_unknown_id() {
    let (mut store, backend) = setup().await;
    store.set_current_search_engine("nope").await.unwrap();
    assert_eq!(store.current_engine_id(), Some("google"));
    assert_eq!(backend.call_count("update_settings"), 0);
}
