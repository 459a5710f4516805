//! Tests for search dispatch through `AppStore::perform_search`.

use std::sync::Arc;

use navpanel::services::memory_backend::InMemoryBackend;
use navpanel::services::search::{NavigationTarget, RecordingNavigator};
use navpanel::store::AppStore;
use navpanel::types::settings::{PartialSearchSettings, PartialSettings};
use rstest::rstest;

async fn setup() -> (AppStore, Arc<RecordingNavigator>) {
    navpanel::logging::init_for_tests();
    let navigator = Arc::new(RecordingNavigator::new());
    let mut store = AppStore::new(Arc::new(InMemoryBackend::new()), navigator.clone());
    store.load_data().await.unwrap();
    (store, navigator)
}

#[tokio::test]
async fn test_search_on_explicit_engine() {
    let (store, navigator) = setup().await;

    let url = store.perform_search("foo", Some("google"));

    assert_eq!(url.as_deref(), Some("https://www.google.com/search?q=foo"));
    assert_eq!(
        navigator.last(),
        Some((
            "https://www.google.com/search?q=foo".to_string(),
            NavigationTarget::NewTab
        ))
    );
}

#[rstest]
#[case("baidu", "rust 语言", "https://www.baidu.com/s?wd=rust%20%E8%AF%AD%E8%A8%80")]
#[case("github", "serde json", "https://github.com/search?q=serde%20json")]
#[case("bing", "a&b=c", "https://www.bing.com/search?q=a%26b%3Dc")]
#[case("google", " padded ", "https://www.google.com/search?q=%20padded%20")]
#[tokio::test]
async fn test_query_is_percent_encoded(
    #[case] engine: &str,
    #[case] query: &str,
    #[case] expected: &str,
) {
    let (store, _navigator) = setup().await;
    assert_eq!(store.perform_search(query, Some(engine)).as_deref(), Some(expected));
}

#[tokio::test]
async fn test_search_uses_current_engine_by_default() {
    let (mut store, _navigator) = setup().await;
    store.select_search_engine("bing").unwrap();

    let url = store.perform_search("tokio", None).unwrap();

    assert!(url.starts_with("https://www.bing.com/"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
#[tokio::test]
async fn test_blank_query_is_noop(#[case] query: &str) {
    let (store, navigator) = setup().await;
    assert!(store.perform_search(query, Some("google")).is_none());
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_unknown_engine_is_noop() {
    let (store, navigator) = setup().await;
    assert!(store.perform_search("foo", Some("altavista")).is_none());
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn test_current_tab_when_new_tab_disabled() {
    let (mut store, navigator) = setup().await;
    store
        .update_settings(PartialSettings {
            search: Some(PartialSearchSettings {
                open_in_new_tab: Some(false),
                ..PartialSearchSettings::default()
            }),
            ..PartialSettings::default()
        })
        .await
        .unwrap();

    store.perform_search("foo", None).unwrap();

    assert_eq!(navigator.last().unwrap().1, NavigationTarget::CurrentTab);
}
