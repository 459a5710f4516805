//! Property-based tests for website reordering.
//!
//! After `reorder_sites(from, to)` the list is a permutation of the old one with
//! the moved site at `to`, `sortOrder` matches list position, and the backend
//! received the same order.

use std::sync::Arc;

use navpanel::services::memory_backend::InMemoryBackend;
use navpanel::services::search::RecordingNavigator;
use navpanel::store::AppStore;
use navpanel::types::website::WebsiteDraft;
use proptest::prelude::*;

async fn store_with_sites(count: usize) -> (AppStore, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::new());
    let mut store = AppStore::new(backend.clone(), Arc::new(RecordingNavigator::new()));
    store.load_data().await.unwrap();
    for i in 0..count {
        store
            .add_site(WebsiteDraft::new(&format!("Site {}", i), &format!("https://s{}.example", i)))
            .await
            .unwrap();
    }
    (store, backend)
}

fn arb_move() -> impl Strategy<Value = (usize, usize, usize)> {
    (2usize..8).prop_flat_map(|len| (Just(len), 0..len, 0..len))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn reorder_is_a_permutation((len, from, to) in arb_move()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (mut store, backend) = store_with_sites(len).await;
            let before: Vec<String> = store.sites().iter().map(|s| s.id.clone()).collect();

            store.reorder_sites(from, to).await.unwrap();

            let after: Vec<String> = store.sites().iter().map(|s| s.id.clone()).collect();
            let mut expected = before.clone();
            let moved = expected.remove(from);
            expected.insert(to, moved);
            prop_assert_eq!(&after, &expected);
            prop_assert_eq!(&after[to], &before[from]);

            if from != to {
                for (position, site) in store.sites().iter().enumerate() {
                    prop_assert_eq!(site.sort_order, Some(position as i64));
                }
                let persisted: Vec<String> = backend.websites().into_iter().map(|w| w.id).collect();
                prop_assert_eq!(persisted, after);
            }
            Ok(())
        })?;
    }

    #[test]
    fn out_of_range_reorder_changes_nothing(len in 1usize..5, extra in 0usize..3) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let (mut store, backend) = store_with_sites(len).await;
            let before = store.sites().to_vec();

            let result = store.reorder_sites(0, len + extra).await;

            prop_assert!(result.is_err());
            prop_assert_eq!(store.sites(), before.as_slice());
            prop_assert_eq!(backend.call_count("reorder_websites"), 0);
            Ok(())
        })?;
    }
}
