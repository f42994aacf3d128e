use super::*;
use crate::test_support::{MockPropertyApi, ScriptedSearch, page, property};
use homegenius_core::HomeGeniusError;

fn store() -> (Arc<PropertyCatalogStore>, Arc<MockPropertyApi>) {
    let api = Arc::new(MockPropertyApi::default());
    (Arc::new(PropertyCatalogStore::new(api.clone())), api)
}

fn cities(state: &SearchState) -> Vec<&str> {
    state
        .properties
        .iter()
        .filter_map(|p| p.city.as_deref())
        .collect()
}

async fn wait_for_calls(api: &MockPropertyApi, calls: usize) {
    while api.call_count() < calls {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn search_replaces_results() {
    let (store, api) = store();
    api.push_search(ScriptedSearch::ready(Ok(page(vec![
        property(1, "Stockholm"),
        property(2, "Stockholm"),
    ]))));

    let state = store.search(PropertySearchParams::with_query("Stockholm")).await;

    assert_eq!(state.total, 2);
    assert_eq!(state.total_pages, 1);
    assert_eq!(state.params.query.as_deref(), Some("Stockholm"));
    assert!(!state.loading);
    assert_eq!(store.snapshot().search, state);
}

#[tokio::test]
async fn failed_search_clears_results_and_loading() {
    let (store, api) = store();
    api.push_search(ScriptedSearch::ready(Ok(page(vec![property(1, "Malmö")]))));
    api.push_search(ScriptedSearch::ready(Err(HomeGeniusError::network("connection refused"))));

    store.search(PropertySearchParams::with_query("Malmö")).await;
    let state = store.search(PropertySearchParams::with_query("Stockholm")).await;

    assert!(state.properties.is_empty());
    assert_eq!(state.total, 0);
    assert!(!state.loading);
}

#[tokio::test]
async fn loading_is_visible_while_a_search_is_pending() {
    let (store, api) = store();
    let (scripted, release) = ScriptedSearch::gated(Ok(page(vec![property(1, "Lund")])));
    api.push_search(scripted);

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.search(PropertySearchParams::default()).await }
    });
    wait_for_calls(&api, 1).await;
    assert!(store.snapshot().search.loading);

    release.send(()).unwrap();
    let state = pending.await.unwrap();
    assert!(!state.loading);
    assert_eq!(cities(&state), vec!["Lund"]);
}

#[tokio::test]
async fn stale_search_never_overwrites_a_newer_one() {
    let (store, api) = store();
    let (slow, release) = ScriptedSearch::gated(Ok(page(vec![property(1, "Uppsala")])));
    api.push_search(slow);
    api.push_search(ScriptedSearch::ready(Ok(page(vec![property(2, "Stockholm")]))));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.search(PropertySearchParams::with_query("Uppsala")).await }
    });
    wait_for_calls(&api, 1).await;

    let second = store.search(PropertySearchParams::with_query("Stockholm")).await;
    assert_eq!(cities(&second), vec!["Stockholm"]);

    release.send(()).unwrap();
    let first = first.await.unwrap();

    assert_eq!(cities(&first), vec!["Stockholm"]);
    let current = store.snapshot().search;
    assert_eq!(cities(&current), vec!["Stockholm"]);
    assert_eq!(current.params.query.as_deref(), Some("Stockholm"));
    assert!(!current.loading);
}

#[tokio::test]
async fn clear_resets_search_without_network_call() {
    let (store, api) = store();
    api.push_search(ScriptedSearch::ready(Ok(page(vec![property(1, "Göteborg")]))));
    api.push_featured(Ok(vec![property(9, "Visby")]));
    store.search(PropertySearchParams::with_query("Göteborg")).await;
    store.load_default_featured().await;
    let calls = api.call_count();

    store.clear();

    assert_eq!(api.call_count(), calls);
    let state = store.snapshot();
    assert_eq!(state.search, SearchState::default());
    assert_eq!(state.featured.properties.len(), 1);
}

#[tokio::test]
async fn clear_discards_a_search_in_flight() {
    let (store, api) = store();
    let (scripted, release) = ScriptedSearch::gated(Ok(page(vec![property(1, "Kiruna")])));
    api.push_search(scripted);

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.search(PropertySearchParams::default()).await }
    });
    wait_for_calls(&api, 1).await;
    store.clear();
    release.send(()).unwrap();
    pending.await.unwrap();

    assert_eq!(store.snapshot().search, SearchState::default());
}

#[tokio::test]
async fn featured_is_independent_of_search() {
    let (store, api) = store();
    api.push_featured(Ok(vec![property(1, "Stockholm"), property(2, "Lund")]));
    api.push_featured(Err(HomeGeniusError::Server {
        status: 502,
        detail: "bad gateway".to_string(),
    }));

    let featured = store.load_featured(2).await;
    assert_eq!(featured.properties.len(), 2);
    assert!(!featured.loading);
    assert_eq!(store.snapshot().search, SearchState::default());

    let featured = store.load_featured(2).await;
    assert!(featured.properties.is_empty());
    assert!(!featured.loading);
}

#[tokio::test]
async fn get_by_id_treats_any_failure_as_absent() {
    let (store, _api) = store();

    assert_eq!(store.get_by_id(1).await.map(|p| p.id), Some(1));
    assert!(store.get_by_id(999).await.is_none());
    assert!(store.get_by_id(500).await.is_none());
    assert_eq!(store.snapshot(), CatalogState::default());
}

#[tokio::test]
async fn subscribers_see_search_results() {
    let (store, api) = store();
    api.push_search(ScriptedSearch::ready(Ok(page(vec![property(1, "Umeå")]))));
    let mut updates = store.subscribe();

    store.search(PropertySearchParams::default()).await;

    assert!(updates.has_changed().unwrap());
    assert_eq!(cities(&updates.borrow_and_update().search), vec!["Umeå"]);
}
