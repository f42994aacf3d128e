use homegenius_core::property::{
    DEFAULT_FEATURED_LIMIT, Property, PropertyApi, PropertyId, PropertyPage, PropertySearchParams,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Result of the most recent completed search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Parameters of the last search issued (not necessarily completed).
    pub params: PropertySearchParams,
    pub properties: Vec<Property>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub loading: bool,
}

impl SearchState {
    fn apply_page(&mut self, page: PropertyPage) {
        self.properties = page.properties;
        self.total = page.total;
        self.page = page.page;
        self.limit = page.limit;
        self.total_pages = page.total_pages;
    }

    fn clear_results(&mut self) {
        self.properties.clear();
        self.total = 0;
        self.page = 0;
        self.limit = 0;
        self.total_pages = 0;
    }
}

/// Featured listings, refreshed independently of searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedState {
    pub properties: Vec<Property>,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub search: SearchState,
    pub featured: FeaturedState,
}

/// Search results and featured listings for the presentation layer.
///
/// Read operations never fail: errors are logged and leave an empty result.
/// Each search or featured refresh takes a generation number, and only the
/// newest one of its kind may write its result.
pub struct PropertyCatalogStore {
    api: Arc<dyn PropertyApi>,
    state: watch::Sender<CatalogState>,
    search_generation: AtomicU64,
    featured_generation: AtomicU64,
}

impl PropertyCatalogStore {
    pub fn new(api: Arc<dyn PropertyApi>) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            api,
            state,
            search_generation: AtomicU64::new(0),
            featured_generation: AtomicU64::new(0),
        }
    }

    /// Runs a search and returns the search state once it has settled.
    ///
    /// If a newer search (or a [`clear`](Self::clear)) started meanwhile,
    /// this response is dropped and the returned state is the current one.
    pub async fn search(&self, params: PropertySearchParams) -> SearchState {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.search.params = params.clone();
            state.search.loading = true;
        });
        tracing::debug!("[PropertyCatalog] Search #{} started", generation);

        let result = self.api.search(&params).await;

        self.state.send_if_modified(|state| {
            if self.search_generation.load(Ordering::SeqCst) != generation {
                tracing::debug!("[PropertyCatalog] Dropping stale search #{}", generation);
                return false;
            }
            match result {
                Ok(page) => {
                    tracing::debug!(
                        "[PropertyCatalog] Search #{} returned {} of {}",
                        generation,
                        page.properties.len(),
                        page.total
                    );
                    state.search.apply_page(page);
                }
                Err(e) => {
                    tracing::warn!("[PropertyCatalog] Search failed: {}", e);
                    state.search.clear_results();
                }
            }
            state.search.loading = false;
            true
        });

        self.state.borrow().search.clone()
    }

    /// Refreshes the featured list with the same discipline as `search`.
    pub async fn load_featured(&self, limit: u32) -> FeaturedState {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.featured_generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.featured.loading = true;
        });

        let result = self.api.featured(limit).await;

        self.state.send_if_modified(|state| {
            if self.featured_generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.featured.properties = match result {
                Ok(properties) => properties,
                Err(e) => {
                    tracing::warn!("[PropertyCatalog] Loading featured listings failed: {}", e);
                    Vec::new()
                }
            };
            state.featured.loading = false;
            true
        });

        self.state.borrow().featured.clone()
    }

    /// [`load_featured`](Self::load_featured) with [`DEFAULT_FEATURED_LIMIT`].
    pub async fn load_default_featured(&self) -> FeaturedState {
        self.load_featured(DEFAULT_FEATURED_LIMIT).await
    }

    /// Fetches one listing for the caller; nothing is stored. Any failure,
    /// a missing listing included, is `None`.
    pub async fn get_by_id(&self, id: PropertyId) -> Option<Property> {
        match self.api.get_by_id(id).await {
            Ok(property) => Some(property),
            Err(e) if e.is_not_found() => {
                tracing::debug!("[PropertyCatalog] Property {} not found", id);
                None
            }
            Err(e) => {
                tracing::warn!("[PropertyCatalog] Loading property {} failed: {}", id, e);
                None
            }
        }
    }

    /// Resets the search state without a network call. A search still in
    /// flight will not repopulate it.
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            self.search_generation.fetch_add(1, Ordering::SeqCst);
            state.search = SearchState::default();
        });
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[path = "property_catalog_test.rs"]
mod tests;
