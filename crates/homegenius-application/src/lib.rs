//! Application layer for HomeGenius.
//!
//! Reactive stores the presentation layer reads and drives: the auth
//! session, the property catalog and the active locale. Each publishes its
//! state on a `tokio::sync::watch` channel.

pub mod auth_session;
pub mod context;
pub mod locale_service;
pub mod property_catalog;

#[cfg(test)]
mod test_support;

pub use auth_session::{AuthSessionStore, SessionState};
pub use context::AppContext;
pub use locale_service::LocaleService;
pub use property_catalog::{CatalogState, FeaturedState, PropertyCatalogStore, SearchState};
