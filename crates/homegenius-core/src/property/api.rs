//! Remote property catalog trait.

use async_trait::async_trait;

use super::model::{Property, PropertyDraft, PropertyId, PropertyPage, PropertyPatch, PropertySearchParams};
use crate::error::Result;

/// Number of featured listings requested when the caller does not say.
pub const DEFAULT_FEATURED_LIMIT: u32 = 10;

/// Access to the backend's `/api/properties` endpoints.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Runs a filtered, paginated search.
    async fn search(&self, params: &PropertySearchParams) -> Result<PropertyPage>;

    /// Fetches one listing. A missing listing is `HomeGeniusError::NotFound`.
    async fn get_by_id(&self, id: PropertyId) -> Result<Property>;

    async fn featured(&self, limit: u32) -> Result<Vec<Property>>;

    async fn create(&self, draft: &PropertyDraft) -> Result<Property>;

    async fn update(&self, id: PropertyId, patch: &PropertyPatch) -> Result<Property>;

    async fn delete(&self, id: PropertyId) -> Result<()>;
}
