//! Property domain module.
//!
//! # Module Structure
//!
//! - `model`: listing, search parameters and result page
//! - `api`: the remote property catalog trait
//!
//! # Usage
//!
//! ```ignore
//! use homegenius_core::property::{Property, PropertySearchParams, PropertyApi};
//! ```

mod api;
mod model;

pub use api::{DEFAULT_FEATURED_LIMIT, PropertyApi};
pub use model::{
    Property, PropertyDraft, PropertyId, PropertyPage, PropertyPatch, PropertySearchParams,
};
