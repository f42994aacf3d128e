//! User and authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: account record, credentials, token response
//! - `api`: the remote authentication trait

mod api;
mod model;

pub use api::AuthApi;
pub use model::{AccessToken, LoginCredentials, PreferenceBag, RegisterData, User, UserId};
