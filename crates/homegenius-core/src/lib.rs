//! Domain layer of the HomeGenius client.
//!
//! Holds the wire models, the error taxonomy, the localization registry and
//! the traits the infrastructure layer implements (remote APIs, persisted
//! state). Nothing in here performs I/O.

pub mod analysis;
pub mod config;
pub mod error;
pub mod event;
pub mod locale;
pub mod property;
pub mod recommendation;
pub mod state;
pub mod user;

// Re-export common error type
pub use error::{HomeGeniusError, Result};
pub use event::ClientEvent;
