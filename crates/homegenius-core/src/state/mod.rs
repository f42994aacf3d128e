//! Client state that survives restarts.

pub mod model;
pub mod repository;

pub use model::PersistedState;
pub use repository::StateRepository;
