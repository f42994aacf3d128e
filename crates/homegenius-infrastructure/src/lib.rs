//! Infrastructure layer of the HomeGenius client: the HTTP API client,
//! file-backed state and configuration.

pub mod api_client;
pub mod config_service;
pub mod memory_state_repository;
pub mod paths;
pub mod storage;
pub mod toml_state_repository;

pub use crate::api_client::HttpApiClient;
pub use crate::config_service::ConfigService;
pub use crate::memory_state_repository::InMemoryStateRepository;
pub use crate::paths::HomeGeniusPaths;
pub use crate::toml_state_repository::TomlStateRepository;
