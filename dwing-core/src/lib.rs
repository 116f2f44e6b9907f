//! # Dwing Core Library
//!
//! Credential persistence and the rules around it: the [`Credential`] entity,
//! the JSON-file backed [`JsonRepository`], the [`CredentialService`] that
//! enforces validation and uniqueness, and the configuration that decides
//! where the store lives.

pub mod config;
pub mod credential;
pub mod error;
pub mod platform;
pub mod repository;
pub mod service;

// Re-export main types
pub use config::{Config, ConfigDirs, get_config_dirs};
pub use credential::{Credential, Credentials};
pub use error::{CredentialError, Result, ValidationError};
pub use repository::{CredentialRepository, JsonRepository};
pub use service::CredentialService;

/// Build the service for the store a config points at.
pub fn open_service(config: &Config) -> CredentialService<JsonRepository> {
  CredentialService::new(JsonRepository::new(&config.credentials_path))
}
