//! # Utility Functions
//!
//! Shared helpers for command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use dwing_core::{Config, CredentialService, JsonRepository, get_config_dirs};

pub mod output;

/// Resolve the config for this invocation from the user's config directories.
pub fn load_config(store: Option<&Path>) -> Result<Config> {
  let config_dirs = get_config_dirs()?;
  Config::load(&config_dirs, store).context("Failed to load config")
}

/// Open the credential service on the store the resolved config points at.
pub fn open_service(store: Option<&Path>) -> Result<CredentialService<JsonRepository>> {
  let service = dwing_core::open_service(&load_config(store)?);
  tracing::debug!(path = %service.repository().path().display(), "using credential store");

  Ok(service)
}
