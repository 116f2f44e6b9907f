//! # Errors
//!
//! The error taxonomy shared by the credential repository and service.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A required credential field was left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("environment is required")]
  MissingEnvironment,
  #[error("username is required")]
  MissingUsername,
  #[error("password is required")]
  MissingPassword,
}

/// Errors produced by credential storage and the rules layered over it.
#[derive(Debug, Error)]
pub enum CredentialError {
  /// The credential failed validation before anything was persisted.
  #[error("invalid credential: {0}")]
  Validation(#[from] ValidationError),

  /// A credential with the same environment and username is already stored.
  #[error("credential for environment '{environment}' and username '{username}' already exists")]
  Duplicate { environment: String, username: String },

  /// No stored credential carries the requested ID.
  #[error("credential with ID '{0}' not found")]
  NotFound(String),

  /// The store file exists but does not contain a valid credential list.
  #[error("failed to decode credentials from {}", path.display())]
  Decode {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// The in-memory collection could not be serialized.
  #[error("failed to encode credentials")]
  Encode(#[source] serde_json::Error),

  /// A filesystem operation on the store failed.
  #[error("I/O error on {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl CredentialError {
  /// Returns true when the error only means "no such credential".
  pub const fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound(_))
  }

  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

/// Result alias for credential operations.
pub type Result<T, E = CredentialError> = std::result::Result<T, E>;
