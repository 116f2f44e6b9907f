//! # Credential
//!
//! The stored record: a username/password pair scoped to an environment.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single stored credential.
///
/// `(environment, username)` is the identity of a credential within a store;
/// `id` is assigned by the repository when the record is first saved and is
/// never chosen by the caller.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
  #[serde(default)]
  pub id: String,
  pub environment: String,
  pub username: String,
  pub password: String,
  #[serde(default)]
  pub nickname: String,
}

/// An ordered collection of credentials, in insertion order.
pub type Credentials = Vec<Credential>;

impl Credential {
  /// Build an unsaved credential. The ID stays empty until the repository
  /// stores it.
  pub fn new(
    environment: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    nickname: impl Into<String>,
  ) -> Self {
    Self {
      id: String::new(),
      environment: environment.into(),
      username: username.into(),
      password: password.into(),
      nickname: nickname.into(),
    }
  }

  /// Check that every required field is present. The nickname is optional.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.environment.is_empty() {
      return Err(ValidationError::MissingEnvironment);
    }
    if self.username.is_empty() {
      return Err(ValidationError::MissingUsername);
    }
    if self.password.is_empty() {
      return Err(ValidationError::MissingPassword);
    }
    Ok(())
  }

  /// Whether `other` has the same identity as this credential.
  pub fn same_identity(&self, other: &Self) -> bool {
    self.environment == other.environment && self.username == other.username
  }
}

// Passwords must never reach logs or panic output.
impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("id", &self.id)
      .field("environment", &self.environment)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("nickname", &self.nickname)
      .finish()
  }
}
