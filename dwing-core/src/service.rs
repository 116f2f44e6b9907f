//! # Credential Service
//!
//! Business rules on top of a [`CredentialRepository`]: validation,
//! duplicate rejection and not-found semantics. Holds no state between calls.

use tracing::{debug, info};

use crate::credential::{Credential, Credentials};
use crate::error::{CredentialError, Result};
use crate::repository::CredentialRepository;

/// Orchestrates credential operations over a repository.
#[derive(Debug, Clone)]
pub struct CredentialService<R> {
  repo: R,
}

impl<R: CredentialRepository> CredentialService<R> {
  pub const fn new(repo: R) -> Self {
    Self { repo }
  }

  /// The underlying repository.
  pub const fn repository(&self) -> &R {
    &self.repo
  }

  /// Validate and store a new credential, returning it with its assigned ID.
  ///
  /// # Errors
  ///
  /// * [`CredentialError::Validation`] if a required field is empty.
  /// * [`CredentialError::Duplicate`] if the environment/username pair is
  ///   already stored.
  /// * Any load or save error from the repository.
  pub fn add_credential(&self, credential: Credential) -> Result<Credential> {
    credential.validate()?;

    if self.repo.check_duplicate(&credential)? {
      return Err(CredentialError::Duplicate {
        environment: credential.environment,
        username: credential.username,
      });
    }

    let stored = self.repo.add(credential)?;
    info!(id = %stored.id, environment = %stored.environment, "added credential");
    Ok(stored)
  }

  /// List stored credentials. An empty `environment` means no filter.
  pub fn list_credentials(&self, environment: &str) -> Result<Credentials> {
    if environment.is_empty() {
      debug!("listing all credentials");
      self.repo.get_all()
    } else {
      debug!(environment, "listing credentials for environment");
      self.repo.get_by_env(environment)
    }
  }

  /// Look up a single credential by ID.
  pub fn get_credential(&self, id: &str) -> Result<Credential> {
    self.repo.get_by_id(id)
  }

  /// Remove a credential by ID. A missing ID yields
  /// [`CredentialError::NotFound`] and leaves the store unchanged.
  pub fn remove_credential(&self, id: &str) -> Result<()> {
    self.repo.remove_by_id(id)?;
    info!(id, "removed credential");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use dwing_test_utils::StoreGuard;

  use super::*;
  use crate::error::ValidationError;
  use crate::repository::JsonRepository;

  /// In-memory repository that counts saves.
  #[derive(Default)]
  struct MemoryRepository {
    credentials: RefCell<Credentials>,
    saves: RefCell<usize>,
  }

  impl CredentialRepository for MemoryRepository {
    fn load(&self) -> Result<Credentials> {
      Ok(self.credentials.borrow().clone())
    }

    fn save(&self, credentials: &[Credential]) -> Result<()> {
      *self.credentials.borrow_mut() = credentials.to_vec();
      *self.saves.borrow_mut() += 1;
      Ok(())
    }
  }

  fn json_service(guard: &StoreGuard) -> CredentialService<JsonRepository> {
    CredentialService::new(JsonRepository::new(guard.store_path()))
  }

  #[test]
  fn test_add_rejects_invalid_before_persisting() {
    let service = CredentialService::new(MemoryRepository::default());

    let err = service
      .add_credential(Credential::new("dev", "alice", "", ""))
      .unwrap_err();

    assert!(matches!(
      err,
      CredentialError::Validation(ValidationError::MissingPassword)
    ));
    assert_eq!(*service.repository().saves.borrow(), 0);
  }

  #[test]
  fn test_add_rejects_duplicate_pair() {
    let guard = StoreGuard::new();
    let service = json_service(&guard);

    service.add_credential(Credential::new("dev", "alice", "p1", "")).unwrap();
    let err = service
      .add_credential(Credential::new("dev", "alice", "p2", "other"))
      .unwrap_err();

    match err {
      CredentialError::Duplicate { environment, username } => {
        assert_eq!(environment, "dev");
        assert_eq!(username, "alice");
      }
      other => panic!("expected duplicate error, got {other:?}"),
    }

    let matching: Vec<_> = service
      .list_credentials("")
      .unwrap()
      .into_iter()
      .filter(|c| c.environment == "dev" && c.username == "alice")
      .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].password, "p1");
  }

  #[test]
  fn test_same_username_in_other_environment_is_allowed() {
    let guard = StoreGuard::new();
    let service = json_service(&guard);

    let dev = service.add_credential(Credential::new("dev", "alice", "p1", "")).unwrap();
    let prod = service.add_credential(Credential::new("prod", "alice", "p2", "")).unwrap();

    assert_eq!(service.list_credentials("dev").unwrap(), vec![dev]);
    assert_eq!(service.list_credentials("prod").unwrap(), vec![prod]);
  }

  #[test]
  fn test_list_empty_environment_returns_all_in_order() {
    let guard = StoreGuard::new();
    let service = json_service(&guard);

    let a = service.add_credential(Credential::new("dev", "alice", "p", "")).unwrap();
    let b = service.add_credential(Credential::new("prod", "bob", "p", "")).unwrap();
    let c = service.add_credential(Credential::new("dev", "carol", "p", "")).unwrap();

    assert_eq!(service.list_credentials("").unwrap(), vec![a.clone(), b, c.clone()]);
    assert_eq!(service.list_credentials("dev").unwrap(), vec![a, c]);
  }

  #[test]
  fn test_list_propagates_decode_error() {
    let guard = StoreGuard::with_content("[{");
    let service = json_service(&guard);

    assert!(matches!(
      service.list_credentials(""),
      Err(CredentialError::Decode { .. })
    ));
  }

  #[test]
  fn test_get_and_remove_credential() {
    let guard = StoreGuard::new();
    let service = json_service(&guard);

    let stored = service.add_credential(Credential::new("dev", "alice", "p1", "work")).unwrap();
    assert_eq!(service.get_credential(&stored.id).unwrap(), stored);

    service.remove_credential(&stored.id).unwrap();

    assert!(service.get_credential(&stored.id).unwrap_err().is_not_found());
    assert!(service.list_credentials("").unwrap().is_empty());
  }

  #[test]
  fn test_remove_missing_is_not_found() {
    let service = CredentialService::new(MemoryRepository::default());

    let err = service.remove_credential("missing").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(*service.repository().saves.borrow(), 0);
  }
}
