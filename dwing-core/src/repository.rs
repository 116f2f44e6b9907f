//! # Credential Repository
//!
//! Durable storage of the full credential collection. Every operation reads
//! the whole store, works on it in memory and, for mutations, rewrites the
//! whole store. The store is small and owned by a single user, so there is no
//! incremental update or index.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::credential::{Credential, Credentials};
use crate::error::{CredentialError, Result};
use crate::platform;

/// Storage operations the credential service relies on.
pub trait CredentialRepository {
  /// Read the full collection, in stored order.
  fn load(&self) -> Result<Credentials>;

  /// Replace the stored collection with `credentials`.
  fn save(&self, credentials: &[Credential]) -> Result<()>;

  /// Read the full collection. Same as [`CredentialRepository::load`].
  fn get_all(&self) -> Result<Credentials> {
    self.load()
  }

  /// Find the credential with the given ID.
  fn get_by_id(&self, id: &str) -> Result<Credential> {
    self
      .load()?
      .into_iter()
      .find(|c| c.id == id)
      .ok_or_else(|| CredentialError::NotFound(id.to_string()))
  }

  /// Credentials whose environment is exactly `environment`, in stored order.
  ///
  /// An empty `environment` is not a wildcard and matches nothing.
  fn get_by_env(&self, environment: &str) -> Result<Credentials> {
    let mut credentials = self.load()?;
    credentials.retain(|c| c.environment == environment);
    Ok(credentials)
  }

  /// Remove the credential with the given ID. The store is not touched when
  /// no credential matches.
  fn remove_by_id(&self, id: &str) -> Result<()> {
    let mut credentials = self.load()?;
    let index = credentials
      .iter()
      .position(|c| c.id == id)
      .ok_or_else(|| CredentialError::NotFound(id.to_string()))?;

    credentials.remove(index);
    self.save(&credentials)
  }

  /// Whether a credential with the same environment and username is stored.
  fn check_duplicate(&self, credential: &Credential) -> Result<bool> {
    Ok(self.load()?.iter().any(|c| c.same_identity(credential)))
  }

  /// Store `credential` under a freshly generated ID, replacing whatever ID
  /// it carried, and return the stored record.
  fn add(&self, mut credential: Credential) -> Result<Credential> {
    let mut credentials = self.load()?;
    credential.id = Uuid::new_v4().to_string();
    credentials.push(credential.clone());
    self.save(&credentials)?;
    Ok(credential)
  }
}

/// A repository backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonRepository {
  path: PathBuf,
}

impl JsonRepository {
  /// Create a repository for the store file at `path`.
  ///
  /// The path is expected to be absolute. Nothing is read or created until
  /// the first operation.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// The store file this repository reads and writes.
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl CredentialRepository for JsonRepository {
  fn load(&self) -> Result<Credentials> {
    let data = match fs::read(&self.path) {
      Ok(data) => data,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "credential store does not exist yet");
        return Ok(Credentials::new());
      }
      Err(e) => return Err(CredentialError::io(&self.path, e)),
    };

    if data.is_empty() {
      debug!(path = %self.path.display(), "credential store is empty");
      return Ok(Credentials::new());
    }

    // A literal `null` document is an empty store.
    let credentials = serde_json::from_slice::<Option<Credentials>>(&data)
      .map_err(|source| CredentialError::Decode {
        path: self.path.clone(),
        source,
      })?
      .unwrap_or_default();

    debug!(path = %self.path.display(), count = credentials.len(), "loaded credentials");
    Ok(credentials)
  }

  fn save(&self, credentials: &[Credential]) -> Result<()> {
    if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      platform::create_private_dir_all(dir).map_err(|e| CredentialError::io(dir, e))?;
    }

    let data = serde_json::to_vec_pretty(credentials).map_err(CredentialError::Encode)?;
    platform::write_private_file(&self.path, &data).map_err(|e| CredentialError::io(&self.path, e))?;

    debug!(path = %self.path.display(), count = credentials.len(), "saved credentials");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use dwing_test_utils::StoreGuard;

  use super::*;

  fn repo(guard: &StoreGuard) -> JsonRepository {
    JsonRepository::new(guard.store_path())
  }

  fn stored(id: &str, environment: &str, username: &str) -> Credential {
    let mut cred = Credential::new(environment, username, "secret", "");
    cred.id = id.to_string();
    cred
  }

  #[test]
  fn test_load_missing_file_is_empty() {
    let guard = StoreGuard::new();
    assert!(!guard.store_path().exists());
    assert_eq!(repo(&guard).path(), guard.store_path());

    let creds = repo(&guard).load().unwrap();
    assert!(creds.is_empty());
  }

  #[test]
  fn test_load_zero_length_file_is_empty() {
    let guard = StoreGuard::with_content("");

    let creds = repo(&guard).load().unwrap();
    assert!(creds.is_empty());
  }

  #[test]
  fn test_load_malformed_json_is_decode_error() {
    let guard = StoreGuard::with_content(r#"{"invalid": json}"#);

    let err = repo(&guard).load().unwrap_err();
    assert!(matches!(err, CredentialError::Decode { .. }), "unexpected error: {err:?}");
  }

  #[test]
  fn test_load_null_document_is_empty() {
    let guard = StoreGuard::with_content("null");

    let creds = repo(&guard).load().unwrap();
    assert!(creds.is_empty());
  }

  #[test]
  fn test_load_wrong_shape_is_decode_error() {
    let guard = StoreGuard::with_content(r#"{"id": "1"}"#);

    let err = repo(&guard).load().unwrap_err();
    assert!(matches!(err, CredentialError::Decode { .. }), "unexpected error: {err:?}");
  }

  #[test]
  fn test_load_directory_is_io_error() {
    let guard = StoreGuard::new();
    fs::create_dir_all(guard.store_path()).unwrap();

    let err = repo(&guard).load().unwrap_err();
    assert!(matches!(err, CredentialError::Io { .. }), "unexpected error: {err:?}");
  }

  #[test]
  fn test_save_then_load_preserves_order() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    let creds = vec![
      stored("1", "prod", "zed"),
      stored("2", "dev", "alice"),
      stored("3", "dev", "bob"),
    ];

    repo.save(&creds).unwrap();

    assert_eq!(repo.load().unwrap(), creds);
  }

  #[test]
  fn test_save_writes_indented_json() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);

    repo.save(&[]).unwrap();
    assert_eq!(guard.read(), "[]");

    repo.save(&[stored("1", "dev", "alice")]).unwrap();
    let expected = r#"[
  {
    "id": "1",
    "environment": "dev",
    "username": "alice",
    "password": "secret",
    "nickname": ""
  }
]"#;
    assert_eq!(guard.read(), expected);
  }

  #[test]
  fn test_save_under_regular_file_is_io_error() {
    let guard = StoreGuard::new();
    let blocker = guard.root().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let repo = JsonRepository::new(blocker.join("credentials.json"));

    let err = repo.save(&[stored("1", "dev", "alice")]).unwrap_err();

    assert!(matches!(err, CredentialError::Io { .. }), "unexpected error: {err:?}");
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    assert!(!blocker.join("credentials.json").exists());
  }

  #[test]
  #[cfg(unix)]
  fn test_save_uses_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let guard = StoreGuard::new();
    assert!(!guard.store_dir().exists());

    repo(&guard).save(&[stored("1", "dev", "alice")]).unwrap();

    let file_mode = fs::metadata(guard.store_path()).unwrap().permissions().mode();
    assert_eq!(file_mode & 0o777, 0o600);

    let dir_mode = fs::metadata(guard.store_dir()).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
  }

  #[test]
  fn test_add_assigns_fresh_ids() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);

    let mut supplied = Credential::new("dev", "alice", "p1", "");
    supplied.id = "caller-chosen".to_string();

    let first = repo.add(supplied).unwrap();
    let second = repo.add(Credential::new("prod", "alice", "p2", "")).unwrap();

    assert_ne!(first.id, "caller-chosen");
    assert!(Uuid::parse_str(&first.id).is_ok());
    assert_ne!(first.id, second.id);
    assert_eq!(repo.load().unwrap(), vec![first, second]);
  }

  #[test]
  fn test_get_by_id() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo.save(&[stored("1", "dev", "alice"), stored("2", "prod", "bob")]).unwrap();

    assert_eq!(repo.get_by_id("2").unwrap().username, "bob");

    let err = repo.get_by_id("3").unwrap_err();
    assert!(err.is_not_found());
  }

  #[test]
  fn test_get_by_env_filters_in_order() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo
      .save(&[
        stored("1", "dev", "alice"),
        stored("2", "prod", "alice"),
        stored("3", "dev", "bob"),
      ])
      .unwrap();

    let dev: Vec<_> = repo.get_by_env("dev").unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(dev, vec!["1", "3"]);

    let prod = repo.get_by_env("prod").unwrap();
    assert_eq!(prod.len(), 1);
    assert_eq!(prod[0].id, "2");

    assert!(repo.get_by_env("staging").unwrap().is_empty());
  }

  #[test]
  fn test_get_by_env_empty_matches_nothing() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo.save(&[stored("1", "dev", "alice")]).unwrap();

    assert!(repo.get_by_env("").unwrap().is_empty());
  }

  #[test]
  fn test_remove_by_id_removes_only_that_record() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo
      .save(&[
        stored("1", "dev", "alice"),
        stored("2", "prod", "alice"),
        stored("3", "dev", "bob"),
      ])
      .unwrap();

    repo.remove_by_id("2").unwrap();

    let ids: Vec<_> = repo.load().unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["1", "3"]);
  }

  #[test]
  fn test_remove_by_id_first_match_only() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo.save(&[stored("1", "dev", "alice"), stored("1", "prod", "bob")]).unwrap();

    repo.remove_by_id("1").unwrap();

    let remaining = repo.load().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].username, "bob");
  }

  #[test]
  fn test_remove_missing_id_leaves_file_untouched() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo.save(&[stored("1", "dev", "alice")]).unwrap();
    let before = fs::read(guard.store_path()).unwrap();

    let err = repo.remove_by_id("nope").unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(fs::read(guard.store_path()).unwrap(), before);
  }

  #[test]
  fn test_remove_from_missing_store_does_not_create_it() {
    let guard = StoreGuard::new();

    let err = repo(&guard).remove_by_id("nope").unwrap_err();

    assert!(err.is_not_found());
    assert!(!guard.store_path().exists());
  }

  #[test]
  fn test_check_duplicate_ignores_nickname_and_password() {
    let guard = StoreGuard::new();
    let repo = repo(&guard);
    repo.save(&[stored("1", "dev", "alice")]).unwrap();

    assert!(repo.check_duplicate(&Credential::new("dev", "alice", "other", "nick")).unwrap());
    assert!(!repo.check_duplicate(&Credential::new("prod", "alice", "secret", "")).unwrap());
    assert!(!repo.check_duplicate(&Credential::new("dev", "bob", "secret", "")).unwrap());
  }

  #[test]
  fn test_operations_propagate_decode_errors() {
    let guard = StoreGuard::with_content("not json");
    let repo = repo(&guard);

    assert!(matches!(repo.get_all(), Err(CredentialError::Decode { .. })));
    assert!(matches!(repo.get_by_id("1"), Err(CredentialError::Decode { .. })));
    assert!(matches!(repo.get_by_env("dev"), Err(CredentialError::Decode { .. })));
    assert!(matches!(repo.remove_by_id("1"), Err(CredentialError::Decode { .. })));
    assert!(matches!(
      repo.add(Credential::new("dev", "alice", "p1", "")),
      Err(CredentialError::Decode { .. })
    ));

    // The corrupt store is never overwritten.
    assert_eq!(guard.read(), "not json");
  }
}
