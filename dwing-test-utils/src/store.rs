//! Temporary credential stores for testing
//!
//! Store files live at a nested path inside a fresh temporary directory, so
//! tests can observe the parent directory being created on first save.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII guard for a test credential store
///
/// The store path is `<tmp>/dwing/credentials.json`. Neither the `dwing`
/// directory nor the file exist unless the guard was seeded with content.
/// Everything is removed when the guard is dropped.
pub struct StoreGuard {
  temp_dir: TempDir,
  store_path: PathBuf,
}

impl Default for StoreGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl StoreGuard {
  /// Create a guard whose store file does not exist yet
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store_path = temp_dir.path().join("dwing").join("credentials.json");

    Self { temp_dir, store_path }
  }

  /// Create a guard whose store file already holds `content`
  pub fn with_content(content: &str) -> Self {
    let guard = Self::new();
    guard.write(content);
    guard
  }

  /// Path of the store file
  pub fn store_path(&self) -> &Path {
    &self.store_path
  }

  /// Directory holding the store file
  pub fn store_dir(&self) -> &Path {
    self.store_path.parent().expect("store path always has a parent")
  }

  /// Root of the temporary directory
  pub fn root(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Overwrite the store file, creating its directory if needed
  pub fn write(&self, content: &str) {
    fs::create_dir_all(self.store_dir()).expect("Failed to create store directory");
    fs::write(&self.store_path, content).expect("Failed to write test store");
  }

  /// Read the store file as a string
  pub fn read(&self) -> String {
    fs::read_to_string(&self.store_path).expect("Failed to read test store")
  }

  /// Read the raw bytes of the store file
  pub fn read_bytes(&self) -> Vec<u8> {
    fs::read(&self.store_path).expect("Failed to read test store")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_guard_has_no_store() {
    let guard = StoreGuard::new();
    assert!(!guard.store_path().exists());
    assert!(!guard.store_dir().exists());
    assert!(guard.store_path().starts_with(guard.root()));
  }

  #[test]
  fn test_with_content_seeds_store() {
    let guard = StoreGuard::with_content("[]");
    assert_eq!(guard.read(), "[]");
    assert_eq!(guard.read_bytes(), b"[]");
  }

  #[test]
  fn test_cleanup_on_drop() {
    let root = {
      let guard = StoreGuard::with_content("[]");
      guard.root().to_path_buf()
    };
    assert!(!root.exists());
  }
}
