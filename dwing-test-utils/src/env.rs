//! Environment variable management for testing
//!
//! This module provides utilities for managing XDG environment variables
//! during testing so that config lookups never touch the real user
//! directories.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test environment that overrides XDG directories to use a per-test
/// temporary directory
///
/// The original values are restored when the guard is dropped. Because the
/// process environment is shared, only one guard should be alive at a time.
pub struct EnvTestGuard {
  /// The temporary directory that will be used for XDG directories
  pub temp_dir: TempDir,
  /// Original values of the overridden variables, in [`Self::VARS`] order
  originals: Vec<Option<String>>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const XDG_CACHE_HOME: &'static str = "XDG_CACHE_HOME";

  const VARS: [(&'static str, &'static str); 3] = [
    (Self::XDG_CONFIG_HOME, "config"),
    (Self::XDG_DATA_HOME, "data"),
    (Self::XDG_CACHE_HOME, "cache"),
  ];

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let originals = Self::VARS.iter().map(|(var, _)| env::var(var).ok()).collect();

    for (var, subdir) in Self::VARS {
      let path = temp_dir.path().join(subdir);
      std::fs::create_dir_all(&path).expect("Failed to create XDG directory");
      // SAFETY: test-only; callers keep a single guard alive at a time.
      unsafe {
        env::set_var(var, path);
      }
    }

    Self { temp_dir, originals }
  }

  /// Create the XDG directories without touching this process's environment.
  ///
  /// Use [`Self::vars`] to pass them to a child process instead.
  pub fn isolated() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    for (_, subdir) in Self::VARS {
      std::fs::create_dir_all(temp_dir.path().join(subdir)).expect("Failed to create XDG directory");
    }

    Self {
      temp_dir,
      originals: Vec::new(),
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Get the path to the XDG cache directory
  pub fn cache_dir(&self) -> PathBuf {
    self.temp_dir.path().join("cache")
  }

  /// The variables to hand to a child process so it sees the same XDG
  /// directories without touching this process's environment.
  pub fn vars(&self) -> Vec<(&'static str, PathBuf)> {
    vec![
      (Self::XDG_CONFIG_HOME, self.config_dir()),
      (Self::XDG_DATA_HOME, self.data_dir()),
      (Self::XDG_CACHE_HOME, self.cache_dir()),
    ]
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    // Restore original XDG environment variables. Isolated guards recorded
    // nothing and restore nothing.
    for ((var, _), original) in Self::VARS.iter().zip(&self.originals) {
      // SAFETY: mirrors the test-only mutation in `new`.
      match original {
        Some(val) => unsafe {
          env::set_var(var, val);
        },
        None => unsafe {
          env::remove_var(var);
        },
      }
    }
  }
}
