//! # Configuration Management
//!
//! Resolves where dwing keeps its files, including XDG base directory support,
//! and which credential store a command operates on.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable that overrides the credential store location.
pub const CREDENTIALS_PATH_ENV: &str = "DWING_CREDENTIALS_PATH";

/// Name of the store file inside the config directory.
pub const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Name of the optional config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Represents the configuration directories for the dwing application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: Option<PathBuf>,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "dwing").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: Some(proj_dirs.cache_dir().to_path_buf()),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the cache directory
  pub fn cache_dir(&self) -> Option<&PathBuf> {
    self.cache_dir.as_ref()
  }

  /// Initialize the configuration directories
  pub fn init(&self) -> Result<()> {
    crate::platform::create_private_dir_all(&self.config_dir).context("Failed to create config directory")?;
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    if let Some(cache_dir) = &self.cache_dir {
      fs::create_dir_all(cache_dir).context("Failed to create cache directory")?;
    }

    Ok(())
  }

  /// Get the path to the config file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Get the default path of the credential store
  pub fn default_credentials_path(&self) -> PathBuf {
    self.config_dir.join(CREDENTIALS_FILE_NAME)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
  credentials_path: Option<PathBuf>,
}

/// Settings a command runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub credentials_path: PathBuf,
}

impl Config {
  /// Create a validated config for the given store path.
  pub fn new(credentials_path: impl Into<PathBuf>) -> Result<Self> {
    let config = Self {
      credentials_path: credentials_path.into(),
    };
    config.validate()?;
    Ok(config)
  }

  /// The store path must be present and absolute.
  pub fn validate(&self) -> Result<()> {
    if self.credentials_path.as_os_str().is_empty() {
      bail!("credentials path cannot be empty");
    }
    if !self.credentials_path.is_absolute() {
      bail!(
        "credentials path must be an absolute path: {}",
        self.credentials_path.display()
      );
    }
    Ok(())
  }

  /// Resolve the config for this invocation.
  ///
  /// Precedence: `store_override` (made absolute against the current
  /// directory), then [`CREDENTIALS_PATH_ENV`], then `credentials_path` in
  /// `config.toml`, then [`ConfigDirs::default_credentials_path`].
  pub fn load(config_dirs: &ConfigDirs, store_override: Option<&Path>) -> Result<Self> {
    Self::resolve(config_dirs, store_override, env::var_os(CREDENTIALS_PATH_ENV))
  }

  /// [`Config::load`] with the value of [`CREDENTIALS_PATH_ENV`] passed in
  /// instead of read from the process environment.
  pub fn resolve(config_dirs: &ConfigDirs, store_override: Option<&Path>, env_path: Option<OsString>) -> Result<Self> {
    if let Some(path) = store_override {
      let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve credentials path {}", path.display()))?;
      debug!(path = %absolute.display(), "using credentials path from command line");
      return Self::new(absolute);
    }

    if let Some(path) = env_path {
      debug!("using credentials path from {CREDENTIALS_PATH_ENV}");
      return Self::new(path).with_context(|| format!("Invalid {CREDENTIALS_PATH_ENV}"));
    }

    let config_path = config_dirs.config_path();
    if config_path.exists() {
      let file = read_config_file(&config_path)?;
      if let Some(path) = file.credentials_path {
        debug!(config = %config_path.display(), "using credentials path from config file");
        return Self::new(path).with_context(|| format!("Invalid config in {}", config_path.display()));
      }
    }

    Self::new(config_dirs.default_credentials_path())
  }

  /// Write this config to `config.toml`.
  pub fn save(&self, config_dirs: &ConfigDirs) -> Result<()> {
    let config_path = config_dirs.config_path();

    // The config directory also holds the default store
    crate::platform::create_private_dir_all(config_dirs.config_dir())
      .with_context(|| format!("Failed to create config directory {}", config_dirs.config_dir().display()))?;

    let file = ConfigFile {
      credentials_path: Some(self.credentials_path.clone()),
    };
    let content = toml::to_string_pretty(&file).context("Failed to serialize config to TOML")?;

    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
  }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

  toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
}
