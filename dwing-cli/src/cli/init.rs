//! # Init Command
//!
//! Creates the configuration directories, a default `config.toml` and an empty
//! credential store. Files that already exist are left untouched.

use std::path::Path;

use anyhow::{Context, Result};
use dwing_core::platform::has_owner_only_permissions;
use dwing_core::{Config, ConfigDirs, CredentialRepository, JsonRepository, get_config_dirs};

use crate::utils::output::{format_command, format_path, print_header, print_info, print_success, print_warning};

pub(crate) fn handle_init_command(store: Option<&Path>) -> Result<()> {
  let config_dirs = get_config_dirs()?;
  init(&config_dirs, |dirs| Config::load(dirs, store))
}

/// Set up `config_dirs`, then create the store of the config `resolve`
/// returns. Resolution runs after `config.toml` is written so a fresh
/// config file takes part in it.
fn init(config_dirs: &ConfigDirs, resolve: impl FnOnce(&ConfigDirs) -> Result<Config>) -> Result<()> {
  config_dirs.init()?;

  let config_path = config_dirs.config_path();
  if config_path.exists() {
    print_info(&format!(
      "Keeping existing config {}",
      format_path(&config_path.display().to_string())
    ));
  } else {
    Config::new(config_dirs.default_credentials_path())?.save(config_dirs)?;
  }

  let config = resolve(config_dirs).context("Failed to load config")?;
  let store_path = &config.credentials_path;
  if store_path.exists() {
    if !has_owner_only_permissions(store_path)
      .with_context(|| format!("Failed to read permissions of {}", store_path.display()))?
    {
      print_warning("Credential store is readable by other users.");
      println!(
        "  Run {} to fix this.",
        format_command(&format!("chmod 600 {}", store_path.display()))
      );
    }
  } else {
    JsonRepository::new(store_path)
      .save(&[])
      .context("Failed to create credential store")?;
  }

  print_success("Initialized dwing configuration:");
  print_header("Locations");
  println!(
    "  Config: {}",
    format_path(&config_dirs.config_dir().display().to_string())
  );
  println!("  Data: {}", format_path(&config_dirs.data_dir().display().to_string()));
  println!("  Store: {}", format_path(&store_path.display().to_string()));

  Ok(())
}
