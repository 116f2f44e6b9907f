//! # Credentials Command
//!
//! Derive-based implementation of the `creds` command group: add, list, show
//! and remove stored credentials.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use dwing_core::Credential;

use crate::display::{render_details, render_json, render_table};
use crate::prompts::prompt_for_credential;
use crate::utils::open_service;
use crate::utils::output::{format_environment, format_id, print_error, print_info, print_success};

/// Command for credential management
#[derive(Args)]
pub struct CredsArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: CredsSubcommands,
}

/// Subcommands for the creds command
#[derive(Subcommand)]
pub enum CredsSubcommands {
  /// Add a new credential
  #[command(long_about = "Add a new credential to your credential store.\n\n\
            Without flags you are prompted for each field. With flags, --environment,\n\
            --username and --password must all be given; --nickname is optional.\n\n\
            Examples:\n  \
            dwing creds add\n  \
            dwing creds add -e dev -u myuser -p mypass -n mynick")]
  Add(AddArgs),

  /// List stored credentials
  #[command(long_about = "List stored credentials in insertion order.\n\n\
            Passwords are not shown in the table. Use --json for machine-readable\n\
            output including passwords, or 'dwing creds show <ID>' for one record.")]
  #[command(alias = "ls")]
  List(ListArgs),

  /// Show every field of one credential
  #[command(long_about = "Show every field of one credential, including its password.")]
  Show(IdArgs),

  /// Remove a stored credential
  #[command(long_about = "Remove a stored credential by its ID.\n\n\
            Use 'dwing creds list' to find the ID of the credential to remove.")]
  #[command(alias = "rm")]
  Remove(IdArgs),
}

/// Arguments for `creds add`
#[derive(Args)]
pub struct AddArgs {
  /// Environment (e.g. dev, staging, prod)
  #[arg(short, long)]
  pub environment: Option<String>,

  /// Username
  #[arg(short, long)]
  pub username: Option<String>,

  /// Password
  #[arg(short, long)]
  pub password: Option<String>,

  /// Nickname for easy reference (optional)
  #[arg(short, long)]
  pub nickname: Option<String>,
}

impl AddArgs {
  /// Any non-empty flag switches `add` from prompting to flag mode.
  fn flag_mode(&self) -> bool {
    [&self.environment, &self.username, &self.password, &self.nickname]
      .into_iter()
      .any(|flag| flag.as_deref().is_some_and(|value| !value.is_empty()))
  }

  fn into_credential(self) -> Result<Credential> {
    let environment = self.environment.unwrap_or_default();
    let username = self.username.unwrap_or_default();
    let password = self.password.unwrap_or_default();

    if environment.is_empty() || username.is_empty() || password.is_empty() {
      bail!("when using flags, --username, --password, and --environment are required");
    }

    Ok(Credential::new(
      environment,
      username,
      password,
      self.nickname.unwrap_or_default(),
    ))
  }
}

/// Arguments for `creds list`
#[derive(Args)]
pub struct ListArgs {
  /// Only list credentials in this environment
  #[arg(short, long)]
  pub environment: Option<String>,

  /// Print credentials as JSON, passwords included
  #[arg(long)]
  pub json: bool,
}

/// Arguments for commands addressing a single credential
#[derive(Args)]
pub struct IdArgs {
  /// ID of the credential
  #[arg(value_name = "CREDENTIAL_ID")]
  pub id: String,
}

/// Handle the creds command
pub(crate) fn handle_creds_command(creds: CredsArgs, store: Option<&Path>) -> Result<()> {
  match creds.subcommand {
    CredsSubcommands::Add(args) => handle_add_command(args, store),
    CredsSubcommands::List(args) => handle_list_command(args, store),
    CredsSubcommands::Show(args) => handle_show_command(args, store),
    CredsSubcommands::Remove(args) => handle_remove_command(args, store),
  }
}

fn handle_add_command(args: AddArgs, store: Option<&Path>) -> Result<()> {
  let credential = if args.flag_mode() {
    args.into_credential()?
  } else {
    prompt_for_credential().context("Failed to get credential input")?
  };

  let service = open_service(store)?;
  let stored = service
    .add_credential(credential)
    .context("Failed to add credential")?;

  print_success(&format!(
    "Credential added successfully: ({}) - {}",
    stored.environment, stored.username
  ));
  println!("  ID: {}", format_id(&stored.id));

  Ok(())
}

fn handle_list_command(args: ListArgs, store: Option<&Path>) -> Result<()> {
  let service = open_service(store)?;
  let environment = args.environment.as_deref().unwrap_or_default();
  let credentials = service
    .list_credentials(environment)
    .context("Failed to list credentials")?;

  if args.json {
    println!("{}", render_json(&credentials)?);
    return Ok(());
  }

  if credentials.is_empty() {
    if environment.is_empty() {
      print_info("No credentials stored yet. Add one with 'dwing creds add'.");
    } else {
      print_info(&format!(
        "No credentials stored for environment {}.",
        format_environment(environment)
      ));
    }
    return Ok(());
  }

  println!("{}", render_table(&credentials));
  Ok(())
}

fn handle_show_command(args: IdArgs, store: Option<&Path>) -> Result<()> {
  let service = open_service(store)?;

  match service.get_credential(&args.id) {
    Ok(credential) => {
      println!("{}", render_details(&credential));
      Ok(())
    }
    Err(err) if err.is_not_found() => {
      print_error(&format!("Credential with ID '{}' not found", args.id));
      Ok(())
    }
    Err(err) => Err(err).context("Failed to show credential"),
  }
}

fn handle_remove_command(args: IdArgs, store: Option<&Path>) -> Result<()> {
  let service = open_service(store)?;

  match service.remove_credential(&args.id) {
    Ok(()) => {
      print_success("Credential removed successfully");
      Ok(())
    }
    Err(err) if err.is_not_found() => {
      print_error(&format!("Credential with ID '{}' not found", args.id));
      Ok(())
    }
    Err(err) => Err(err).context("Failed to remove credential"),
  }
}
