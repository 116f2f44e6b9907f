//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod completion;
mod creds;
mod init;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

use crate::utils::output::ColorMode;

/// Top-level CLI command for the dwing tool
#[derive(Parser)]
#[command(name = "dwing")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Manage environment-scoped credentials from the terminal")]
#[command(
  long_about = "Dwing keeps usernames and passwords for your dev, staging and production\n\
        environments in a single local file readable only by you.\n\n\
        Add, list, show and remove credentials with the creds command group."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DWING_GIT_HASH"), ")"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Credential store to operate on
  #[arg(
    long,
    value_name = "PATH",
    global = true,
    long_help = "Path of the credential store to operate on.\n\n\
             Takes precedence over DWING_CREDENTIALS_PATH and the credentials_path\n\
             key in config.toml. Relative paths are resolved against the current directory."
  )]
  pub store: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the dwing tool
#[derive(Subcommand)]
pub enum Commands {
  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for dwing commands.\n\n\
            Supported shells are bash, zsh and fish.")]
  Completion(completion::CompletionArgs),

  /// Credential management
  #[command(long_about = "Add, list, show and remove stored credentials.\n\n\
            Each credential belongs to an environment such as dev or prod. A username\n\
            may appear only once per environment.")]
  #[command(arg_required_else_help = true)]
  Creds(creds::CredsArgs),

  /// Initialize dwing configuration
  #[command(long_about = "Initializes the dwing configuration for your environment.\n\n\
            Creates the configuration directories, a config.toml recording the store\n\
            location and an empty credential store. Existing files are left alone.")]
  Init,
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let store = cli.store.as_deref();
  match cli.command {
    Commands::Completion(completion) => completion::handle_completion_command(completion),
    Commands::Creds(creds) => creds::handle_creds_command(creds, store),
    Commands::Init => init::handle_init_command(store),
  }
}
