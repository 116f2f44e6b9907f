//! # Shell Completion
//!
//! Generates shell completion scripts so dwing commands and flags tab-complete.

use std::io;

use anyhow::Result;
use clap::{CommandFactory, ValueEnum};
use clap_complete::generate;

use crate::cli::Cli;

/// Shell with auto-generated completion script available.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
  /// Bourne Again `SHell` (bash)
  Bash,
  /// Friendly Interactive `SHell` (fish)
  Fish,
  /// Z `SHell` (zsh)
  Zsh,
}

impl From<Shell> for clap_complete::Shell {
  fn from(shell: Shell) -> Self {
    match shell {
      Shell::Bash => Self::Bash,
      Shell::Fish => Self::Fish,
      Shell::Zsh => Self::Zsh,
    }
  }
}

/// Generate shell completions for the specified shell
pub fn generate_completions(shell: clap_complete::Shell) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, &mut io::stdout());

  Ok(())
}
