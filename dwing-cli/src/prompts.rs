//! # Prompts Module
//!
//! Interactive prompts and the dialoguer theme used for them.

use anyhow::{Context, Result};
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use dwing_core::Credential;

/// Returns a custom dialoguer theme matching dwing's color palette.
///
/// Features:
/// - Cyan bold prompt text
/// - Green `❯` prefix on active item
/// - Green highlight on active item text
pub fn dwing_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// Rejects empty input for required prompt fields.
#[allow(clippy::ptr_arg)]
pub fn required_field(input: &String) -> Result<(), &'static str> {
  if input.is_empty() {
    return Err("this field is required");
  }
  Ok(())
}

/// Ask for every credential field in turn. The password is read without echo.
pub fn prompt_for_credential() -> Result<Credential> {
  let theme = dwing_theme();

  let environment: String = Input::with_theme(&theme)
    .with_prompt("Environment")
    .validate_with(required_field)
    .interact_text()
    .context("Failed to read environment")?;

  let username: String = Input::with_theme(&theme)
    .with_prompt("Username")
    .validate_with(required_field)
    .interact_text()
    .context("Failed to read username")?;

  let password = Password::with_theme(&theme)
    .with_prompt("Password")
    .interact()
    .context("Failed to read password")?;

  let nickname: String = Input::with_theme(&theme)
    .with_prompt("Nickname")
    .allow_empty(true)
    .interact_text()
    .context("Failed to read nickname")?;

  Ok(Credential::new(environment, username, password, nickname))
}
