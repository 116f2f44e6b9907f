//! # Credential Display
//!
//! Renders credential collections for the terminal. Passwords never appear in
//! tables.

use anyhow::{Context, Result};
use dwing_core::Credential;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct CredentialRow<'a> {
  #[tabled(rename = "ID")]
  id: &'a str,
  #[tabled(rename = "Environment")]
  environment: &'a str,
  #[tabled(rename = "Username")]
  username: &'a str,
  #[tabled(rename = "Nickname")]
  nickname: &'a str,
}

impl<'a> From<&'a Credential> for CredentialRow<'a> {
  fn from(cred: &'a Credential) -> Self {
    Self {
      id: &cred.id,
      environment: &cred.environment,
      username: &cred.username,
      nickname: &cred.nickname,
    }
  }
}

/// Render credentials as a table, one row per credential in the given order.
pub fn render_table(credentials: &[Credential]) -> String {
  let rows = credentials.iter().map(CredentialRow::from);
  Table::new(rows).with(Style::sharp()).to_string()
}

/// Render credentials as pretty JSON, passwords included.
pub fn render_json(credentials: &[Credential]) -> Result<String> {
  serde_json::to_string_pretty(credentials).context("Failed to serialize credentials")
}

/// Render every field of a single credential, one per line.
pub fn render_details(cred: &Credential) -> String {
  let nickname = if cred.nickname.is_empty() { "-" } else { &cred.nickname };
  format!(
    "ID:          {}\nEnvironment: {}\nUsername:    {}\nPassword:    {}\nNickname:    {}",
    cred.id, cred.environment, cred.username, cred.password, nickname
  )
}
