//! Build script for dwing
//!
//! Embeds version metadata for `dwing --version`

use std::process::Command;

/// Entry point for the build script.
fn main() {
  embed_git_hash();

  println!("cargo:rerun-if-changed=build.rs");
  // Re-run when Git HEAD changes to update commit hash
  println!("cargo:rerun-if-changed=../.git/HEAD");
}

/// Exposes the short commit hash as `DWING_GIT_HASH`, or `unknown` when the
/// build does not happen inside a Git checkout.
fn embed_git_hash() {
  let git_hash = Command::new("git")
    .args(["rev-parse", "--short", "HEAD"])
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|hash| hash.trim().to_string())
    .filter(|hash| !hash.is_empty())
    .unwrap_or_else(|| "unknown".to_string());

  println!("cargo:rustc-env=DWING_GIT_HASH={git_hash}");
}
