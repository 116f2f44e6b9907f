//! # Platform File Handling
//!
//! Owner-only directory creation and atomic, owner-only file writes for the
//! credential store. On non-Unix platforms permissions fall back to the
//! platform defaults.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Mode for the store file: owner read/write only.
#[cfg(unix)]
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Mode for directories created for the store: owner traversal only.
#[cfg(unix)]
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Create `dir` and any missing ancestors. Directories that already exist are
/// left as they are.
pub fn create_private_dir_all(dir: &Path) -> io::Result<()> {
  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(PRIVATE_DIR_MODE).create(dir)
  }

  #[cfg(not(unix))]
  {
    fs::create_dir_all(dir)
  }
}

/// Replace the contents of `path` with `contents`.
///
/// The data is written to a temporary file next to `path` and renamed over
/// it, so readers see either the old or the new contents, never a mix.
pub fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(contents)?;
  tmp.as_file().sync_all()?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;

    tmp
      .as_file()
      .set_permissions(fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
  }

  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}

/// Check that nobody but the owner can access `path`.
pub fn has_owner_only_permissions(path: &Path) -> io::Result<bool> {
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)?.permissions().mode();
    Ok(mode & 0o077 == 0)
  }

  #[cfg(not(unix))]
  {
    fs::metadata(path).map(|_| true)
  }
}
