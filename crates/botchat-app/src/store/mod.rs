//! Durable local stores
//!
//! Two small TOML files under the storage directory:
//! - `credentials.toml` - the (username, api key) pair
//! - `preferences.toml` - the explicit theme choice
//!
//! Writes go through [`write_atomic`] so other readers never see a
//! half-written file.

pub mod credential;
pub mod theme;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use botchat_core::prelude::*;
use fs2::FileExt;

pub use credential::{CredentialStore, CREDENTIALS_FILENAME};
pub use theme::{theme_from_colorfgbg, ThemeStore, PREFERENCES_FILENAME};

/// Both stores rooted at one directory
#[derive(Debug, Clone)]
pub struct Stores {
    pub credentials: CredentialStore,
    pub theme: ThemeStore,
}

impl Stores {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            credentials: CredentialStore::new(&dir),
            theme: ThemeStore::new(&dir),
        }
    }
}

/// File permissions for a stored file (unix only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Whatever the umask gives
    Default,
    /// Readable by the owner only (0600)
    OwnerOnly,
}

/// Write `content` to `path` via temp file + rename, holding an exclusive
/// lock on a sibling `.lock` file for the duration.
pub fn write_atomic(path: &Path, content: &str, mode: FileMode) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::store(path, "path has no parent directory"))?;
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::store(dir, format!("Failed to create directory: {}", e)))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::store(path, "path has no file name"))?;
    let lock_path = dir.join(format!(".{}.lock", file_name));
    let temp_path = dir.join(format!(".{}.tmp", file_name));

    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::store(&lock_path, format!("Failed to open lock file: {}", e)))?;

    // Released when lock_file is dropped
    lock_file
        .lock_exclusive()
        .map_err(|e| Error::store(&lock_path, format!("Failed to lock: {}", e)))?;

    std::fs::write(&temp_path, content)
        .map_err(|e| Error::store(&temp_path, format!("Failed to write temp file: {}", e)))?;

    if mode == FileMode::OwnerOnly {
        restrict_permissions(&temp_path)?;
    }

    std::fs::rename(&temp_path, path)
        .map_err(|e| Error::store(path, format!("Failed to rename temp file: {}", e)))?;

    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| Error::store(path, format!("Failed to set permissions: {}", e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Remove `path`; a file that is already gone is fine
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::store(path, format!("Failed to remove: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_parent_and_leaves_no_temp() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("file.toml");

        write_atomic(&path, "a = 1\n", FileMode::Default).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 1\n");
        assert!(!temp.path().join("nested/.file.toml.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("file.toml");

        write_atomic(&path, "a = 1\n", FileMode::Default).unwrap();
        write_atomic(&path, "a = 2\n", FileMode::Default).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 2\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join("secret.toml");
        write_atomic(&path, "k = 1\n", FileMode::OwnerOnly).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove_if_exists_is_idempotent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("gone.toml");
        remove_if_exists(&path).unwrap();

        std::fs::write(&path, "x").unwrap();
        remove_if_exists(&path).unwrap();
        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
    }
}
