//! Persistent credential store
//!
//! A credential is stored whole or not at all: `load` treats a file with a
//! missing or blank field the same as no file.

use std::path::{Path, PathBuf};

use botchat_core::prelude::*;
use botchat_core::Credential;
use serde::{Deserialize, Serialize};

use super::{remove_if_exists, write_atomic, FileMode};

pub const CREDENTIALS_FILENAME: &str = "credentials.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
struct StoredCredential {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
}

/// File-backed store for the (username, api key) pair
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(CREDENTIALS_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored credential, if both fields are present and non-empty
    pub fn load(&self) -> Option<Credential> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read {:?}: {}", self.path, e);
                return None;
            }
        };

        let stored: StoredCredential = match toml::from_str(&content) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to parse {:?}: {}", self.path, e);
                return None;
            }
        };

        let username = stored.username.filter(|u| !u.trim().is_empty())?;
        let api_key = stored.api_key.filter(|k| !k.trim().is_empty())?;
        Some(Credential { username, api_key })
    }

    /// Persist both fields in one write
    pub fn save(&self, credential: &Credential) -> Result<()> {
        let stored = StoredCredential {
            username: Some(credential.username.clone()),
            api_key: Some(credential.api_key.clone()),
        };
        let body = toml::to_string(&stored)
            .map_err(|e| Error::store(&self.path, format!("Failed to serialize: {}", e)))?;
        let content = format!("# botchat credential (do not share)\n{}", body);

        write_atomic(&self.path, &content, FileMode::OwnerOnly)?;
        debug!("Saved credential for {} to {:?}", credential.username, self.path);
        Ok(())
    }

    /// Remove the stored credential
    pub fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        debug!("Cleared stored credential at {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn cred() -> Credential {
        Credential::new("sam", "AIzaSy-validkey123").unwrap()
    }

    #[test]
    fn test_round_trip() {
        let temp = tempdir().unwrap();
        let store = CredentialStore::new(temp.path());

        store.save(&cred()).unwrap();
        assert_eq!(store.load(), Some(cred()));
    }

    #[test]
    fn test_clear_then_load_is_absent() {
        let temp = tempdir().unwrap();
        let store = CredentialStore::new(temp.path());

        store.save(&cred()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_missing_file_is_absent() {
        let temp = tempdir().unwrap();
        assert_eq!(CredentialStore::new(temp.path()).load(), None);
    }

    #[test]
    fn test_partial_credential_is_absent() {
        let temp = tempdir().unwrap();
        let store = CredentialStore::new(temp.path());

        std::fs::write(store.path(), "username = \"sam\"\n").unwrap();
        assert_eq!(store.load(), None);

        std::fs::write(store.path(), "username = \"sam\"\napi_key = \"  \"\n").unwrap();
        assert_eq!(store.load(), None);

        std::fs::write(store.path(), "api_key = \"AIzaSy-validkey123\"\n").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_garbage_file_is_absent() {
        let temp = tempdir().unwrap();
        let store = CredentialStore::new(temp.path());
        std::fs::write(store.path(), "this is = = not toml").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_saved_file_does_not_leak_into_debug() {
        let temp = tempdir().unwrap();
        let store = CredentialStore::new(temp.path());
        store.save(&cred()).unwrap();

        let loaded = store.load().unwrap();
        assert!(!format!("{:?}", loaded).contains("AIzaSy-validkey123"));
    }
}
