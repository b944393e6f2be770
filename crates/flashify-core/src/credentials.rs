//! Persisted bearer-credential storage.
//!
//! Stores the access token in `${FLASHIFY_HOME}/credentials.json` with
//! restricted permissions (0600). This is the single string-keyed slot the
//! client reads once at startup and writes/clears only on login/logout.
//! Tokens are never logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk credential shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredentials {
    /// The bearer access token issued at login.
    access_token: String,
}

/// Handle to the persisted credential slot.
///
/// The default store lives under FLASHIFY_HOME; tests point it at a temp
/// directory via [`CredentialStore::at`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Store at the default location (`${FLASHIFY_HOME}/credentials.json`).
    pub fn new() -> Self {
        Self {
            path: paths::credentials_path(),
        }
    }

    /// Store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the persisted token, if any.
    ///
    /// A missing file means no credential; an unreadable or malformed file is
    /// an error (a corrupt slot should be surfaced, not silently dropped).
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials from {}", self.path.display()))?;
        let stored: StoredCredentials = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", self.path.display()))?;
        Ok(Some(stored.access_token))
    }

    /// Persists the token, creating parent directories as needed.
    ///
    /// Written with 0600 permissions on unix.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&StoredCredentials {
            access_token: token.to_string(),
        })
        .context("Failed to serialize credentials")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted token. Clearing an empty slot is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, CredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_is_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        store.save("tok-123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_clear_removes_slot() {
        let (_dir, store) = temp_store();
        store.save("tok-123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // Clearing again is fine.
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_with_restricted_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, store) = temp_store();
        store.save("tok-123").unwrap();
        let mode = std::fs::metadata(dir.path().join("credentials.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
