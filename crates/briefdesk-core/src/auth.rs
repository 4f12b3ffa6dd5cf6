//! Bearer and refresh token storage.
//!
//! Tokens live in `$BRIEFDESK_HOME/tokens.json` under the fixed keys
//! `accessToken` and `refreshToken`, written with restricted permissions (0600).
//! Tokens are never logged or displayed in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Source of credentials for [`crate::api::ApiClient`].
///
/// Reads happen on every request, so a token rotated by another process
/// (or another client sharing the store) is picked up without restarting.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;

    /// # Errors
    /// Returns an error if the token cannot be persisted.
    fn set_access_token(&self, token: &str) -> Result<()>;

    /// # Errors
    /// Returns an error if the token cannot be persisted.
    fn set_refresh_token(&self, token: &str) -> Result<()>;

    /// Removes both tokens. Returns true if anything was stored.
    ///
    /// # Errors
    /// Returns an error if the store cannot be rewritten.
    fn clear(&self) -> Result<bool>;
}

/// On-disk token record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl StoredTokens {
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// Token store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store at the default location under `BRIEFDESK_HOME`.
    pub fn open_default() -> Self {
        Self::new(paths::tokens_path())
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the token file. A missing file reads as empty.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<StoredTokens> {
        if !self.path.exists() {
            return Ok(StoredTokens::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read tokens from {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tokens from {}", self.path.display()))
    }

    /// Saves the token file with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, tokens: &StoredTokens) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(tokens).context("Failed to serialize tokens")?;

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
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    fn load_or_warn(&self) -> StoredTokens {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable token file");
            StoredTokens::default()
        })
    }

    /// An unreadable file is replaced rather than blocking new tokens.
    fn update(&self, apply: impl FnOnce(&mut StoredTokens)) -> Result<()> {
        let mut tokens = self.load_or_warn();
        apply(&mut tokens);
        self.save(&tokens)
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.load_or_warn().access
    }

    fn refresh_token(&self) -> Option<String> {
        self.load_or_warn().refresh
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.update(|t| t.access = Some(token.to_string()))
    }

    fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.update(|t| t.refresh = Some(token.to_string()))
    }

    fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        let had_tokens = !self.load_or_warn().is_empty();
        self.save(&StoredTokens::default())?;
        Ok(had_tokens)
    }
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<StoredTokens>,
}

impl MemoryTokenStore {
    pub fn new(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            inner: Mutex::new(StoredTokens {
                access: access.map(str::to_string),
                refresh: refresh.map(str::to_string),
            }),
        }
    }

    pub fn snapshot(&self) -> StoredTokens {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, StoredTokens> {
        // A poisoned lock only means a panicking writer; the data is plain strings.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.lock().access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.lock().refresh.clone()
    }

    fn set_access_token(&self, token: &str) -> Result<()> {
        self.lock().access = Some(token.to_string());
        Ok(())
    }

    fn set_refresh_token(&self, token: &str) -> Result<()> {
        self.lock().refresh = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<bool> {
        let mut guard = self.lock();
        let had_tokens = !guard.is_empty();
        *guard = StoredTokens::default();
        Ok(had_tokens)
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.chars().count() <= 16 {
        return "***".to_string();
    }
    let prefix: String = token.chars().take(12).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_reads_as_no_tokens() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));

        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn test_file_uses_fixed_storage_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);

        store.set_access_token("access-1").unwrap();
        store.set_refresh_token("refresh-1").unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "access-1");
        assert_eq!(raw["refreshToken"], "refresh-1");
    }

    #[test]
    fn test_setting_access_token_keeps_refresh_token() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));

        store.set_refresh_token("refresh-1").unwrap();
        store.set_access_token("access-2").unwrap();

        assert_eq!(store.access_token().as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn test_clear_reports_whether_tokens_existed() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));

        assert!(!store.clear().unwrap());

        store.set_access_token("access").unwrap();
        assert!(store.clear().unwrap());
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn test_corrupt_file_reads_as_no_tokens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.access_token(), None);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_corrupt_file_is_overwritten_by_new_tokens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::new(&path);
        store.set_access_token("access-after-corruption").unwrap();

        assert_eq!(store.access_token().as_deref(), Some("access-after-corruption"));
        assert!(store.load().is_ok());
    }

    #[test]
    fn test_clear_succeeds_on_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(!store.clear().unwrap());
        assert_eq!(store.load().unwrap(), StoredTokens::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        FileTokenStore::new(&path).set_access_token("secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryTokenStore::new(Some("a"), Some("r"));
        assert!(store.clear().unwrap());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbGciOiJI...");
        assert_eq!(mask_token("short"), "***");
    }
}
