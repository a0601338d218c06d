//! Bearer-token session storage.
//!
//! The session token is an opaque string persisted under a fixed path so
//! a login survives process restarts. Presence of the token means
//! "logged in"; absence means anonymous. The file is read on demand for
//! every authenticated request — no caching, no expiry logic in this
//! layer.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::path::{Path, PathBuf};
use vectorgo_core::AppResult;

/// File-backed store for the session token.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store bound to the given token file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the token is persisted under.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted token, if any. Unreadable or empty files count
    /// as "no token".
    pub fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// True iff a token is present.
    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// Persist a new token, creating the parent directory if needed.
    pub fn save(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        tracing::debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    /// Remove the persisted token. Idempotent: a missing file is not an
    /// error.
    pub fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session token removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Request headers for the current session: `Authorization: Bearer
    /// <token>` when logged in, an empty map otherwise. Never fails; a
    /// token that cannot be encoded as a header value is treated as
    /// absent.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.load() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in_tempdir() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));
        (dir, store)
    }

    #[test]
    fn test_absent_token_means_anonymous() {
        let (_dir, store) = store_in_tempdir();
        assert!(!store.is_logged_in());
        assert!(store.load().is_none());
        assert!(store.auth_headers().is_empty());
    }

    #[test]
    fn test_saved_token_yields_bearer_header() {
        let (_dir, store) = store_in_tempdir();
        store.save("T").unwrap();

        assert!(store.is_logged_in());
        let headers = store.auth_headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer T");
    }

    #[test]
    fn test_token_survives_new_store_instance() {
        let (dir, store) = store_in_tempdir();
        store.save("persisted").unwrap();

        let reopened = TokenStore::new(dir.path().join("token"));
        assert_eq!(reopened.load().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, store) = store_in_tempdir();
        store.save("T").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_whitespace_only_file_counts_as_absent() {
        let (_dir, store) = store_in_tempdir();
        store.save("  \n").unwrap();
        assert!(!store.is_logged_in());
        assert!(store.auth_headers().is_empty());
    }
}
