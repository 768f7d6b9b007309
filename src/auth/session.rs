//! Session state and its durable storage
//!
//! The session store is the single source of truth for who is logged in and
//! with what credential. In-memory state and the persisted copies are kept
//! mutually consistent: a session is set, replaced, and cleared as a whole,
//! never token without identity or the other way around.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::auth::types::User;
use crate::error::Error;

/// Fixed storage entry names, carried over from the browser console's
/// local-storage keys.
const TOKEN_FILE: &str = "auth_token";
const USER_FILE: &str = "user.json";

/// Session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The bearer access token
    pub access_token: String,

    /// The token type (always "bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The identity the token was issued for
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Cheaply cloneable handle to the current session
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    storage_dir: Option<PathBuf>,
}

impl SessionStore {
    pub(crate) fn new(storage_dir: Option<PathBuf>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            storage_dir,
        }
    }

    /// Load a previously persisted session.
    ///
    /// Populates in-memory state only when both entries are present and
    /// well-formed; otherwise the store stays empty. Idempotent.
    pub fn restore(&self) {
        let Some(dir) = &self.storage_dir else {
            return;
        };

        let token = match fs::read_to_string(dir.join(TOKEN_FILE)) {
            Ok(token) if !token.is_empty() => token,
            _ => return,
        };

        let user_raw = match fs::read_to_string(dir.join(USER_FILE)) {
            Ok(raw) => raw,
            Err(_) => return,
        };

        let user: User = match serde_json::from_str(&user_raw) {
            Ok(user) => user,
            Err(err) => {
                warn!(%err, "persisted user record is malformed, starting logged out");
                return;
            }
        };

        debug!(user_id = user.id, "session restored");
        let mut current = self.current.write().unwrap();
        *current = Some(Session {
            access_token: token,
            token_type: default_token_type(),
            user,
        });
    }

    /// Replace the current session, persisting before publishing so a storage
    /// failure never leaves memory and disk disagreeing. If either entry
    /// fails to write, both are removed: a later restore must find the
    /// complete new pair or nothing, never the new token next to the old
    /// identity.
    pub(crate) fn set(&self, session: Session) -> Result<(), Error> {
        if let Some(dir) = &self.storage_dir {
            if let Err(err) = persist_entries(dir, &session) {
                remove_entries(dir);
                return Err(err);
            }
        }

        let mut current = self.current.write().unwrap();
        *current = Some(session);
        Ok(())
    }

    /// Drop the session from memory and storage. An entry that is already
    /// gone is not an error.
    pub fn clear(&self) {
        if let Some(dir) = &self.storage_dir {
            remove_entries(dir);
        }

        let mut current = self.current.write().unwrap();
        *current = None;
    }

    /// Get the current session
    pub fn get(&self) -> Option<Session> {
        self.current.read().unwrap().clone()
    }

    /// Get the current bearer token
    pub fn token(&self) -> Option<String> {
        let current = self.current.read().unwrap();
        current.as_ref().map(|s| s.access_token.clone())
    }

    /// Get the current identity
    pub fn user(&self) -> Option<User> {
        let current = self.current.read().unwrap();
        current.as_ref().map(|s| s.user.clone())
    }

    /// Whether a session is currently held
    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap().is_some()
    }
}

fn persist_entries(dir: &Path, session: &Session) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    fs::write(dir.join(TOKEN_FILE), &session.access_token)?;
    fs::write(dir.join(USER_FILE), serde_json::to_vec(&session.user)?)?;
    Ok(())
}

fn remove_entries(dir: &Path) {
    for name in [TOKEN_FILE, USER_FILE] {
        if let Err(err) = fs::remove_file(dir.join(name)) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(%err, file = name, "failed to remove persisted session entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::UserRole;

    fn sample_session() -> Session {
        Session {
            access_token: "token-abc".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: 1,
                email: "ops@example.com".to_string(),
                role: UserRole::SuperAdmin,
                tenant_id: None,
                is_active: true,
                created_at: "2025-03-10T12:00:00Z".to_string(),
            },
        }
    }

    #[test]
    fn test_set_persists_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(Some(dir.path().to_path_buf()));

        store.set(sample_session()).unwrap();

        assert!(store.is_authenticated());
        let token = std::fs::read_to_string(dir.path().join("auth_token")).unwrap();
        assert_eq!(token, "token-abc");
        let user: User =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("user.json")).unwrap())
                .unwrap();
        assert_eq!(user.email, "ops@example.com");
    }

    #[test]
    fn test_clear_removes_memory_and_storage() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(Some(dir.path().to_path_buf()));
        store.set(sample_session()).unwrap();

        store.clear();

        assert!(!store.is_authenticated());
        assert!(!dir.path().join("auth_token").exists());
        assert!(!dir.path().join("user.json").exists());

        // Clearing an already-empty store is fine.
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_restore_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SessionStore::new(Some(dir.path().to_path_buf()));
        writer.set(sample_session()).unwrap();

        let store = SessionStore::new(Some(dir.path().to_path_buf()));
        store.restore();
        let first = store.get().unwrap();
        store.restore();
        let second = store.get().unwrap();

        assert_eq!(first.access_token, second.access_token);
        assert_eq!(first.user.id, second.user.id);
    }

    #[test]
    fn test_failed_persist_leaves_no_half_written_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(Some(dir.path().to_path_buf()));
        store.set(sample_session()).unwrap();

        // A directory squatting on the identity entry makes its write fail
        // after the token has already been written.
        std::fs::remove_file(dir.path().join("user.json")).unwrap();
        std::fs::create_dir(dir.path().join("user.json")).unwrap();

        let mut replacement = sample_session();
        replacement.access_token = "token-def".to_string();
        assert!(store.set(replacement).is_err());

        // Memory keeps the prior session and the new token is gone from
        // disk, so no restore can pair it with the old identity.
        assert_eq!(store.token().unwrap(), "token-abc");
        assert!(!dir.path().join("auth_token").exists());

        let fresh = SessionStore::new(Some(dir.path().to_path_buf()));
        fresh.restore();
        assert!(!fresh.is_authenticated());
    }

    #[test]
    fn test_restore_requires_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("auth_token"), "orphan-token").unwrap();

        let store = SessionStore::new(Some(dir.path().to_path_buf()));
        store.restore();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restore_rejects_malformed_identity() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("auth_token"), "token-abc").unwrap();
        std::fs::write(dir.path().join("user.json"), "{not json").unwrap();

        let store = SessionStore::new(Some(dir.path().to_path_buf()));
        store.restore();
        assert!(!store.is_authenticated());
    }
}
