//! User session gate
//!
//! The ledger core consumes authentication only as "is a user session
//! active". The session record lives under the `user` storage key, owned
//! here so the storage layout stays in one crate. A missing or unreadable
//! record simply means no active session.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::UserId;
use crate::storage::{keys, KeyValueStore};

/// The persisted user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl User {
    /// Create a user record with a fresh id
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            name: name.into(),
            profile_picture: None,
        }
    }
}

/// Holds the current user session, persisted under the `user` key
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    user: RwLock<Option<User>>,
}

impl Session {
    /// Load the session from storage; absent or corrupt records mean no
    /// active session
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let user = match store.get(keys::USER) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable user record");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read user record");
                None
            }
        };

        Self {
            store,
            user: RwLock::new(user),
        }
    }

    /// Whether a user session is active
    pub fn is_active(&self) -> bool {
        self.user.read().map(|u| u.is_some()).unwrap_or(false)
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<User> {
        self.user.read().ok().and_then(|u| u.clone())
    }

    /// Start a session for `user` and persist the record
    pub fn sign_in(&self, user: User) -> LedgerResult<()> {
        let json = serde_json::to_string(&user)?;
        self.store.set(keys::USER, &json)?;

        let mut current = self
            .user
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *current = Some(user);
        Ok(())
    }

    /// End the session and remove the persisted record
    pub fn sign_out(&self) -> LedgerResult<()> {
        self.store.remove(keys::USER)?;

        let mut current = self
            .user
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *current = None;
        Ok(())
    }
}
