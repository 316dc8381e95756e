//! Session/role store
//!
//! Holds the active role, the synthetic user bound to it and the
//! authenticated flag. A successful login is persisted as
//! `{role, userId, isAuthenticated}` JSON under one storage key and restored
//! when the store is opened again.

use crate::storage::KeyValueStorage;
use medisys_records::seed;
use medisys_records::User;
use medisys_shared::{log_mutation, AuditAction, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_SESSION_KEY: &str = "medisys_auth";

/// Shape persisted under the session key
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub role: Role,
    pub user_id: String,
    pub is_authenticated: bool,
}

pub struct SessionStore {
    role: Role,
    user: User,
    is_authenticated: bool,
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl SessionStore {
    /// Open under the default key, restoring any persisted login
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        Self::open_with_key(storage, DEFAULT_SESSION_KEY)
    }

    pub fn open_with_key(storage: Box<dyn KeyValueStorage>, key: &str) -> Self {
        let mut store = Self {
            role: Role::Patient,
            user: seed::user_for_role(Role::Patient),
            is_authenticated: false,
            storage,
            key: key.to_string(),
        };
        store.restore();
        store
    }

    fn restore(&mut self) {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                debug!(key = %self.key, error = %e, "could not read persisted session");
                return;
            }
        };

        let persisted: PersistedSession = match serde_json::from_str(&raw) {
            Ok(p) => p,
            Err(e) => {
                debug!(key = %self.key, error = %e, "ignoring malformed persisted session");
                return;
            }
        };

        if !persisted.is_authenticated {
            return;
        }

        match seed::user_by_id(&persisted.user_id) {
            Some(user) => {
                self.role = persisted.role;
                self.user = user;
                self.is_authenticated = true;
                log_mutation(AuditAction::SessionRestored, persisted.role.as_str());
            }
            None => {
                debug!(user_id = %persisted.user_id, "persisted session names an unknown user");
            }
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Check the password against the role's fixed secret.
    ///
    /// On a match the role, user and authenticated flag are set and the
    /// session is persisted. On a mismatch nothing changes.
    pub fn login(&mut self, role: Role, password: &str) -> bool {
        let candidate = seed::user_for_role(role);
        let accepted = candidate
            .credential
            .as_ref()
            .map(|digest| digest.verify(password))
            .unwrap_or(false);

        if !accepted {
            log_mutation(AuditAction::LoginRejected, role.as_str());
            return false;
        }

        self.role = role;
        self.user = candidate;
        self.is_authenticated = true;
        self.persist();
        log_mutation(AuditAction::Login, role.as_str());
        true
    }

    /// Clear the authenticated flag and the persisted entry; role and user stay
    pub fn logout(&mut self) {
        self.is_authenticated = false;
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "failed to clear persisted session");
        }
        log_mutation(AuditAction::Logout, self.role.as_str());
    }

    /// Switch role and user without a credential check; storage is untouched
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.user = seed::user_for_role(role);
        log_mutation(AuditAction::RoleSwitched, role.as_str());
    }

    fn persist(&mut self) {
        let record = PersistedSession {
            role: self.role,
            user_id: self.user.id.clone(),
            is_authenticated: true,
        };
        let json = match serde_json::to_string(&record) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode session");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &json) {
            warn!(key = %self.key, error = %e, "failed to persist session");
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("role", &self.role)
            .field("user", &self.user.id)
            .field("is_authenticated", &self.is_authenticated)
            .field("key", &self.key)
            .finish()
    }
}
