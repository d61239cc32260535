//! # Session Store
//!
//! Authentication state: who is currently signed in, and against what
//! directory credentials are checked.
//!
//! ## State Machine
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                                                                  │
//! │              login(user, pass, owner_key) == true                │
//! │   anonymous ───────────────────────────────────► authenticated   │
//! │       ▲                                            (role)        │
//! │       │                    logout()                  │           │
//! │       └──────────────────────────────────────────────┘           │
//! │                                                                  │
//! │   No expiry, no refresh. The session object persists under its   │
//! │   own storage key and survives reloads; a corrupted persisted    │
//! │   session is discarded on load.                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Verification Seam
//! Credential checking hides behind [`CredentialVerifier`] so the fixed
//! in-code directory can later be swapped for hashed storage or an
//! external identity provider without touching any call site. The shipped
//! implementation, [`StaticDirectory`], is a plaintext compiled-in
//! directory of three accounts - no lockout, no rate limiting, no hashing.
//! A failed login is an undifferentiated `false`: callers cannot tell an
//! unknown user from a wrong password from a wrong owner key.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::storage::{persist_collection, Storage, SESSION_KEY};

// =============================================================================
// Identity Types
// =============================================================================

/// The two access roles of the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full access; login additionally requires the static owner key.
    #[serde(rename = "propietario")]
    Owner,
    /// Day-to-day sales access.
    #[serde(rename = "empleado")]
    Employee,
}

/// The authenticated identity held for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// =============================================================================
// Credential Verification
// =============================================================================

/// Checks a credential triple against some account directory.
pub trait CredentialVerifier {
    /// Returns the session identity on a full match, `None` on any
    /// mismatch. Implementations must not reveal *which* part mismatched.
    fn verify(&self, username: &str, password: &str, owner_key: Option<&str>)
        -> Option<SessionUser>;
}

/// One entry of the static directory.
#[derive(Debug, Clone)]
pub struct StaticAccount {
    pub username: String,
    pub password: String,
    pub user: SessionUser,
}

/// The fixed, compiled-in account directory.
///
/// Plaintext by design of the system this models; the [`CredentialVerifier`]
/// seam is where a real deployment would substitute hashed secrets.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    accounts: Vec<StaticAccount>,
    owner_key: String,
}

impl StaticDirectory {
    pub fn new(accounts: Vec<StaticAccount>, owner_key: impl Into<String>) -> Self {
        StaticDirectory {
            accounts,
            owner_key: owner_key.into(),
        }
    }
}

impl Default for StaticDirectory {
    /// The shop's three accounts: one owner, two employees.
    fn default() -> Self {
        StaticDirectory::new(
            vec![
                StaticAccount {
                    username: "propietario".to_string(),
                    password: "admin123".to_string(),
                    user: SessionUser {
                        id: "1".to_string(),
                        name: "Administrador A&V".to_string(),
                        role: Role::Owner,
                        email: Some("admin@accesoriosav.com".to_string()),
                    },
                },
                StaticAccount {
                    username: "empleado1".to_string(),
                    password: "emp123".to_string(),
                    user: SessionUser {
                        id: "2".to_string(),
                        name: "María López".to_string(),
                        role: Role::Employee,
                        email: Some("maria@accesoriosav.com".to_string()),
                    },
                },
                StaticAccount {
                    username: "empleado2".to_string(),
                    password: "emp123".to_string(),
                    user: SessionUser {
                        id: "3".to_string(),
                        name: "Carlos Ruiz".to_string(),
                        role: Role::Employee,
                        email: Some("carlos@accesoriosav.com".to_string()),
                    },
                },
            ],
            "AV2024MASTER",
        )
    }
}

impl CredentialVerifier for StaticDirectory {
    fn verify(
        &self,
        username: &str,
        password: &str,
        owner_key: Option<&str>,
    ) -> Option<SessionUser> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == username && a.password == password)?;

        // Owner accounts require the exact static key on top of the
        // password. Employees ignore any key supplied.
        if account.user.role == Role::Owner && owner_key != Some(self.owner_key.as_str()) {
            return None;
        }

        Some(account.user.clone())
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// The session state container.
///
/// Two states: anonymous (`current() == None`) and authenticated. The
/// session object persists under [`SESSION_KEY`] and is restored on load.
#[derive(Debug)]
pub struct SessionStore<S: Storage, V: CredentialVerifier> {
    storage: S,
    verifier: V,
    current: Option<SessionUser>,
}

impl<S: Storage, V: CredentialVerifier> SessionStore<S, V> {
    /// Loads the persisted session, if any. Corrupted session data is
    /// discarded and scrubbed from storage.
    pub fn load(storage: S, verifier: V) -> Self {
        let current = match storage.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => {
                    debug!(user = %user.name, "restored persisted session");
                    Some(user)
                }
                Err(err) => {
                    warn!(error = %err, "discarding corrupted persisted session");
                    if let Err(err) = storage.remove(SESSION_KEY) {
                        warn!(error = %err, "failed to scrub corrupted session");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "unreadable persisted session, starting anonymous");
                None
            }
        };

        SessionStore {
            storage,
            verifier,
            current,
        }
    }

    /// Attempts to authenticate. On success the session is stored,
    /// persisted, and `true` is returned; any mismatch yields `false`.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        owner_key: Option<&str>,
    ) -> StoreResult<bool> {
        match self.verifier.verify(username, password, owner_key) {
            Some(user) => {
                debug!(user = %user.name, role = ?user.role, "login accepted");
                persist_collection(&self.storage, SESSION_KEY, &user)?;
                self.current = Some(user);
                Ok(true)
            }
            None => {
                debug!(username, "login rejected");
                Ok(false)
            }
        }
    }

    /// Clears the session and removes it from storage.
    pub fn logout(&mut self) -> StoreResult<()> {
        debug!("logout");
        self.current = None;
        self.storage.remove(SESSION_KEY)?;
        Ok(())
    }

    /// The current identity, if authenticated.
    pub fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_owner(&self) -> bool {
        matches!(self.current, Some(ref user) if user.role == Role::Owner)
    }

    pub fn is_employee(&self) -> bool {
        matches!(self.current, Some(ref user) if user.role == Role::Employee)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> SessionStore<MemoryStorage, StaticDirectory> {
        SessionStore::load(MemoryStorage::new(), StaticDirectory::default())
    }

    #[test]
    fn test_employee_login_without_key() {
        let mut sessions = store();
        assert!(sessions.login("empleado1", "emp123", None).unwrap());
        assert!(sessions.is_authenticated());
        assert!(sessions.is_employee());
        assert!(!sessions.is_owner());
        assert_eq!(sessions.current().unwrap().name, "María López");
    }

    #[test]
    fn test_owner_requires_exact_key() {
        let mut sessions = store();

        // Matching user/password but missing or wrong key must fail.
        assert!(!sessions.login("propietario", "admin123", None).unwrap());
        assert!(!sessions
            .login("propietario", "admin123", Some("wrong"))
            .unwrap());
        assert!(!sessions.is_authenticated());

        assert!(sessions
            .login("propietario", "admin123", Some("AV2024MASTER"))
            .unwrap());
        assert!(sessions.is_owner());
    }

    #[test]
    fn test_unknown_user_and_wrong_password_fail_identically() {
        let mut sessions = store();
        assert!(!sessions.login("nadie", "emp123", None).unwrap());
        assert!(!sessions.login("empleado1", "wrong", None).unwrap());
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_employee_ignores_supplied_key() {
        let mut sessions = store();
        assert!(sessions
            .login("empleado2", "emp123", Some("AV2024MASTER"))
            .unwrap());
        assert!(sessions.is_employee());
    }

    #[test]
    fn test_logout_clears_session_and_storage() {
        let storage = MemoryStorage::new();
        let mut sessions = SessionStore::load(&storage, StaticDirectory::default());

        sessions.login("empleado1", "emp123", None).unwrap();
        assert!(storage.get(SESSION_KEY).unwrap().is_some());

        sessions.logout().unwrap();
        assert!(!sessions.is_authenticated());
        assert!(storage.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_session_survives_reload() {
        let storage = MemoryStorage::new();
        {
            let mut sessions = SessionStore::load(&storage, StaticDirectory::default());
            sessions.login("empleado1", "emp123", None).unwrap();
        }

        let sessions = SessionStore::load(&storage, StaticDirectory::default());
        assert!(sessions.is_authenticated());
        assert_eq!(sessions.current().unwrap().id, "2");
    }

    #[test]
    fn test_corrupted_session_discarded_and_scrubbed() {
        let storage = MemoryStorage::new();
        storage.plant(SESSION_KEY, "{broken");

        let sessions = SessionStore::load(&storage, StaticDirectory::default());
        assert!(!sessions.is_authenticated());
        assert!(storage.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_role_vocabulary() {
        assert_eq!(
            serde_json::to_value(Role::Owner).unwrap(),
            serde_json::json!("propietario")
        );
        assert_eq!(
            serde_json::to_value(Role::Employee).unwrap(),
            serde_json::json!("empleado")
        );
    }
}
