//! Demo-grade client session state machine
//!
//! Mirrors the browser-side auth context of the admin SPA: a role derived
//! from hardcoded credential checks, persisted through a storage abstraction
//! standing in for local storage. This is explicitly demo-only — nothing on
//! the server verifies a session, and every API endpoint remains open.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ROLE_KEY: &str = "torabasa_role";
pub const CREDENTIALS_KEY: &str = "torabasa_credentials";

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "torabasa2024";

/// Minimum password length accepted for the `user` role.
const MIN_USER_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid credentials")]
pub struct InvalidCredentials;

/// Key-value persistence for the session, the interface the browser code
/// fills with local storage.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory storage, used in tests and anywhere persistence is not needed.
#[derive(Default, Debug, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Holds the current session and keeps it in sync with the storage backend.
///
/// States: anonymous, or signed in as `user`/`admin`. Transitions happen
/// only through `sign_in`/`sign_out`; `restore` rebuilds the state from
/// storage on startup. There is no expiry or server round-trip.
pub struct SessionManager<S: SessionStorage> {
    storage: S,
    current: Option<Credentials>,
}

impl<S: SessionStorage> SessionManager<S> {
    /// Starts an anonymous session over the given storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Rebuilds the session from storage. Both keys must be present and the
    /// credentials must parse; anything else yields an anonymous session.
    pub fn restore(storage: S) -> Self {
        let current = match (storage.get(ROLE_KEY), storage.get(CREDENTIALS_KEY)) {
            (Some(_), Some(raw)) => serde_json::from_str(&raw).ok(),
            _ => None,
        };
        Self { storage, current }
    }

    /// Attempts a sign-in for the requested role.
    ///
    /// Admin requires the literal demo credential pair; user accepts any
    /// email-shaped username with a password of at least 6 characters. On
    /// success the session is persisted and the granted role returned; on
    /// failure the current state is left untouched.
    pub fn sign_in(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Role, InvalidCredentials> {
        let accepted = match role {
            Role::Admin => username == ADMIN_USERNAME && password == ADMIN_PASSWORD,
            Role::User => username.contains('@') && password.len() >= MIN_USER_PASSWORD_LEN,
        };
        if !accepted {
            return Err(InvalidCredentials);
        }

        let credentials = Credentials {
            username: username.to_string(),
            role,
        };
        self.storage.set(ROLE_KEY, role.as_str().to_string());
        self.storage.set(
            CREDENTIALS_KEY,
            serde_json::to_string(&credentials).unwrap_or_default(),
        );
        self.current = Some(credentials);
        Ok(role)
    }

    /// Clears the session and both storage keys.
    pub fn sign_out(&mut self) {
        self.current = None;
        self.storage.remove(ROLE_KEY);
        self.storage.remove(CREDENTIALS_KEY);
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|credentials| credentials.role)
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.current.as_ref()
    }

    /// Consumes the manager and hands the storage back, e.g. to persist it
    /// across a restart in tests.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
