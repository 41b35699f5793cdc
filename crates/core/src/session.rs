//! Session store.
//!
//! Tracks the single logged-in identity and mirrors it to storage under
//! [`keys::CURRENT_USER`].
//!
//! # State Machine
//!
//! ```text
//! Anonymous     --login-->       Authenticated
//! Anonymous     --check_auth-->  Authenticated   (stored identity found)
//! Authenticated --login-->       Authenticated   (identity replaced)
//! Authenticated --logout-->      Anonymous
//! Anonymous     --logout-->      Anonymous
//! ```
//!
//! The identity is opaque to the store: any `Serialize + DeserializeOwned`
//! type works, and `serde_json::Value` is the default.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::storage::{Storage, keys};

/// Authentication state of a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState<U> {
    /// No identity is active.
    #[default]
    Anonymous,
    /// An identity is active.
    Authenticated(U),
}

impl<U> SessionState<U> {
    /// Whether an identity is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The active identity, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&U> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

/// Holds the current identity and keeps storage in step with it.
///
/// ```rust
/// use serde_json::json;
/// use travel_planner_core::{MemoryStorage, SessionStore};
///
/// let storage = MemoryStorage::new();
///
/// let mut session: SessionStore<_> = SessionStore::new(&storage);
/// session.login(json!({"name": "Ada"})).unwrap();
///
/// // A fresh store over the same storage picks the identity back up.
/// let restored: SessionStore<_> = SessionStore::new(&storage);
/// assert_eq!(restored.current_user(), Some(&json!({"name": "Ada"})));
/// ```
#[derive(Debug)]
pub struct SessionStore<S, U = Value> {
    storage: S,
    state: SessionState<U>,
}

impl<S, U> SessionStore<S, U>
where
    S: Storage,
    U: Serialize + DeserializeOwned,
{
    /// Create a store and restore any persisted identity.
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            storage,
            state: SessionState::Anonymous,
        };
        store.check_auth();
        store
    }

    /// Make `identity` the current user and persist it.
    ///
    /// No validation is performed; the caller must already have
    /// authenticated the user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the identity cannot be serialized or written.
    /// The previous state is kept in that case.
    pub fn login(&mut self, identity: U) -> Result<()> {
        let json = serde_json::to_string(&identity)?;
        self.storage.set_item(keys::CURRENT_USER, &json)?;
        self.state = SessionState::Authenticated(identity);
        tracing::debug!("Session started");
        Ok(())
    }

    /// Clear the current user and remove the persisted identity.
    ///
    /// The in-memory state is cleared even if removal fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the persisted identity could not be
    /// removed.
    pub fn logout(&mut self) -> Result<()> {
        self.state = SessionState::Anonymous;
        if let Err(e) = self.storage.remove_item(keys::CURRENT_USER) {
            tracing::warn!(error = %e, "Failed to remove persisted identity on logout");
            return Err(e.into());
        }
        tracing::debug!("Session ended");
        Ok(())
    }

    /// Restore the persisted identity, if there is one.
    ///
    /// A missing, unreadable, or malformed record leaves the state as it
    /// was; this never logs a user out. Returns whether a user is active
    /// afterwards.
    pub fn check_auth(&mut self) -> bool {
        if let Some(user) = self.read_persisted() {
            self.state = SessionState::Authenticated(user);
        }
        self.state.is_authenticated()
    }

    /// The current identity, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&U> {
        self.state.user()
    }

    /// Whether an identity is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// The full session state.
    #[must_use]
    pub const fn state(&self) -> &SessionState<U> {
        &self.state
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn read_persisted(&self) -> Option<U> {
        let raw = match self.storage.get_item(keys::CURRENT_USER) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted identity");
                return None;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed persisted identity");
                return None;
            }
        };

        if !is_present(&value) {
            return None;
        }

        serde_json::from_value(value)
            .map_err(|e| tracing::warn!(error = %e, "Persisted identity has unexpected shape"))
            .ok()
    }
}

/// Whether a stored JSON value counts as an identity.
///
/// `null`, `false`, `0`, and `""` are stored placeholders, not users.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
