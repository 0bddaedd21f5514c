//! Persisted client state definitions

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur reading or writing persisted state
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for state operations
pub type StateResult<T> = Result<T, StateError>;

/// Everything a PASS client remembers between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Where to return after signing in again
    RestorePath,
    LoggedIn,
    RedirectUrl,
    /// Cached profile image, as data the UI can render directly
    ProfileImage,
    /// Profile form contents saved across a sign-in redirect
    RestoreProfileData,
    OidcIssuer,
}

impl StateKey {
    pub const ALL: [StateKey; 6] = [
        StateKey::RestorePath,
        StateKey::LoggedIn,
        StateKey::RedirectUrl,
        StateKey::ProfileImage,
        StateKey::RestoreProfileData,
        StateKey::OidcIssuer,
    ];

    /// Keys dropped on logout
    pub const SESSION: [StateKey; 3] =
        [StateKey::LoggedIn, StateKey::RedirectUrl, StateKey::RestorePath];

    /// Stable storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKey::RestorePath => "restorePath",
            StateKey::LoggedIn => "loggedIn",
            StateKey::RedirectUrl => "redirectUrl",
            StateKey::ProfileImage => "profileImageBlob",
            StateKey::RestoreProfileData => "restoreProfileData",
            StateKey::OidcIssuer => "oidcIssuer",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value store for client state.
///
/// Values are JSON; a key that was never set and a key set to `null`
/// both read as `None`.
pub trait StateStore: Send + Sync {
    fn get(&self, key: StateKey) -> StateResult<Option<Value>>;

    fn set(&self, key: StateKey, value: Value) -> StateResult<()>;

    fn remove(&self, key: StateKey) -> StateResult<()>;

    /// Forget the signed-in session, keeping cached profile data
    fn clear_session(&self) -> StateResult<()> {
        for key in StateKey::SESSION {
            self.remove(key)?;
        }
        Ok(())
    }

    fn logged_in(&self) -> StateResult<bool> {
        Ok(matches!(self.get(StateKey::LoggedIn)?, Some(Value::Bool(true))))
    }

    fn set_logged_in(&self, logged_in: bool) -> StateResult<()> {
        self.set(StateKey::LoggedIn, Value::Bool(logged_in))
    }

    fn restore_path(&self) -> StateResult<Option<String>> {
        Ok(match self.get(StateKey::RestorePath)? {
            Some(Value::String(path)) => Some(path),
            _ => None,
        })
    }

    fn set_restore_path(&self, path: &str) -> StateResult<()> {
        self.set(StateKey::RestorePath, Value::String(path.to_string()))
    }
}
