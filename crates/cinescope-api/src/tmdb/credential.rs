//! Bearer credential sources.
//!
//! The token is resolved on every request, never cached at build time, so a
//! rotated token is picked up by the next call.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Where the client reads its bearer token from.
#[derive(Debug, Clone, Default)]
pub enum Credential {
    /// No token. Requests go out without an `Authorization` header.
    #[default]
    None,
    /// Read the named environment variable at call time.
    Env(String),
    /// Read an in-process slot that can be updated at runtime.
    Shared(SharedToken),
}

impl Credential {
    /// Returns the current token, or `None` when unset or empty.
    #[must_use]
    pub fn resolve(&self) -> Option<String> {
        let token = match self {
            Self::None => None,
            Self::Env(var) => std::env::var(var).ok(),
            Self::Shared(slot) => slot.get(),
        };
        token.filter(|t| !t.trim().is_empty())
    }
}

/// A token slot shared between the client and whoever rotates the token.
#[derive(Clone, Default)]
pub struct SharedToken(Arc<RwLock<Option<String>>>);

impl SharedToken {
    /// Creates a slot holding `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(Some(token.into()))))
    }

    /// Replaces the token.
    pub fn set(&self, token: impl Into<String>) {
        *self.0.write() = Some(token.into());
    }

    /// Removes the token.
    pub fn clear(&self) {
        *self.0.write() = None;
    }

    /// Returns a copy of the current token.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }
}

impl fmt::Debug for SharedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.0.read().is_some() { "set" } else { "unset" };
        f.debug_tuple("SharedToken").field(&state).finish()
    }
}
