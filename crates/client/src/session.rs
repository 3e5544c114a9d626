//! Session objects handed to the API client.
//!
//! The client asks its session for a token on every request, so signing in
//! or out through a shared session takes effect on the next call.

use std::sync::{Arc, RwLock};

/// Source of the bearer token for backend requests
pub trait Session: Send + Sync {
    /// Current token, or `None` when nobody is signed in
    fn token(&self) -> Option<String>;
}

fn usable(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}

/// Session with a fixed token (or none), e.g. from configuration
#[derive(Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: usable(token),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for StaticSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSession")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Session for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Session whose token changes at runtime (sign in, sign out).
///
/// Clones share the same token.
#[derive(Clone, Default)]
pub struct SharedSession {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = usable(Some(token.into()));
    }

    pub fn sign_out(&self) {
        let mut slot = self.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSession")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

impl Session for SharedSession {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
