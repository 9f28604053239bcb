use oauth2::AccessToken;
use std::sync::{Arc, RwLock};

/// Process-lifetime holder of the single CRM access token.
///
/// Empty at start, filled by the OAuth callback, read by sync. Nothing is persisted and there
/// is no expiry tracking; a restart means authorizing again.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previously held token.
    pub fn set_access_token(&self, token: AccessToken) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token);
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
