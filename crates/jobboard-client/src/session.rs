//! Client session

use parking_lot::RwLock;

/// Holds the bearer token of the logged-in user, if any
///
/// One per client, shared by `Arc` with whatever needs it.
#[derive(Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        self.token.write().take();
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.read().is_some()
    }
}
