//! Attaches the session credential to outgoing operations

use std::sync::Arc;

use crate::operation::Operation;
use crate::session::Session;

const AUTHORIZATION: &str = "authorization";

/// Adds `authorization: Bearer <token>` when the session holds a token
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    session: Arc<Session>,
}

impl AuthInterceptor {
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Returns the operation with credentials attached, or unchanged when
    /// logged out. Document and variables are never modified.
    #[must_use]
    pub fn intercept(&self, operation: Operation) -> Operation {
        match self.session.token() {
            Some(token) => operation.with_header(AUTHORIZATION, format!("Bearer {token}")),
            None => operation,
        }
    }
}
