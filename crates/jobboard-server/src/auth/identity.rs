//! Per-request identity resolution

use std::sync::Arc;

use super::codec::TokenCodec;
use super::config::StaleIdentityPolicy;
use super::error::{AuthError, Result};
use crate::constants::BEARER_SCHEME;
use crate::store::{UserDirectory, UserRecord};

/// Identity attached to one request
///
/// Built once by the request dispatcher and shared by every resolver of
/// that request. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<UserRecord>,
}

impl AuthContext {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub const fn authenticated(user: UserRecord) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Any other scheme, or a bearer
/// header without a token, is an invalid credential.
pub fn bearer_token(header_value: &str) -> Result<&str> {
    let (scheme, token) = header_value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::UnsupportedScheme)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::UnsupportedScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}

/// Turns an optional raw credential into an [`AuthContext`]
pub struct IdentityResolver {
    codec: Arc<TokenCodec>,
    directory: Arc<dyn UserDirectory>,
    stale_identity: StaleIdentityPolicy,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("codec", &self.codec)
            .field("stale_identity", &self.stale_identity)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        directory: Arc<dyn UserDirectory>,
        stale_identity: StaleIdentityPolicy,
    ) -> Self {
        Self {
            codec,
            directory,
            stale_identity,
        }
    }

    /// Resolve the identity for one request.
    ///
    /// - no credential: anonymous context, never an error
    /// - forged or malformed credential: invalid-credential error
    /// - valid credential for a deleted user: anonymous or
    ///   [`AuthError::StaleIdentity`], depending on policy
    /// - directory failure: [`AuthError::Store`]
    pub fn resolve(&self, raw_credential: Option<&str>) -> Result<AuthContext> {
        let Some(token) = raw_credential else {
            return Ok(AuthContext::anonymous());
        };

        let subject = self.codec.verify(token).inspect_err(|e| {
            // Token contents are never logged
            tracing::warn!(reason = %e, "Credential rejected");
        })?;

        match self.directory.user(&subject)? {
            Some(user) => {
                tracing::debug!(user.id = %user.id, "Request authenticated");
                Ok(AuthContext::authenticated(user))
            }
            None => match self.stale_identity {
                StaleIdentityPolicy::Anonymous => {
                    tracing::info!(user.id = %subject, "Token subject not found, continuing anonymously");
                    Ok(AuthContext::anonymous())
                }
                StaleIdentityPolicy::Reject => {
                    tracing::warn!(user.id = %subject, "Token subject not found, rejecting");
                    Err(AuthError::StaleIdentity)
                }
            },
        }
    }
}
