//! Authentication configuration types

use std::str::FromStr;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::{AuthError, Result};

/// What to do when a valid token names a user that no longer exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleIdentityPolicy {
    /// Continue the request without a user
    #[default]
    Anonymous,
    /// Reject the request like an invalid credential
    Reject,
}

impl FromStr for StaleIdentityPolicy {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anonymous" | "anon" => Ok(Self::Anonymous),
            "reject" | "deny" => Ok(Self::Reject),
            other => Err(AuthError::Config(format!(
                "unknown stale identity policy: {other}"
            ))),
        }
    }
}

/// Token signing configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// HS256 pre-shared secret
    pub secret: Vec<u8>,
    /// Lifetime of issued tokens; `None` issues tokens without `exp`
    pub ttl: Option<Duration>,
    /// Clock skew tolerance for `exp` validation
    pub leeway: Duration,
    pub stale_identity: StaleIdentityPolicy,
}

// Secret is never printed
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret_len", &self.secret.len())
            .field("ttl", &self.ttl)
            .field("leeway", &self.leeway)
            .field("stale_identity", &self.stale_identity)
            .finish_non_exhaustive()
    }
}

impl TokenConfig {
    #[must_use]
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret,
            ttl: None,
            leeway: Duration::from_secs(60),
            stale_identity: StaleIdentityPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub const fn with_stale_identity(mut self, policy: StaleIdentityPolicy) -> Self {
        self.stale_identity = policy;
        self
    }
}

/// Decode a base64-encoded secret
pub fn decode_secret(encoded: &str) -> Result<Vec<u8>> {
    let secret = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AuthError::Config(format!("token secret is not valid base64: {e}")))?;

    if secret.is_empty() {
        return Err(AuthError::Config("token secret is empty".into()));
    }

    Ok(secret)
}
