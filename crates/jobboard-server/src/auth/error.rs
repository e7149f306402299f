//! Authentication error types

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::constants::{ERROR_CODE_INTERNAL, ERROR_CODE_UNAUTHENTICATED};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication required")]
    Unauthorized,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("unsupported authorization scheme")]
    UnsupportedScheme,

    #[error("token subject no longer exists")]
    StaleIdentity,

    #[error("invalid email or password")]
    InvalidLogin,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("user lookup failed: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Malformed, forged or expired credentials: a 401 before any resolver runs
    #[must_use]
    pub const fn is_invalid_credential(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken
                | Self::TokenExpired
                | Self::InvalidSignature
                | Self::UnsupportedScheme
        )
    }

    /// Anonymous caller reached a resolver that requires a user
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Failures that are the server's fault rather than the caller's
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Signing(_) | Self::Store(_) | Self::Config(_))
    }

    /// Machine-readable code surfaced to GraphQL clients
    #[must_use]
    pub const fn code(&self) -> &'static str {
        if self.is_internal() {
            ERROR_CODE_INTERNAL
        } else {
            ERROR_CODE_UNAUTHENTICATED
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::InvalidToken,
        }
    }
}

impl ErrorExtensions for AuthError {
    fn extend(&self) -> async_graphql::Error {
        // Internal details stay in the server log
        let message = if self.is_internal() {
            "internal error".to_string()
        } else {
            self.to_string()
        };
        let code = self.code();
        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::Unauthorized.to_string(), "authentication required");
        assert_eq!(AuthError::InvalidToken.to_string(), "invalid token");
        assert_eq!(AuthError::TokenExpired.to_string(), "token expired");
        assert_eq!(
            AuthError::StaleIdentity.to_string(),
            "token subject no longer exists"
        );
    }

    #[test]
    fn test_invalid_credential_predicate() {
        assert!(AuthError::InvalidToken.is_invalid_credential());
        assert!(AuthError::InvalidSignature.is_invalid_credential());
        assert!(AuthError::TokenExpired.is_invalid_credential());
        assert!(AuthError::UnsupportedScheme.is_invalid_credential());
        assert!(!AuthError::Unauthorized.is_invalid_credential());
        assert!(!AuthError::StaleIdentity.is_invalid_credential());
    }

    #[test]
    fn test_unauthorized_predicate() {
        assert!(AuthError::Unauthorized.is_unauthorized());
        assert!(!AuthError::InvalidToken.is_unauthorized());
    }

    #[test]
    fn test_internal_predicate() {
        assert!(AuthError::Signing("boom".into()).is_internal());
        assert!(AuthError::Store(StoreError::Unavailable("down".into())).is_internal());
        assert!(!AuthError::Unauthorized.is_internal());
    }

    #[test]
    fn test_codes() {
        assert_eq!(AuthError::Unauthorized.code(), ERROR_CODE_UNAUTHENTICATED);
        assert_eq!(AuthError::InvalidToken.code(), ERROR_CODE_UNAUTHENTICATED);
        assert_eq!(AuthError::Config("x".into()).code(), ERROR_CODE_INTERNAL);
    }

    #[test]
    fn test_graphql_extension_for_unauthorized() {
        let err = AuthError::Unauthorized.extend();
        assert_eq!(err.message, "authentication required");
        let json = serde_json::to_value(err.extensions.unwrap()).unwrap();
        assert_eq!(json["code"], ERROR_CODE_UNAUTHENTICATED);
    }

    #[test]
    fn test_graphql_extension_hides_store_details() {
        let err = AuthError::Store(StoreError::Unavailable("db host 10.0.0.1".into())).extend();
        assert_eq!(err.message, "internal error");
        let json = serde_json::to_value(err.extensions.unwrap()).unwrap();
        assert_eq!(json["code"], ERROR_CODE_INTERNAL);
    }
}
