use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

impl Error {
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("token secret is required".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: token secret is required"
        );

        let err = Error::Transport("bind failed".into());
        assert_eq!(err.to_string(), "Transport error: bind failed");
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::Config(String::new()).is_config());
        assert!(Error::Transport(String::new()).is_transport());
        assert!(!Error::Config(String::new()).is_transport());
    }

    #[test]
    fn test_error_from_store() {
        let err: Error = StoreError::InvalidSeed("dangling company".into()).into();
        assert!(err.is_store());
    }

    #[test]
    fn test_error_from_auth() {
        let err: Error = AuthError::Config("bad secret".into()).into();
        assert!(err.is_auth());
        assert!(err.to_string().contains("bad secret"));
    }
}
