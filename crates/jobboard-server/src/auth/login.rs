//! Credential exchange for access tokens

use super::claims::AccessToken;
use super::codec::TokenCodec;
use super::error::{AuthError, Result};
use crate::store::UserDirectory;

/// Check email and password against the directory and issue a token.
///
/// Unknown email and wrong password produce the same error.
pub fn authenticate(
    directory: &dyn UserDirectory,
    codec: &TokenCodec,
    email: &str,
    password: &str,
) -> Result<AccessToken> {
    let user = directory
        .user_by_email(email)?
        .filter(|user| user.password == password)
        .ok_or_else(|| {
            tracing::info!("Login rejected");
            AuthError::InvalidLogin
        })?;

    let token = codec.issue(&user.id)?;
    tracing::info!(user.id = %user.id, "Login succeeded");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenConfig;
    use crate::store::{MemoryStore, SeedData, UserId};

    fn codec() -> TokenCodec {
        TokenCodec::new(&TokenConfig::new(
            b"login-test-secret-at-least-32-bytes-long".to_vec(),
        ))
    }

    #[test]
    fn test_authenticate_success() {
        let store = MemoryStore::new(SeedData::demo());
        let codec = codec();
        let token = authenticate(&store, &codec, "alice@facegle.io", "alice123").unwrap();
        assert_eq!(codec.verify(token.as_str()).unwrap(), UserId::from("1"));
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let store = MemoryStore::new(SeedData::demo());
        let result = authenticate(&store, &codec(), "alice@facegle.io", "nope");
        assert!(matches!(result, Err(AuthError::InvalidLogin)));
    }

    #[test]
    fn test_authenticate_unknown_email() {
        let store = MemoryStore::new(SeedData::demo());
        let result = authenticate(&store, &codec(), "mallory@evil.io", "alice123");
        assert!(matches!(result, Err(AuthError::InvalidLogin)));
    }
}
