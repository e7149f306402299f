//! Token signing and verification

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{AccessToken, TokenClaims};
use super::config::TokenConfig;
use super::error::{AuthError, Result};
use crate::constants::MIN_SECRET_LEN;
use crate::store::UserId;

/// HS256 token codec over a pre-shared secret
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        if config.secret.len() < MIN_SECRET_LEN {
            tracing::warn!(
                secret_len = config.secret.len(),
                "Token secret is shorter than {MIN_SECRET_LEN} bytes"
            );
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub"]);
        validation.validate_aud = false;
        validation.leeway = config.leeway.as_secs();

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            ttl: config.ttl,
        }
    }

    /// Sign a token for `subject`
    pub fn issue(&self, subject: &UserId) -> Result<AccessToken> {
        let now = unix_now();
        let claims = TokenClaims {
            sub: subject.clone(),
            iat: Some(now),
            exp: self.ttl.map(|ttl| now + ttl.as_secs() as i64),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(AccessToken::new(token))
    }

    /// Check the signature and payload of `token` and return its subject
    pub fn verify(&self, token: &str) -> Result<UserId> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims.sub)
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::encode;
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-bytes-long";

    fn codec() -> TokenCodec {
        TokenCodec::new(&TokenConfig::new(SECRET.to_vec()))
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let codec = codec();
        for subject in ["7", "user-123", "BJenjOX6x", "\u{65E5}\u{672C}"] {
            let token = codec.issue(&UserId::from(subject)).unwrap();
            assert_eq!(codec.verify(token.as_str()).unwrap(), UserId::from(subject));
        }
    }

    #[test]
    fn test_issued_token_has_no_expiry_by_default() {
        let codec = codec();
        let token = codec.issue(&UserId::from("7")).unwrap();
        let payload = token.as_str().split('.').nth(1).unwrap();
        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(claims["sub"], "7");
        assert!(claims.get("iat").is_some());
        assert!(claims.get("exp").is_none());
    }

    #[test]
    fn test_issued_token_with_ttl_carries_expiry() {
        let config = TokenConfig::new(SECRET.to_vec()).with_ttl(Some(Duration::from_secs(600)));
        let codec = TokenCodec::new(&config);
        let token = codec.issue(&UserId::from("7")).unwrap();
        let payload = token.as_str().split('.').nth(1).unwrap();
        let claims: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        let iat = claims["iat"].as_i64().unwrap();
        assert_eq!(claims["exp"].as_i64().unwrap(), iat + 600);
        assert!(codec.verify(token.as_str()).is_ok());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let codec = codec();
        for garbage in ["", "not-a-token", "not.a.valid.token", "a.b.c", "Bearer xyz"] {
            let err = codec.verify(garbage).unwrap_err();
            assert!(err.is_invalid_credential(), "{garbage:?} gave {err:?}");
        }
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let other = TokenCodec::new(&TokenConfig::new(
            b"another-secret-key-at-least-32-bytes".to_vec(),
        ));
        let token = other.issue(&UserId::from("7")).unwrap();
        let result = codec().verify(token.as_str());
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let codec = codec();
        let token = codec.issue(&UserId::from("7")).unwrap();
        let mut parts: Vec<&str> = token.as_str().split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(br#"{"sub":"1"}"#);
        parts[1] = forged.as_str();
        let forged_token = parts.join(".");

        let result = codec.verify(&forged_token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_verify_rejects_other_algorithm() {
        let token = encode(
            &Header::new(Algorithm::HS384),
            &json!({"sub": "7"}),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let err = codec().verify(&token).unwrap_err();
        assert!(err.is_invalid_credential());
    }

    #[test]
    fn test_verify_rejects_missing_subject() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({"iat": 1_700_000_000}),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(codec().verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({"sub": "7", "exp": unix_now() - 3600}),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(matches!(codec().verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_verify_accepts_foreign_token_with_same_secret() {
        // Tokens minted elsewhere with only `sub` are accepted
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({"sub": "42"}),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(codec().verify(&token).unwrap(), UserId::from("42"));
    }

    #[test]
    fn test_debug_does_not_expose_keys() {
        let debug_str = format!("{:?}", codec());
        assert!(debug_str.contains("TokenCodec"));
        assert!(!debug_str.contains("test-secret"));
    }
}
