//! Request identity middleware for HTTP transport
//!
//! This module requires the `http` feature for axum integration.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use super::error::AuthError;
use super::identity::{AuthContext, IdentityResolver, bearer_token};

/// Authentication state for middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    pub resolver: Arc<IdentityResolver>,
}

impl AuthState {
    #[must_use]
    pub const fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self { resolver }
    }
}

/// Resolve the caller's identity and attach it to the request.
///
/// A request without an `Authorization` header proceeds anonymously. A
/// header that fails verification ends the request with 401 before any
/// GraphQL resolver runs.
#[allow(clippy::future_not_send)]
pub async fn identity_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = resolve_request(&state, &request);

    #[cfg(feature = "metrics")]
    crate::observability::record_auth_outcome(match &context {
        Ok(ctx) if ctx.is_authenticated() => "authenticated",
        Ok(_) => "anonymous",
        Err(_) => "rejected",
    });

    request.extensions_mut().insert(context?);
    Ok(next.run(request).await)
}

fn resolve_request(state: &AuthState, request: &Request) -> Result<AuthContext, AuthError> {
    let raw = match request.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => {
            let value = value.to_str().map_err(|_| {
                tracing::warn!("Authorization header is not valid UTF-8");
                AuthError::InvalidToken
            })?;
            Some(bearer_token(value)?)
        }
    };
    state.resolver.resolve(raw)
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = if self.is_internal() {
            tracing::error!(error = %self, "Authentication failed internally");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        } else if self.is_invalid_credential() || matches!(self, Self::StaleIdentity) {
            (StatusCode::UNAUTHORIZED, "invalid credential".to_string())
        } else {
            (StatusCode::UNAUTHORIZED, self.to_string())
        };

        (status, Json(json!({ "error": message, "code": self.code() }))).into_response()
    }
}
