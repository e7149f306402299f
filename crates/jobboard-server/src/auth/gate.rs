//! Authorization gate for protected resolvers

use super::error::{AuthError, Result};
use super::identity::AuthContext;
use crate::store::UserRecord;

/// Require an authenticated user.
///
/// Protected resolvers call this before any side effect; on error nothing
/// downstream runs.
pub fn guard(ctx: &AuthContext) -> Result<&UserRecord> {
    ctx.user().ok_or_else(|| {
        tracing::debug!("Protected operation attempted without a user");
        AuthError::Unauthorized
    })
}
