//! Authentication and authorization
//!
//! The pipeline per request:
//!
//! 1. the transport reads the `Authorization` header
//! 2. [`IdentityResolver`] verifies the token with [`TokenCodec`] and looks the
//!    subject up in the user directory, producing an [`AuthContext`]
//! 3. the context is handed to every GraphQL resolver of the request
//! 4. protected resolvers call [`guard`] before doing anything
//!
//! Login ([`authenticate`]) is the only place tokens are issued.

mod claims;
mod codec;
mod config;
mod error;
mod gate;
mod identity;
mod login;
#[cfg(feature = "http")]
mod middleware;

pub use claims::{AccessToken, TokenClaims};
pub use codec::TokenCodec;
pub use config::{StaleIdentityPolicy, TokenConfig, decode_secret};
pub use error::{AuthError, Result};
pub use gate::guard;
pub use identity::{AuthContext, IdentityResolver, bearer_token};
pub use login::authenticate;
#[cfg(feature = "http")]
pub use middleware::{AuthState, identity_middleware};
