//! Job board GraphQL server with bearer-token authentication

pub mod auth;
pub mod config;
mod constants;
mod error;
pub mod graphql;
pub mod observability;
pub mod store;
#[cfg(feature = "http")]
pub mod transport;

pub use auth::{AuthContext, AuthError, TokenCodec, TokenConfig};
pub use config::{Config, ConfigBuilder, HttpConfig, TelemetryConfig};
pub use error::{Error, Result};
pub use graphql::{JobBoardSchema, build_schema};
pub use store::{MemoryStore, SeedData, UserDirectory};
