//! Constants for the job board server

/// GraphQL error code for missing or rejected credentials
pub const ERROR_CODE_UNAUTHENTICATED: &str = "UNAUTHENTICATED";

/// GraphQL error code for failures not caused by the caller
pub const ERROR_CODE_INTERNAL: &str = "INTERNAL_SERVER_ERROR";

/// Scheme prefix of the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 9000;

/// Default CORS origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Secrets shorter than this trigger a startup warning
pub const MIN_SECRET_LEN: usize = 32;

/// Health status: success
pub const STATUS_OK: &str = "ok";
