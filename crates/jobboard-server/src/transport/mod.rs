//! HTTP transport
//!
//! `POST /graphql` runs behind the identity middleware; `/login` and
//! `/health` do not.

mod http;

pub use http::{AppState, router, run_http};
