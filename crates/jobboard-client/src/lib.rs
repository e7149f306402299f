//! Job board GraphQL client
//!
//! ```no_run
//! # async fn demo() -> jobboard_client::Result<()> {
//! use jobboard_client::{JobBoardClient, NewJob};
//!
//! let client = JobBoardClient::connect("http://localhost:9000")?;
//! client.login("alice@facegle.io", "alice123").await?;
//!
//! let job = client.create_job(NewJob::new("Rust Developer")).await?;
//! // Served from the cache, no request sent
//! let same = client.load_job(&job.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod client;
mod error;
mod interceptor;
mod model;
pub mod operation;
pub mod operations;
mod session;
pub mod transport;

pub use client::{FetchPolicy, JobBoardClient};
pub use error::{ClientError, GraphQlError, GraphQlErrorExtensions, Result, UNAUTHENTICATED_CODE};
pub use interceptor::AuthInterceptor;
pub use model::{CompanyDetail, CompanyRef, JobDetail, JobRef, JobSummary, NewJob};
pub use operation::{FieldSet, Operation, OperationKind};
pub use session::Session;
pub use transport::{HttpTransport, Transport};
