//! Data store backing the GraphQL resolvers
//!
//! The store is a read-mostly collaborator of the authentication pipeline:
//! the identity resolver only ever looks users up through [`UserDirectory`],
//! and `createJob` is the single mutating path.

mod error;
mod memory;
mod model;
mod seed;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{Company, Job, NewJob, UserId, UserRecord};
pub use seed::SeedData;

/// Read access to registered users
pub trait UserDirectory: Send + Sync {
    /// Look a user up by id; `Ok(None)` means the user does not exist
    fn user(&self, id: &UserId) -> StoreResult<Option<UserRecord>>;

    /// Look a user up by login email
    fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;
}
