//! Normalized response cache
//!
//! Read query results are stored as the serialized `data` object under a
//! [`CacheKey`] derived from the query id and its variables. The
//! [`CacheSynchronizer`] writes mutation results into those entries.

mod error;
mod key;
mod memory;
mod noop;
mod provider;
mod sync;
mod traced;

pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use memory::InMemoryCache;
pub use noop::NoopCache;
pub use provider::{CacheProvider, CacheStats};
pub use sync::CacheSynchronizer;
pub use traced::TracedCache;
