//! Cache error types

use thiserror::Error;

/// Cache operation errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to encode cache entry: {0}")]
    Serialization(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
