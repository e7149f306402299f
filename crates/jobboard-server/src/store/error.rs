//! Store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read seed file: {0}")]
    SeedRead(#[from] std::io::Error),

    #[error("Failed to parse seed data: {0}")]
    SeedParse(#[from] serde_json::Error),

    #[error("Inconsistent seed data: {0}")]
    InvalidSeed(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
