//! Query resolvers

use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result};

use super::types::{Company, Job};
use crate::store::MemoryStore;

/// Root query type; every field is public
#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Look a job up by id
    async fn job(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Job>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        Ok(store.job(&id).map(Job))
    }

    /// List all jobs
    async fn jobs(&self, ctx: &Context<'_>) -> Result<Vec<Job>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        Ok(store.jobs().into_iter().map(Job).collect())
    }

    /// Look a company up by id
    async fn company(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Company>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        Ok(store.company(&id).map(Company))
    }
}
