//! Mutation resolvers

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::types::{CreateJobInput, Job};
use crate::auth::{AuthContext, AuthError, guard};
use crate::store::MemoryStore;

/// Root mutation type; every field requires an authenticated user
#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Post a job on behalf of the caller's company
    async fn create_job(&self, ctx: &Context<'_>, input: CreateJobInput) -> Result<Job> {
        let auth = ctx.data_opt::<AuthContext>().ok_or(AuthError::Unauthorized);
        let user = auth
            .and_then(guard)
            .map_err(|e| e.extend())?;

        if let Some(requested) = &input.company_id {
            if requested.as_str() != user.company_id {
                tracing::debug!(
                    user.id = %user.id,
                    requested_company = %requested.as_str(),
                    "Ignoring companyId from input"
                );
            }
        }

        let store = ctx.data::<Arc<MemoryStore>>()?;
        let job = store.create_job(&user.company_id, input.into());

        #[cfg(feature = "metrics")]
        crate::observability::record_job_created();

        tracing::info!(job.id = %job.id, user.id = %user.id, "Job created");
        Ok(Job(job))
    }
}
