//! GraphQL object types

use std::sync::Arc;

use async_graphql::{Context, ID, InputObject, Object, Result};

use crate::store::{self, MemoryStore};

/// GraphQL view of a job
#[derive(Debug, Clone)]
pub struct Job(pub store::Job);

#[Object]
impl Job {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Company that posted the job
    async fn company(&self, ctx: &Context<'_>) -> Result<Option<Company>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        Ok(store.company(&self.0.company_id).map(Company))
    }
}

impl From<store::Job> for Job {
    fn from(job: store::Job) -> Self {
        Self(job)
    }
}

/// GraphQL view of a company
#[derive(Debug, Clone)]
pub struct Company(pub store::Company);

#[Object]
impl Company {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Jobs posted by this company
    async fn jobs(&self, ctx: &Context<'_>) -> Result<Vec<Job>> {
        let store = ctx.data::<Arc<MemoryStore>>()?;
        Ok(store
            .jobs_by_company(&self.0.id)
            .into_iter()
            .map(Job)
            .collect())
    }
}

/// Input of `createJob`
///
/// `companyId` is accepted for compatibility with older clients but never
/// used: a job always belongs to the caller's company.
#[derive(Debug, Clone, InputObject)]
pub struct CreateJobInput {
    pub title: String,
    pub description: Option<String>,
    pub company_id: Option<ID>,
}

impl From<CreateJobInput> for store::NewJob {
    fn from(input: CreateJobInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
        }
    }
}
