//! In-memory store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::UserDirectory;
use super::error::StoreResult;
use super::model::{Company, Job, NewJob, UserId, UserRecord};
use super::seed::SeedData;

struct Tables {
    users: HashMap<UserId, UserRecord>,
    companies: HashMap<String, Company>,
    /// Kept in insertion order so listings are stable
    jobs: Vec<Job>,
    next_job_id: u64,
}

/// Thread-safe in-memory store of users, companies and jobs
///
/// Reads take a shared lock; `create_job` is the only writer.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("MemoryStore")
            .field("users", &tables.users.len())
            .field("companies", &tables.companies.len())
            .field("jobs", &tables.jobs.len())
            .finish()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new(seed: SeedData) -> Self {
        let next_job_id = seed.jobs.len() as u64 + 1;
        Self {
            tables: RwLock::new(Tables {
                users: seed.users.into_iter().map(|u| (u.id.clone(), u)).collect(),
                companies: seed
                    .companies
                    .into_iter()
                    .map(|c| (c.id.clone(), c))
                    .collect(),
                jobs: seed.jobs,
                next_job_id,
            }),
        }
    }

    #[must_use]
    pub fn company(&self, id: &str) -> Option<Company> {
        self.tables.read().companies.get(id).cloned()
    }

    #[must_use]
    pub fn job(&self, id: &str) -> Option<Job> {
        self.tables.read().jobs.iter().find(|j| j.id == id).cloned()
    }

    #[must_use]
    pub fn jobs(&self) -> Vec<Job> {
        self.tables.read().jobs.clone()
    }

    #[must_use]
    pub fn jobs_by_company(&self, company_id: &str) -> Vec<Job> {
        self.tables
            .read()
            .jobs
            .iter()
            .filter(|j| j.company_id == company_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn job_count(&self) -> usize {
        self.tables.read().jobs.len()
    }

    /// Insert a job owned by `company_id` and return it with its new id
    ///
    /// The company does not have to exist; such a job resolves to no company.
    pub fn create_job(&self, company_id: &str, input: NewJob) -> Job {
        let mut tables = self.tables.write();

        let id = loop {
            let candidate = tables.next_job_id.to_string();
            tables.next_job_id += 1;
            if !tables.jobs.iter().any(|j| j.id == candidate) {
                break candidate;
            }
        };

        let job = Job {
            id,
            company_id: company_id.to_string(),
            title: input.title,
            description: input.description,
        };
        tables.jobs.push(job.clone());
        drop(tables);

        tracing::debug!(job.id = %job.id, job.company_id = %job.company_id, "Job created");
        job
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(SeedData::default())
    }
}

impl UserDirectory for MemoryStore {
    fn user(&self, id: &UserId) -> StoreResult<Option<UserRecord>> {
        Ok(self.tables.read().users.get(id).cloned())
    }

    fn user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}
