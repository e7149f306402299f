//! Seed data loading

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::error::{StoreError, StoreResult};
use super::model::{Company, Job, UserId, UserRecord};

/// Initial contents of a [`MemoryStore`](super::MemoryStore)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl SeedData {
    /// Load seed data from a JSON file
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let seed: Self = serde_json::from_str(&content)?;
        seed.validate()?;
        tracing::info!(
            path = %path.display(),
            users = seed.users.len(),
            companies = seed.companies.len(),
            jobs = seed.jobs.len(),
            "Seed data loaded"
        );
        Ok(seed)
    }

    /// Every user and job must reference a known company
    pub fn validate(&self) -> StoreResult<()> {
        let companies: HashSet<&str> = self.companies.iter().map(|c| c.id.as_str()).collect();

        if let Some(user) = self
            .users
            .iter()
            .find(|u| !companies.contains(u.company_id.as_str()))
        {
            return Err(StoreError::InvalidSeed(format!(
                "user {} references unknown company {}",
                user.id, user.company_id
            )));
        }

        if let Some(job) = self
            .jobs
            .iter()
            .find(|j| !companies.contains(j.company_id.as_str()))
        {
            return Err(StoreError::InvalidSeed(format!(
                "job {} references unknown company {}",
                job.id, job.company_id
            )));
        }

        Ok(())
    }

    /// Small built-in data set used when no seed file is configured
    #[must_use]
    pub fn demo() -> Self {
        Self {
            users: vec![
                UserRecord {
                    id: UserId::from("1"),
                    email: "alice@facegle.io".to_string(),
                    password: "alice123".to_string(),
                    company_id: "1".to_string(),
                },
                UserRecord {
                    id: UserId::from("2"),
                    email: "bob@goobook.co".to_string(),
                    password: "bob123".to_string(),
                    company_id: "2".to_string(),
                },
            ],
            companies: vec![
                Company {
                    id: "1".to_string(),
                    name: "Facegle".to_string(),
                    description: Some("We are a startup on a mission to disrupt social search engines. Think Facebook meet Google.".to_string()),
                },
                Company {
                    id: "2".to_string(),
                    name: "Goobook".to_string(),
                    description: Some("We are a startup on a mission to disrupt search social media. Think Google meet Facebook.".to_string()),
                },
            ],
            jobs: vec![
                Job {
                    id: "1".to_string(),
                    company_id: "1".to_string(),
                    title: "Frontend Developer".to_string(),
                    description: Some("We are looking for a Frontend Developer familiar with React.".to_string()),
                },
                Job {
                    id: "2".to_string(),
                    company_id: "1".to_string(),
                    title: "Backend Developer".to_string(),
                    description: Some("We are looking for a Backend Developer familiar with Rust.".to_string()),
                },
                Job {
                    id: "3".to_string(),
                    company_id: "2".to_string(),
                    title: "Full-Stack Developer".to_string(),
                    description: Some("We are looking for a Full-Stack Developer.".to_string()),
                },
            ],
        }
    }
}
