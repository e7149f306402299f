//! High-level client

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cache::{CacheKey, CacheProvider, CacheSynchronizer, InMemoryCache, TracedCache};
use crate::error::{ClientError, Result};
use crate::interceptor::AuthInterceptor;
use crate::model::{CompanyDetail, JobDetail, JobSummary, NewJob};
use crate::operations::{
    OperationDef, company_query, create_job_mutation, job_query, jobs_query,
};
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};

/// Where a read is served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve from the cache when present, else fetch and cache
    #[default]
    CacheFirst,
    /// Always fetch, then refresh the cache
    NetworkOnly,
    /// Always fetch, never read or write the cache
    NoCache,
}

/// Job board client
///
/// Every operation passes through the [`AuthInterceptor`] before reaching
/// the transport. Successful `create_job` calls are written through to the
/// cache entry of the matching `job(id)` read.
pub struct JobBoardClient {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn CacheProvider>,
    session: Arc<Session>,
    interceptor: AuthInterceptor,
    job_query: OperationDef,
    jobs_query: OperationDef,
    company_query: OperationDef,
    create_job: OperationDef,
    create_job_sync: CacheSynchronizer,
}

impl std::fmt::Debug for JobBoardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobBoardClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl JobBoardClient {
    /// Client over `transport` with a fresh session and an in-memory cache
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        let session = Arc::new(Session::new());
        let create_job = create_job_mutation();
        let job_query = job_query();
        let create_job_sync = CacheSynchronizer::new(&create_job, &job_query)?;

        Ok(Self {
            transport,
            cache: Arc::new(TracedCache::new(InMemoryCache::new())),
            interceptor: AuthInterceptor::new(Arc::clone(&session)),
            session,
            job_query,
            jobs_query: jobs_query(),
            company_query: company_query(),
            create_job,
            create_job_sync,
        })
    }

    /// Client for the server at `base_url`
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::new(Arc::new(HttpTransport::new(base_url)?))
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheProvider>) -> Self {
        self.cache = cache;
        self
    }

    /// Use a session shared with other components
    #[must_use]
    pub fn with_session(mut self, session: Arc<Session>) -> Self {
        self.interceptor = AuthInterceptor::new(Arc::clone(&session));
        self.session = session;
        self
    }

    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<dyn CacheProvider> {
        &self.cache
    }

    /// Log in and keep the issued token in the session
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        match self.transport.login(email, password).await {
            Ok(token) => {
                self.session.set_token(token);
                tracing::info!("Logged in");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Logged out");
    }

    pub async fn load_job(&self, id: &str) -> Result<Option<JobDetail>> {
        self.load_job_with(id, FetchPolicy::CacheFirst).await
    }

    pub async fn load_job_with(&self, id: &str, policy: FetchPolicy) -> Result<Option<JobDetail>> {
        let data = self.fetch(&self.job_query, id_variables(id), policy).await?;
        root_field(data, self.job_query.response_field())
    }

    pub async fn load_company(&self, id: &str) -> Result<Option<CompanyDetail>> {
        self.load_company_with(id, FetchPolicy::CacheFirst).await
    }

    pub async fn load_company_with(
        &self,
        id: &str,
        policy: FetchPolicy,
    ) -> Result<Option<CompanyDetail>> {
        let data = self
            .fetch(&self.company_query, id_variables(id), policy)
            .await?;
        root_field(data, self.company_query.response_field())
    }

    /// List all jobs; always fetched, never cached
    pub async fn load_jobs(&self) -> Result<Vec<JobSummary>> {
        let data = self
            .fetch(&self.jobs_query, Map::new(), FetchPolicy::NoCache)
            .await?;
        root_field(data, self.jobs_query.response_field())
    }

    /// Post a job for the logged-in user's company
    ///
    /// On success the created job is also written to the `job(id)` cache
    /// entry, so a following [`JobBoardClient::load_job`] is served locally.
    pub async fn create_job(&self, input: NewJob) -> Result<JobDetail> {
        let mut variables = Map::new();
        variables.insert("input".to_string(), serde_json::to_value(&input)?);

        let data = self.execute(&self.create_job, variables).await?;

        // The job exists server-side even if the cache write fails
        if let Err(e) = self
            .create_job_sync
            .synchronize(self.cache.as_ref(), &data)
            .await
        {
            tracing::warn!(error = %e, "Created job not synchronized into cache");
        }

        root_field::<Option<JobDetail>>(data, self.create_job.response_field())?.ok_or_else(|| {
            ClientError::MissingData(self.create_job.response_field().to_string())
        })
    }

    async fn execute(&self, def: &OperationDef, variables: Map<String, Value>) -> Result<Value> {
        let operation = self.interceptor.intercept(def.operation(variables));
        self.transport.execute(operation).await
    }

    async fn fetch(
        &self,
        def: &OperationDef,
        variables: Map<String, Value>,
        policy: FetchPolicy,
    ) -> Result<Value> {
        let key = CacheKey::query(def.name(), &Value::Object(variables.clone()));

        if policy == FetchPolicy::CacheFirst
            && let Some(bytes) = self.cache.get(&key).await?
        {
            match serde_json::from_slice(&bytes) {
                Ok(data) => {
                    tracing::debug!(operation = def.name(), "Served from cache");
                    return Ok(data);
                }
                Err(e) => {
                    tracing::warn!(operation = def.name(), error = %e, "Dropping unreadable cache entry");
                    self.cache.delete(&key).await?;
                }
            }
        }

        let data = self.execute(def, variables).await?;

        if policy != FetchPolicy::NoCache {
            self.cache.set(&key, &serde_json::to_vec(&data)?).await?;
        }

        Ok(data)
    }
}

fn id_variables(id: &str) -> Map<String, Value> {
    let mut variables = Map::new();
    variables.insert("id".to_string(), Value::String(id.to_string()));
    variables
}

fn root_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ClientError::MissingData(field.to_string()))?;
    Ok(serde_json::from_value(value)?)
}
