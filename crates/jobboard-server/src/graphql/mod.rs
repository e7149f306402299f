//! GraphQL schema
//!
//! Resolvers read the per-request [`AuthContext`](crate::auth::AuthContext)
//! from the request data; it is attached by the transport, never looked up
//! by resolvers themselves.

mod mutation;
mod query;
mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{Company, CreateJobInput, Job};

use crate::store::MemoryStore;

pub type JobBoardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over a shared store
pub fn build_schema(store: Arc<MemoryStore>) -> JobBoardSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

#[cfg(test)]
mod tests {
    use async_graphql::{Request, Variables};
    use serde_json::{Value, json};

    use super::*;
    use crate::auth::AuthContext;
    use crate::store::{Company as CompanyRecord, SeedData, UserId, UserRecord};

    const CREATE_JOB: &str = r"
        mutation CreateJob($input: CreateJobInput!) {
            job: createJob(input: $input) { id title description company { id name } }
        }
    ";

    fn user_7() -> UserRecord {
        UserRecord {
            id: UserId::from("7"),
            email: "a@x.com".into(),
            password: "secret".into(),
            company_id: "42".into(),
        }
    }

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new(SeedData {
            users: vec![user_7()],
            companies: vec![
                CompanyRecord {
                    id: "42".into(),
                    name: "Acme".into(),
                    description: Some("Rockets".into()),
                },
                CompanyRecord {
                    id: "99".into(),
                    name: "Rival".into(),
                    description: None,
                },
            ],
            jobs: vec![],
        }))
    }

    async fn execute(schema: &JobBoardSchema, request: Request) -> Value {
        serde_json::to_value(schema.execute(request).await).unwrap()
    }

    fn create_job_request(input: Value) -> Request {
        Request::new(CREATE_JOB).variables(Variables::from_json(json!({ "input": input })))
    }

    #[tokio::test]
    async fn test_create_job_anonymous_is_rejected() {
        let store = store();
        let schema = build_schema(Arc::clone(&store));

        let before = store.jobs();

        let request = create_job_request(json!({"title": "Engineer"})).data(AuthContext::anonymous());
        let response = execute(&schema, request).await;

        assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
        assert_eq!(response["data"], Value::Null);
        assert_eq!(store.jobs(), before);
    }

    #[tokio::test]
    async fn test_create_job_without_context_is_rejected() {
        let store = store();
        let schema = build_schema(Arc::clone(&store));

        let response = execute(&schema, create_job_request(json!({"title": "Engineer"}))).await;

        assert_eq!(response["errors"][0]["extensions"]["code"], "UNAUTHENTICATED");
        assert_eq!(store.job_count(), 0);
    }

    #[tokio::test]
    async fn test_create_job_uses_callers_company() {
        let store = store();
        let schema = build_schema(Arc::clone(&store));

        let request = create_job_request(json!({"title": "Engineer"}))
            .data(AuthContext::authenticated(user_7()));
        let response = execute(&schema, request).await;

        assert!(response.get("errors").is_none(), "{response}");
        let job = &response["data"]["job"];
        assert_eq!(job["title"], "Engineer");
        assert_eq!(job["company"]["id"], "42");
        assert_eq!(job["company"]["name"], "Acme");
        assert_eq!(store.job_count(), 1);

        let id = job["id"].as_str().unwrap();
        assert_eq!(store.job(id).unwrap().company_id, "42");
    }

    #[tokio::test]
    async fn test_create_job_without_company_record() {
        let store = Arc::new(MemoryStore::new(SeedData {
            users: vec![user_7()],
            ..Default::default()
        }));
        let schema = build_schema(Arc::clone(&store));

        let request = create_job_request(json!({"title": "Engineer"}))
            .data(AuthContext::authenticated(user_7()));
        let response = execute(&schema, request).await;

        assert!(response.get("errors").is_none(), "{response}");
        let job = &response["data"]["job"];
        assert_eq!(job["title"], "Engineer");
        assert_eq!(job["company"], Value::Null);

        let id = job["id"].as_str().unwrap();
        assert_eq!(store.job(id).unwrap().company_id, "42");
        assert_eq!(store.job_count(), 1);
    }

    #[tokio::test]
    async fn test_create_job_ignores_input_company() {
        let store = store();
        let schema = build_schema(Arc::clone(&store));

        let request = create_job_request(json!({"title": "Engineer", "companyId": "99"}))
            .data(AuthContext::authenticated(user_7()));
        let response = execute(&schema, request).await;

        assert_eq!(response["data"]["job"]["company"]["id"], "42");
        assert!(store.jobs_by_company("99").is_empty());
    }

    #[tokio::test]
    async fn test_queries_are_public() {
        let schema = build_schema(Arc::new(MemoryStore::new(SeedData::demo())));

        let response = execute(
            &schema,
            Request::new("{ jobs { id title company { name } } }"),
        )
        .await;
        assert!(response.get("errors").is_none(), "{response}");
        assert!(!response["data"]["jobs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_company_lists_its_jobs() {
        let store = store();
        let schema = build_schema(Arc::clone(&store));
        let user = AuthContext::authenticated(user_7());

        execute(
            &schema,
            create_job_request(json!({"title": "Engineer"})).data(user),
        )
        .await;

        let response = execute(
            &schema,
            Request::new(r#"{ company(id: "42") { name description jobs { title } } }"#),
        )
        .await;
        assert_eq!(response["data"]["company"]["description"], "Rockets");
        assert_eq!(response["data"]["company"]["jobs"][0]["title"], "Engineer");
    }

    #[tokio::test]
    async fn test_unknown_job_is_null() {
        let schema = build_schema(store());
        let response = execute(&schema, Request::new(r#"{ job(id: "nope") { id } }"#)).await;
        assert_eq!(response["data"]["job"], Value::Null);
        assert!(response.get("errors").is_none());
    }
}
