//! Predetermined operations of the job board
//!
//! Each definition carries its operation name (also the cache query id),
//! the response field holding the result and the selection under it. The
//! document text is rendered from that selection.

use serde_json::{Map, Value};

use crate::operation::{FieldSet, Operation, OperationKind};

const JOB_DETAIL_FRAGMENT: &str = "JobDetail";

/// An operation template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDef {
    kind: OperationKind,
    name: &'static str,
    response_field: &'static str,
    selection: FieldSet,
    document: String,
}

impl OperationDef {
    /// Operation name, used as the cache query id
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Key of the result in the response `data` object
    #[must_use]
    pub const fn response_field(&self) -> &'static str {
        self.response_field
    }

    #[must_use]
    pub const fn selection(&self) -> &FieldSet {
        &self.selection
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Instantiate with concrete variables
    #[must_use]
    pub fn operation(&self, variables: Map<String, Value>) -> Operation {
        Operation::new(self.kind, self.name, self.document.clone(), variables)
    }
}

/// Fields shown on the job detail page
#[must_use]
pub fn job_detail() -> FieldSet {
    FieldSet::new()
        .field("id")
        .field("title")
        .nested("company", FieldSet::new().field("id").field("name"))
        .field("description")
}

fn job_detail_fragment() -> String {
    format!(
        "fragment {JOB_DETAIL_FRAGMENT} on Job {{ {} }}",
        job_detail().render()
    )
}

/// `job(id)` read with the job detail selection
#[must_use]
pub fn job_query() -> OperationDef {
    OperationDef {
        kind: OperationKind::Query,
        name: "JobQuery",
        response_field: "job",
        selection: job_detail(),
        document: format!(
            "query JobQuery($id: ID!) {{ job(id: $id) {{ ...{JOB_DETAIL_FRAGMENT} }} }}\n{}",
            job_detail_fragment()
        ),
    }
}

/// All jobs, as listed on the home page
#[must_use]
pub fn jobs_query() -> OperationDef {
    let selection = FieldSet::new()
        .field("id")
        .field("title")
        .nested("company", FieldSet::new().field("id").field("name"));

    OperationDef {
        kind: OperationKind::Query,
        name: "JobsQuery",
        response_field: "jobs",
        document: format!("query JobsQuery {{ jobs {{ {} }} }}", selection.render()),
        selection,
    }
}

/// `company(id)` with its job list
#[must_use]
pub fn company_query() -> OperationDef {
    let selection = FieldSet::new()
        .field("id")
        .field("name")
        .field("description")
        .nested("jobs", FieldSet::new().field("id").field("title"));

    OperationDef {
        kind: OperationKind::Query,
        name: "CompanyQuery",
        response_field: "company",
        document: format!(
            "query CompanyQuery($id: ID!) {{ company(id: $id) {{ {} }} }}",
            selection.render()
        ),
        selection,
    }
}

/// `createJob(input)` aliased to `job`, selecting the job detail fields
#[must_use]
pub fn create_job_mutation() -> OperationDef {
    OperationDef {
        kind: OperationKind::Mutation,
        name: "CreateJobMutation",
        response_field: "job",
        selection: job_detail(),
        document: format!(
            "mutation CreateJobMutation($input: CreateJobInput!) {{ \
             job: createJob(input: $input) {{ ...{JOB_DETAIL_FRAGMENT} }} }}\n{}",
            job_detail_fragment()
        ),
    }
}
