//! GraphQL operations and selection shapes

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

/// Whether an operation reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// An operation ready to be sent
///
/// Document and variables are fixed at construction. Only transport
/// metadata (headers) can be added afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    name: String,
    document: String,
    variables: Map<String, Value>,
    headers: BTreeMap<String, String>,
}

impl Operation {
    #[must_use]
    pub fn new(
        kind: OperationKind,
        name: impl Into<String>,
        document: impl Into<String>,
        variables: Map<String, Value>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            document: document.into(),
            variables,
            headers: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub const fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Header value by lowercase name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Set a header, replacing any previous value
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// GraphQL-over-HTTP request body
    #[must_use]
    pub fn request_body(&self) -> Value {
        json!({
            "query": self.document,
            "operationName": self.name,
            "variables": self.variables,
        })
    }
}

/// A selected field and its sub-selection
#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: String,
    children: FieldSet,
}

/// Tree of selected fields
///
/// The same tree renders the selection into document text and checks
/// response data against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a leaf field
    #[must_use]
    pub fn field(self, name: &str) -> Self {
        self.nested(name, Self::new())
    }

    /// Add a field with a sub-selection
    #[must_use]
    pub fn nested(mut self, name: &str, children: Self) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            children,
        });
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render as selection-set body, e.g. `id title company { id name }`
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&field.name);
            if !field.children.is_empty() {
                out.push_str(" { ");
                out.push_str(&field.children.render());
                out.push_str(" }");
            }
        }
        out
    }

    /// Dotted paths selected by `required` but absent from `self`
    #[must_use]
    pub fn missing_paths(&self, required: &Self) -> Vec<String> {
        let mut missing = Vec::new();
        self.collect_missing(required, "", &mut missing);
        missing
    }

    fn collect_missing(&self, required: &Self, prefix: &str, missing: &mut Vec<String>) {
        for field in &required.fields {
            let path = join_path(prefix, &field.name);
            match self.get(&field.name) {
                Some(own) => own.children.collect_missing(&field.children, &path, missing),
                None => missing.push(path),
            }
        }
    }

    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.missing_paths(other).is_empty()
    }

    /// Keep only the selected fields of `value`
    ///
    /// Lists are projected element-wise and `null` is kept as is. Fails with
    /// the dotted paths of every selected field absent from `value`.
    pub fn project(&self, value: &Value) -> Result<Value, Vec<String>> {
        let mut missing = Vec::new();
        let projected = self.project_at(value, "", &mut missing);
        if missing.is_empty() {
            Ok(projected)
        } else {
            Err(missing)
        }
    }

    fn project_at(&self, value: &Value, prefix: &str, missing: &mut Vec<String>) -> Value {
        if self.is_empty() {
            return value.clone();
        }

        match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.project_at(item, prefix, missing))
                    .collect(),
            ),
            Value::Object(object) => {
                let mut out = Map::new();
                for field in &self.fields {
                    let path = join_path(prefix, &field.name);
                    match object.get(&field.name) {
                        Some(child) => {
                            out.insert(
                                field.name.clone(),
                                field.children.project_at(child, &path, missing),
                            );
                        }
                        None => missing.push(path),
                    }
                }
                Value::Object(out)
            }
            Value::Null => Value::Null,
            // A scalar where an object was selected: every field is missing
            _ => {
                missing.extend(self.fields.iter().map(|f| join_path(prefix, &f.name)));
                Value::Null
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
