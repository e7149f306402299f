//! Cache key derivation

use std::fmt;

use serde_json::Value;

/// Prefix shared by every query-result key
const QUERY_NAMESPACE: &str = "query";

/// Cache key of a read query result
///
/// Derived purely from the query id and its variables. Variables are
/// canonicalized with object keys sorted at every depth, so logically equal
/// variable sets produce equal keys regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query_id: String,
    variables: String,
}

impl CacheKey {
    /// Create the key for `query_id` called with `variables`
    #[must_use]
    pub fn query(query_id: &str, variables: &Value) -> Self {
        Self {
            query_id: query_id.to_string(),
            variables: canonical_json(variables),
        }
    }

    /// Key of a query taking a single `id` variable
    #[must_use]
    pub fn by_id(query_id: &str, id: &str) -> Self {
        Self::query(query_id, &serde_json::json!({ "id": id }))
    }

    #[must_use]
    pub fn query_id(&self) -> &str {
        &self.query_id
    }

    /// Canonical JSON text of the variables
    #[must_use]
    pub fn variables(&self) -> &str {
        &self.variables
    }

    /// Flat string form, `query:<query_id>:<variables>`
    #[must_use]
    pub fn to_key_string(&self) -> String {
        format!("{QUERY_NAMESPACE}:{}:{}", self.query_id, self.variables)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key_string())
    }
}

/// Serialize `value` with object keys sorted recursively
fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Display of a JSON leaf is its compact, escaped form
        leaf => out.push_str(&leaf.to_string()),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push_str(&Value::String(s.to_string()).to_string());
}
