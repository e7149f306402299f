//! Write-through from mutation responses into read-query cache entries

use serde_json::{Map, Value};

use super::error::CacheError;
use super::key::CacheKey;
use super::provider::CacheProvider;
use crate::error::{ClientError, Result};
use crate::operation::FieldSet;
use crate::operations::OperationDef;

const ID_FIELD: &str = "id";

/// Copies the entity returned by a mutation into the cache entry of a
/// read-by-id query, so the next cache-first read needs no round trip.
///
/// The mutation must select at least everything the read query selects.
/// This is checked once, at construction.
#[derive(Debug, Clone)]
pub struct CacheSynchronizer {
    mutation_field: &'static str,
    read_query_id: &'static str,
    read_field: &'static str,
    read_selection: FieldSet,
}

impl CacheSynchronizer {
    pub fn new(mutation: &OperationDef, read: &OperationDef) -> Result<Self> {
        let missing = mutation.selection().missing_paths(read.selection());
        if !missing.is_empty() {
            return Err(ClientError::ShapeMismatch {
                mutation: mutation.name().to_string(),
                read: read.name().to_string(),
                missing,
            });
        }

        Ok(Self {
            mutation_field: mutation.response_field(),
            read_query_id: read.name(),
            read_field: read.response_field(),
            read_selection: read.selection().clone(),
        })
    }

    /// Write the entity in `mutation_data` under the read query's key
    ///
    /// `mutation_data` is the `data` object of a successful mutation. Nothing
    /// is written unless the entity carries every field the read query
    /// selects.
    pub async fn synchronize(
        &self,
        cache: &dyn CacheProvider,
        mutation_data: &Value,
    ) -> Result<CacheKey> {
        let entity = mutation_data
            .get(self.mutation_field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ClientError::MissingData(self.mutation_field.to_string()))?;

        let id = match entity.get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(ClientError::IncompleteShape {
                    missing: vec![ID_FIELD.to_string()],
                });
            }
        };

        let projected = self
            .read_selection
            .project(entity)
            .map_err(|missing| ClientError::IncompleteShape { missing })?;

        let key = CacheKey::by_id(self.read_query_id, &id);
        let mut data = Map::new();
        data.insert(self.read_field.to_string(), projected);
        let entry = serde_json::to_vec(&data)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;

        cache.set(&key, &entry).await?;

        tracing::debug!(
            cache.query = self.read_query_id,
            entity.id = %id,
            "Synchronized mutation result into cache"
        );

        Ok(key)
    }
}
