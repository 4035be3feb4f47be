//! Schema registry for loading, managing, and accessing SCIM schemas.

use super::embedded;
use super::types::Schema;
use crate::error::BuildResult;

use std::collections::BTreeMap;

/// Registry of the schema documents a server exposes.
///
/// Schemas are keyed by URI. Iteration order is by URI, which keeps
/// `/Schemas` responses stable across runs.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Create a registry with no schemas.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with the embedded User, Group and Enterprise User schemas.
    pub fn with_embedded_schemas() -> BuildResult<Self> {
        let mut registry = Self::empty();
        for content in [
            embedded::core_user_schema(),
            embedded::core_group_schema(),
            embedded::enterprise_user_schema(),
        ] {
            registry.add_schema(Self::load_schema_from_str(content)?);
        }
        Ok(registry)
    }

    /// Parse a schema document from its JSON form.
    pub fn load_schema_from_str(content: &str) -> BuildResult<Schema> {
        Ok(serde_json::from_str(content)?)
    }

    /// Add or replace a schema.
    pub fn add_schema(&mut self, schema: Schema) {
        self.schemas.insert(schema.id.clone(), schema);
    }

    /// Get all schemas, ordered by URI.
    pub fn get_schemas(&self) -> Vec<&Schema> {
        self.schemas.values().collect()
    }

    /// Get a specific schema by its exact URI.
    pub fn get_schema(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.schemas.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
