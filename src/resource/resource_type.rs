//! Resource type registration: endpoint, schemas and provider binding.

use super::provider::ResourceProvider;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Schema URI of the ResourceType discovery resource.
pub const RESOURCE_TYPE_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:ResourceType";

/// A schema extension attached to a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaExtension {
    /// Extension schema URI
    pub schema: String,
    /// Whether resources must carry the extension
    pub required: bool,
}

/// One kind of manageable resource, e.g. "User" or "Group".
///
/// Binds a name and endpoint to a core schema, its extensions and the
/// provider that stores resources of this kind. Resource types are immutable
/// once the server is built.
#[derive(Clone)]
pub struct ResourceType {
    name: String,
    endpoint: String,
    description: String,
    schema: String,
    schema_extensions: Vec<SchemaExtension>,
    provider: Arc<dyn ResourceProvider>,
}

impl ResourceType {
    /// Create a resource type.
    ///
    /// The endpoint is normalized to start with `/` and to carry no trailing `/`.
    pub fn new<P>(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        schema: impl Into<String>,
        provider: P,
    ) -> Self
    where
        P: ResourceProvider + 'static,
    {
        let endpoint = endpoint.into();
        let endpoint = format!("/{}", endpoint.trim_matches('/'));
        Self {
            name: name.into(),
            endpoint,
            description: String::new(),
            schema: schema.into(),
            schema_extensions: Vec::new(),
            provider: Arc::new(provider),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach a schema extension.
    pub fn with_extension(mut self, schema: impl Into<String>, required: bool) -> Self {
        self.schema_extensions.push(SchemaExtension {
            schema: schema.into(),
            required,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Core schema URI.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn schema_extensions(&self) -> &[SchemaExtension] {
        &self.schema_extensions
    }

    pub fn provider(&self) -> &dyn ResourceProvider {
        self.provider.as_ref()
    }

    /// Core schema URI followed by every extension URI.
    pub fn schema_uris(&self) -> Vec<&str> {
        std::iter::once(self.schema.as_str())
            .chain(self.schema_extensions.iter().map(|ext| ext.schema.as_str()))
            .collect()
    }

    /// Discovery document for `/ResourceTypes`.
    pub fn to_representation<'a>(&'a self, location: &'a str) -> ResourceTypeRepresentation<'a> {
        ResourceTypeRepresentation {
            schemas: [RESOURCE_TYPE_SCHEMA_URI],
            id: &self.name,
            name: &self.name,
            endpoint: &self.endpoint,
            description: &self.description,
            schema: &self.schema,
            schema_extensions: &self.schema_extensions,
            meta: DiscoveryMeta {
                resource_type: "ResourceType",
                location,
            },
        }
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("schema", &self.schema)
            .field("schema_extensions", &self.schema_extensions)
            .finish_non_exhaustive()
    }
}

/// Wire form of a resource type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeRepresentation<'a> {
    schemas: [&'static str; 1],
    id: &'a str,
    name: &'a str,
    endpoint: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    schema: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    schema_extensions: &'a [SchemaExtension],
    meta: DiscoveryMeta<'a>,
}

/// `meta` block of discovery documents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryMeta<'a> {
    pub resource_type: &'static str,
    pub location: &'a str,
}
