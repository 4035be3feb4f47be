//! Core SCIM server structure: the immutable registry shared by every request.

use crate::resource::ResourceType;
use crate::schema::{AttributeValidator, ExtensionSchema, ResourceSchemas, SchemaRegistry};
use crate::schema_discovery::ServiceProviderConfig;
use crate::scim_server::builder::ScimServerConfig;

use std::fmt;
use std::sync::Arc;

/// Registry of schemas, resource types and discovery documents.
///
/// Built once by [`ScimServerBuilder`](super::ScimServerBuilder) and
/// read-only afterwards, so it can be shared across request tasks by
/// reference or `Arc`.
pub struct ScimServer {
    config: ScimServerConfig,
    schema_registry: SchemaRegistry,
    resource_types: Vec<ResourceType>,
    service_provider_config: ServiceProviderConfig,
    validator: Arc<dyn AttributeValidator>,
}

impl ScimServer {
    pub(super) fn new(
        config: ScimServerConfig,
        schema_registry: SchemaRegistry,
        resource_types: Vec<ResourceType>,
        service_provider_config: ServiceProviderConfig,
        validator: Arc<dyn AttributeValidator>,
    ) -> Self {
        Self {
            config,
            schema_registry,
            resource_types,
            service_provider_config,
            validator,
        }
    }

    pub fn config(&self) -> &ScimServerConfig {
        &self.config
    }

    pub fn schema_registry(&self) -> &SchemaRegistry {
        &self.schema_registry
    }

    pub fn service_provider_config(&self) -> &ServiceProviderConfig {
        &self.service_provider_config
    }

    pub fn validator(&self) -> &dyn AttributeValidator {
        self.validator.as_ref()
    }

    /// Resource types in registration order.
    pub fn resource_types(&self) -> &[ResourceType] {
        &self.resource_types
    }

    /// Find a resource type by exact name.
    pub fn resource_type(&self, name: &str) -> Option<&ResourceType> {
        self.resource_types.iter().find(|rt| rt.name() == name)
    }

    /// Find a resource type by endpoint, e.g. `/Users`. Case-insensitive.
    pub fn resource_type_by_endpoint(&self, endpoint: &str) -> Option<&ResourceType> {
        let endpoint = endpoint.trim_matches('/');
        self.resource_types
            .iter()
            .find(|rt| rt.endpoint().trim_start_matches('/').eq_ignore_ascii_case(endpoint))
    }

    /// Resolve the schema documents a resource type validates against.
    ///
    /// Returns `None` only if a schema disappeared from the registry, which
    /// the builder rules out.
    pub fn resource_schemas(&self, resource_type: &ResourceType) -> Option<ResourceSchemas<'_>> {
        let core = self.schema_registry.get_schema(resource_type.schema())?;
        let extensions = resource_type
            .schema_extensions()
            .iter()
            .map(|ext| {
                self.schema_registry
                    .get_schema(&ext.schema)
                    .map(|schema| ExtensionSchema {
                        schema,
                        required: ext.required,
                    })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(ResourceSchemas { core, extensions })
    }
}

impl fmt::Debug for ScimServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScimServer")
            .field("config", &self.config)
            .field("schemas", &self.schema_registry.len())
            .field("resource_types", &self.resource_types)
            .finish_non_exhaustive()
    }
}
