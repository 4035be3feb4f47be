//! Builder pattern for configuring SCIM server instances.
//!
//! The builder collects server configuration, schemas, resource types and
//! discovery documents, checks them for consistency once, and produces an
//! immutable [`ScimServer`].

use crate::error::{BuildError, BuildResult};
use crate::resource::ResourceType;
use crate::schema::{AttributeValidator, Schema, SchemaRegistry, SchemaValidator};
use crate::schema_discovery::{AuthenticationScheme, ServiceProviderConfig};
use crate::scim_server::ScimServer;

use log::info;
use std::collections::HashSet;
use std::sync::Arc;

/// Endpoints answered by the discovery handlers.
const RESERVED_ENDPOINTS: [&str; 3] = ["Schemas", "ResourceTypes", "ServiceProviderConfig"];

/// Configuration for SCIM server URLs and pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScimServerConfig {
    /// Base URL for the SCIM server, without the version segment.
    /// Examples: "https://scim.example.com", "http://localhost:8080"
    pub base_url: String,

    /// SCIM protocol version path segment. Defaults to "v2".
    pub scim_version: String,

    /// Page size used when a list request has no `count`.
    pub default_page_size: usize,

    /// Upper bound applied to a requested `count`.
    pub max_page_size: usize,
}

impl Default for ScimServerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            scim_version: "v2".to_string(),
            default_page_size: 100,
            max_page_size: 200,
        }
    }
}

impl ScimServerConfig {
    /// Path prefix under which the SCIM endpoints live, e.g. `/v2`.
    pub fn path_prefix(&self) -> String {
        format!("/{}", self.scim_version.trim_matches('/'))
    }

    /// Absolute URL of an endpoint-relative path such as `/Users/123`.
    pub fn location(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path_prefix(),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration.
    pub fn validate(&self) -> BuildResult<()> {
        if self.base_url.is_empty() {
            return Err(BuildError::invalid_configuration("Base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(BuildError::invalid_configuration(
                "Base URL must start with http:// or https://",
            ));
        }

        if self.scim_version.trim_matches('/').is_empty() {
            return Err(BuildError::invalid_configuration(
                "SCIM version cannot be empty",
            ));
        }

        if self.max_page_size == 0 {
            return Err(BuildError::invalid_configuration(
                "Maximum page size must be at least 1",
            ));
        }

        if self.default_page_size > self.max_page_size {
            return Err(BuildError::invalid_configuration(format!(
                "Default page size {} exceeds maximum page size {}",
                self.default_page_size, self.max_page_size
            )));
        }

        Ok(())
    }
}

/// Builder for configuring and creating SCIM server instances.
///
/// The embedded User, Group and Enterprise User schemas are always
/// registered; [`with_schema`](Self::with_schema) adds custom ones.
///
/// # Examples
///
/// ```rust
/// use scim_dispatch::ScimServerBuilder;
/// use scim_dispatch::providers::InMemoryProvider;
/// use scim_dispatch::resource::ResourceType;
/// use scim_dispatch::schema::embedded::{GROUP_SCHEMA_URI, USER_SCHEMA_URI};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let server = ScimServerBuilder::new()
///     .with_base_url("https://scim.company.com")
///     .with_max_page_size(500)
///     .with_resource_type(ResourceType::new(
///         "User",
///         "/Users",
///         USER_SCHEMA_URI,
///         InMemoryProvider::new().with_unique_attribute("userName"),
///     ))
///     .with_resource_type(ResourceType::new(
///         "Group",
///         "/Groups",
///         GROUP_SCHEMA_URI,
///         InMemoryProvider::new(),
///     ))
///     .build()?;
///
/// assert!(server.resource_type("User").is_some());
/// # Ok(())
/// # }
/// ```
pub struct ScimServerBuilder {
    config: ScimServerConfig,
    schemas: Vec<Schema>,
    resource_types: Vec<ResourceType>,
    service_provider_config: Option<ServiceProviderConfig>,
    authentication_schemes: Vec<AuthenticationScheme>,
    validator: Arc<dyn AttributeValidator>,
}

impl Default for ScimServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScimServerBuilder {
    /// Start with default configuration (localhost base URL, `v2`).
    pub fn new() -> Self {
        Self {
            config: ScimServerConfig::default(),
            schemas: Vec::new(),
            resource_types: Vec::new(),
            service_provider_config: None,
            authentication_schemes: Vec::new(),
            validator: Arc::new(SchemaValidator::new()),
        }
    }

    /// Set the base URL used for `meta.location`.
    ///
    /// # Examples
    ///
    /// - `"https://scim.company.com"`
    /// - `"http://localhost:8080"`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the SCIM protocol version path segment. Defaults to "v2".
    pub fn with_scim_version(mut self, version: impl Into<String>) -> Self {
        self.config.scim_version = version.into();
        self
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.config.default_page_size = size;
        self
    }

    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.config.max_page_size = size;
        self
    }

    /// Register an additional schema document.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Register a resource type. Listing order follows registration order.
    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_types.push(resource_type);
        self
    }

    /// Replace the generated service provider configuration.
    pub fn with_service_provider_config(mut self, config: ServiceProviderConfig) -> Self {
        self.service_provider_config = Some(config);
        self
    }

    /// Advertise an authentication scheme in the service provider configuration.
    pub fn with_authentication_scheme(mut self, scheme: AuthenticationScheme) -> Self {
        self.authentication_schemes.push(scheme);
        self
    }

    /// Replace the default [`SchemaValidator`].
    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: AttributeValidator + 'static,
    {
        self.validator = Arc::new(validator);
        self
    }

    /// Build the configured SCIM server.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the configuration is invalid, a resource
    /// type name or endpoint is registered twice, or a resource type refers
    /// to a schema that is not registered.
    pub fn build(self) -> BuildResult<ScimServer> {
        self.config.validate()?;

        let mut schema_registry = SchemaRegistry::with_embedded_schemas()?;
        for schema in self.schemas {
            schema_registry.add_schema(schema);
        }

        let mut names = HashSet::new();
        let mut endpoints = HashSet::new();
        for resource_type in &self.resource_types {
            if !names.insert(resource_type.name().to_string()) {
                return Err(BuildError::DuplicateResourceType {
                    name: resource_type.name().to_string(),
                });
            }
            let endpoint = resource_type.endpoint().trim_matches('/');
            if RESERVED_ENDPOINTS
                .iter()
                .any(|reserved| reserved.eq_ignore_ascii_case(endpoint))
            {
                return Err(BuildError::ReservedEndpoint {
                    endpoint: resource_type.endpoint().to_string(),
                });
            }
            if !endpoints.insert(endpoint.to_ascii_lowercase()) {
                return Err(BuildError::DuplicateEndpoint {
                    endpoint: resource_type.endpoint().to_string(),
                });
            }
            if let Some(missing) = resource_type
                .schema_uris()
                .into_iter()
                .find(|uri| !schema_registry.contains(uri))
            {
                return Err(BuildError::UnknownSchema {
                    resource_type: resource_type.name().to_string(),
                    schema_id: missing.to_string(),
                });
            }
        }

        let mut service_provider_config = self
            .service_provider_config
            .unwrap_or_else(|| ServiceProviderConfig::with_max_results(self.config.max_page_size));
        service_provider_config
            .authentication_schemes
            .extend(self.authentication_schemes);

        info!(
            "Built SCIM server with {} resource types and {} schemas at {}",
            self.resource_types.len(),
            schema_registry.len(),
            self.config.location("")
        );

        Ok(ScimServer::new(
            self.config,
            schema_registry,
            self.resource_types,
            service_provider_config,
            self.validator,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::InMemoryProvider;
    use crate::schema::embedded::{ENTERPRISE_USER_SCHEMA_URI, GROUP_SCHEMA_URI, USER_SCHEMA_URI};

    fn user_type() -> ResourceType {
        ResourceType::new("User", "/Users", USER_SCHEMA_URI, InMemoryProvider::new())
    }

    #[test]
    fn test_location_generation() {
        let config = ScimServerConfig {
            base_url: "https://scim.example.com/".to_string(),
            ..ScimServerConfig::default()
        };

        assert_eq!(
            config.location("/Users/12345"),
            "https://scim.example.com/v2/Users/12345"
        );
        assert_eq!(config.path_prefix(), "/v2");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ScimServerConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "".to_string();
        assert!(config.validate().is_err());

        config.base_url = "invalid-url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://valid.com".to_string();
        config.scim_version = "".to_string();
        assert!(config.validate().is_err());

        config.scim_version = "v2".to_string();
        config.default_page_size = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_resource_type_name() {
        let result = ScimServerBuilder::new()
            .with_resource_type(user_type())
            .with_resource_type(ResourceType::new(
                "User",
                "/People",
                USER_SCHEMA_URI,
                InMemoryProvider::new(),
            ))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::DuplicateResourceType { ref name }) if name == "User"
        ));
    }

    #[test]
    fn test_duplicate_endpoint() {
        let result = ScimServerBuilder::new()
            .with_resource_type(user_type())
            .with_resource_type(ResourceType::new(
                "Person",
                "/users",
                USER_SCHEMA_URI,
                InMemoryProvider::new(),
            ))
            .build();

        assert!(matches!(result, Err(BuildError::DuplicateEndpoint { .. })));
    }

    #[test]
    fn test_discovery_endpoints_are_reserved() {
        for endpoint in ["/Schemas", "/resourcetypes", "/ServiceProviderConfig/"] {
            let result = ScimServerBuilder::new()
                .with_resource_type(ResourceType::new(
                    "Thing",
                    endpoint,
                    USER_SCHEMA_URI,
                    InMemoryProvider::new(),
                ))
                .build();

            assert!(
                matches!(result, Err(BuildError::ReservedEndpoint { .. })),
                "expected {} to be rejected",
                endpoint
            );
        }
    }

    #[test]
    fn test_unknown_schema_is_rejected() {
        let result = ScimServerBuilder::new()
            .with_resource_type(user_type().with_extension("urn:example:missing", false))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::UnknownSchema { ref schema_id, .. }) if schema_id == "urn:example:missing"
        ));
    }

    #[test]
    fn test_custom_schema_registration() {
        let schema = SchemaRegistry::load_schema_from_str(
            r#"{"id": "urn:example:Device", "name": "Device", "attributes": []}"#,
        )
        .unwrap();

        let server = ScimServerBuilder::new()
            .with_schema(schema)
            .with_resource_type(ResourceType::new(
                "Device",
                "/Devices",
                "urn:example:Device",
                InMemoryProvider::new(),
            ))
            .build()
            .unwrap();

        assert!(server.schema_registry().contains("urn:example:Device"));
        assert_eq!(server.schema_registry().len(), 4);
    }

    #[test]
    fn test_generated_service_provider_config() {
        let server = ScimServerBuilder::new()
            .with_max_page_size(50)
            .with_default_page_size(10)
            .with_authentication_scheme(AuthenticationScheme::http_basic())
            .with_resource_type(
                user_type().with_extension(ENTERPRISE_USER_SCHEMA_URI, false),
            )
            .with_resource_type(ResourceType::new(
                "Group",
                "/Groups",
                GROUP_SCHEMA_URI,
                InMemoryProvider::new(),
            ))
            .build()
            .unwrap();

        let config = server.service_provider_config();
        assert!(config.filter.supported);
        assert_eq!(config.filter.max_results, 50);
        assert_eq!(config.authentication_schemes.len(), 1);
    }
}
