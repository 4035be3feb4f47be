//! Discovery documents: service provider configuration and the wire forms
//! of schemas served from `/Schemas` (RFC 7643 §5 and §7).

use crate::resource::resource_type::DiscoveryMeta;
use crate::schema::Schema;

use serde::{Deserialize, Serialize};

/// Schema URI of the ServiceProviderConfig resource.
pub const SERVICE_PROVIDER_CONFIG_SCHEMA_URI: &str =
    "urn:ietf:params:scim:schemas:core:2.0:ServiceProviderConfig";

/// Schema URI of Schema resources.
pub const SCHEMA_SCHEMA_URI: &str = "urn:ietf:params:scim:schemas:core:2.0:Schema";

/// Service provider configuration advertised at `/ServiceProviderConfig`.
///
/// Static for the lifetime of a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_uri: Option<String>,
    pub patch: Supported,
    pub bulk: BulkConfig,
    pub filter: FilterConfig,
    pub change_password: Supported,
    pub sort: Supported,
    pub etag: Supported,
    pub authentication_schemes: Vec<AuthenticationScheme>,
}

impl ServiceProviderConfig {
    /// Configuration matching what the dispatcher and the in-memory provider
    /// offer: filtering and sorting, with `max_results` as the filter limit.
    pub fn with_max_results(max_results: usize) -> Self {
        Self {
            filter: FilterConfig {
                supported: true,
                max_results,
            },
            sort: Supported::yes(),
            ..Self::default()
        }
    }

    pub fn with_authentication_scheme(mut self, scheme: AuthenticationScheme) -> Self {
        self.authentication_schemes.push(scheme);
        self
    }

    /// Wire form with `schemas` and `meta`.
    pub fn to_representation<'a>(
        &'a self,
        location: &'a str,
    ) -> ServiceProviderConfigRepresentation<'a> {
        ServiceProviderConfigRepresentation {
            schemas: [SERVICE_PROVIDER_CONFIG_SCHEMA_URI],
            config: self,
            meta: DiscoveryMeta {
                resource_type: "ServiceProviderConfig",
                location,
            },
        }
    }
}

impl Default for ServiceProviderConfig {
    fn default() -> Self {
        Self {
            documentation_uri: None,
            patch: Supported::no(),
            bulk: BulkConfig::default(),
            filter: FilterConfig {
                supported: false,
                max_results: 200,
            },
            change_password: Supported::no(),
            sort: Supported::no(),
            etag: Supported::no(),
            authentication_schemes: vec![],
        }
    }
}

/// `{"supported": bool}` capability flag.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supported {
    pub supported: bool,
}

impl Supported {
    pub fn yes() -> Self {
        Self { supported: true }
    }

    pub fn no() -> Self {
        Self { supported: false }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BulkConfig {
    pub supported: bool,
    pub max_operations: u32,
    pub max_payload_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub supported: bool,
    pub max_results: usize,
}

/// Authentication scheme advertised to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationScheme {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_uri: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

impl AuthenticationScheme {
    /// OAuth 2.0 bearer token scheme (RFC 6750).
    pub fn oauth_bearer_token() -> Self {
        Self {
            auth_type: "oauthbearertoken".to_string(),
            name: "OAuth Bearer Token".to_string(),
            description: "Authentication scheme using the OAuth Bearer Token Standard"
                .to_string(),
            spec_uri: Some("https://www.rfc-editor.org/info/rfc6750".to_string()),
            documentation_uri: None,
            primary: true,
        }
    }

    /// HTTP Basic scheme (RFC 7617).
    pub fn http_basic() -> Self {
        Self {
            auth_type: "httpbasic".to_string(),
            name: "HTTP Basic".to_string(),
            description: "Authentication scheme using the HTTP Basic Standard".to_string(),
            spec_uri: Some("https://www.rfc-editor.org/info/rfc7617".to_string()),
            documentation_uri: None,
            primary: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceProviderConfigRepresentation<'a> {
    schemas: [&'static str; 1],
    #[serde(flatten)]
    config: &'a ServiceProviderConfig,
    meta: DiscoveryMeta<'a>,
}

/// Wire form of a schema served from `/Schemas`.
#[derive(Debug, Serialize)]
pub struct SchemaRepresentation<'a> {
    schemas: [&'static str; 1],
    #[serde(flatten)]
    schema: &'a Schema,
    meta: DiscoveryMeta<'a>,
}

impl<'a> SchemaRepresentation<'a> {
    pub fn new(schema: &'a Schema, location: &'a str) -> Self {
        Self {
            schemas: [SCHEMA_SCHEMA_URI],
            schema,
            meta: DiscoveryMeta {
                resource_type: "Schema",
                location,
            },
        }
    }
}
