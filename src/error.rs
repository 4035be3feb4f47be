//! Error types for SCIM request handling.
//!
//! Three families live here:
//!
//! * [`ScimError`] - the protocol error object sent to clients (RFC 7644 §3.12)
//! * Backend outcome enumerations ([`ValidationError`], [`CreateError`],
//!   [`ReadError`], [`ReplaceError`], [`DeleteError`]) returned by the
//!   validation and resource provider capabilities
//! * [`BuildError`] - problems detected while assembling a server

use http::StatusCode;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Schema URI carried by every SCIM error body.
pub const ERROR_SCHEMA_URI: &str = "urn:ietf:params:scim:api:messages:2.0:Error";

/// Boxed error used by backends to report internal failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Machine-readable error subtypes defined by RFC 7644 §3.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScimErrorType {
    /// Filter syntax is invalid or the filter cannot be evaluated
    InvalidFilter,
    /// Attribute values are already in use or reserved
    Uniqueness,
    /// Request body is unparsable or structurally wrong
    InvalidSyntax,
    /// A value is missing or incompatible with the resource schema
    InvalidValue,
}

impl ScimErrorType {
    /// Wire representation of the subtype.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScimErrorType::InvalidFilter => "invalidFilter",
            ScimErrorType::Uniqueness => "uniqueness",
            ScimErrorType::InvalidSyntax => "invalidSyntax",
            ScimErrorType::InvalidValue => "invalidValue",
        }
    }
}

impl fmt::Display for ScimErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ScimErrorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// SCIM protocol error returned to the client.
///
/// The serialized form is `{"schemas": [...], "scimType"?, "detail", "status"}`
/// where `status` always equals the HTTP status of the response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail} (status {status})")]
pub struct ScimError {
    status: StatusCode,
    detail: String,
    scim_type: Option<ScimErrorType>,
}

impl ScimError {
    /// Generic detail used for every internal fault.
    pub const INTERNAL_DETAIL: &'static str = "Internal server error.";

    /// Create an error with an explicit status, detail and subtype.
    pub fn new(
        status: StatusCode,
        detail: impl Into<String>,
        scim_type: Option<ScimErrorType>,
    ) -> Self {
        Self {
            status,
            detail: detail.into(),
            scim_type,
        }
    }

    /// 400 for a request body that cannot be parsed.
    pub fn invalid_syntax(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            detail,
            Some(ScimErrorType::InvalidSyntax),
        )
    }

    /// 400 for a value that violates the resource schema or request rules.
    pub fn invalid_value(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            detail,
            Some(ScimErrorType::InvalidValue),
        )
    }

    /// 400 for a filter the backend cannot evaluate.
    pub fn invalid_filter(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            detail,
            Some(ScimErrorType::InvalidFilter),
        )
    }

    /// 404 naming the identifier that was not found.
    pub fn resource_not_found(id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("Resource \"{}\" not found.", id),
            None,
        )
    }

    /// 404 for a request path no responder handles.
    pub fn endpoint_not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("Endpoint \"{}\" not found.", path),
            None,
        )
    }

    /// 405 for a known path used with an unsupported method.
    pub fn method_not_allowed(method: &http::Method, path: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("Method {} is not allowed on \"{}\".", method, path),
            None,
        )
    }

    /// 409 for a uniqueness conflict.
    pub fn uniqueness(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, detail, Some(ScimErrorType::Uniqueness))
    }

    /// 500 with the generic, non-leaking detail.
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, Self::INTERNAL_DETAIL, None)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn scim_type(&self) -> Option<ScimErrorType> {
        self.scim_type
    }
}

impl Serialize for ScimError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.scim_type.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("ScimError", len)?;
        state.serialize_field("schemas", &[ERROR_SCHEMA_URI])?;
        if let Some(scim_type) = &self.scim_type {
            state.serialize_field("scimType", scim_type)?;
        }
        state.serialize_field("detail", &self.detail)?;
        state.serialize_field("status", &self.status.as_u16())?;
        state.end()
    }
}

/// Outcome of validating a request body against a resource type's schemas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Body is not parseable JSON or not a JSON object
    #[error("{0}")]
    InvalidSyntax(String),

    /// Body parses but violates the schema
    #[error("{0}")]
    InvalidValue(String),
}

impl ValidationError {
    pub fn invalid_syntax(message: impl Into<String>) -> Self {
        Self::InvalidSyntax(message.into())
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }
}

/// Failure reported by a provider's create capability.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// One or more attribute values are already in use
    #[error("{0}")]
    Uniqueness(String),

    /// Any other backend failure; never shown to clients
    #[error("backend failure: {0}")]
    Internal(#[source] BoxError),
}

impl CreateError {
    pub fn internal(error: impl Into<BoxError>) -> Self {
        Self::Internal(error.into())
    }
}

/// Failure reported by a provider's read capabilities (get and list).
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// No resource with the requested identifier exists
    #[error("resource not found")]
    NotFound,

    /// The list filter could not be parsed or evaluated
    #[error("{0}")]
    InvalidFilter(String),

    /// Any other backend failure; never shown to clients
    #[error("backend failure: {0}")]
    Internal(#[source] BoxError),
}

impl ReadError {
    pub fn internal(error: impl Into<BoxError>) -> Self {
        Self::Internal(error.into())
    }
}

/// Failure reported by a provider's replace capability.
#[derive(Debug, thiserror::Error)]
pub enum ReplaceError {
    /// No resource with the requested identifier exists
    #[error("resource not found")]
    NotFound,

    /// The new attribute values collide with another resource
    #[error("{0}")]
    Uniqueness(String),

    /// Any other backend failure; never shown to clients
    #[error("backend failure: {0}")]
    Internal(#[source] BoxError),
}

impl ReplaceError {
    pub fn internal(error: impl Into<BoxError>) -> Self {
        Self::Internal(error.into())
    }
}

/// Failure reported by a provider's delete capability.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// No resource with the requested identifier exists
    #[error("resource not found")]
    NotFound,

    /// Any other backend failure; never shown to clients
    #[error("backend failure: {0}")]
    Internal(#[source] BoxError),
}

impl DeleteError {
    pub fn internal(error: impl Into<BoxError>) -> Self {
        Self::Internal(error.into())
    }
}

/// Errors that can occur during server building/configuration.
///
/// These are programming errors and should surface at startup rather than
/// while serving requests.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Two resource types share a name
    #[error("Resource type '{name}' is registered more than once")]
    DuplicateResourceType { name: String },

    /// Two resource types share an endpoint
    #[error("Endpoint '{endpoint}' is registered more than once")]
    DuplicateEndpoint { endpoint: String },

    /// A resource type claims an endpoint served by discovery
    #[error("Endpoint '{endpoint}' is reserved for discovery")]
    ReservedEndpoint { endpoint: String },

    /// A resource type references a schema missing from the registry
    #[error("Resource type '{resource_type}' references unknown schema '{schema_id}'")]
    UnknownSchema {
        resource_type: String,
        schema_id: String,
    },

    /// An embedded or supplied schema document could not be parsed
    #[error("Failed to load schema: {source}")]
    SchemaLoad {
        #[from]
        source: serde_json::Error,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl BuildError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type ScimResult<T> = Result<T, ScimError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type BuildResult<T> = Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_shape() {
        let error = ScimError::uniqueness("userName is already in use");
        let body = serde_json::to_value(&error).unwrap();

        assert_eq!(
            body,
            json!({
                "schemas": [ERROR_SCHEMA_URI],
                "scimType": "uniqueness",
                "detail": "userName is already in use",
                "status": 409
            })
        );
    }

    #[test]
    fn test_error_without_scim_type_omits_field() {
        let body = serde_json::to_value(ScimError::resource_not_found("abc")).unwrap();

        assert!(body.get("scimType").is_none());
        assert_eq!(body["status"], 404);
        assert!(body["detail"].as_str().unwrap().contains("abc"));
    }

    #[test]
    fn test_internal_error_is_generic() {
        let error = ScimError::internal();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.detail(), ScimError::INTERNAL_DETAIL);
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let error = CreateError::internal("connection reset");
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_build_error_messages() {
        let error = BuildError::UnknownSchema {
            resource_type: "User".to_string(),
            schema_id: "urn:example:missing".to_string(),
        };
        assert!(error.to_string().contains("urn:example:missing"));
    }
}
