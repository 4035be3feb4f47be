//! SCIM 2.0 request-lifecycle dispatcher for Rust.
//!
//! Sits between an HTTP transport and pluggable resource backends: routes
//! protocol requests, delegates validation and storage, and turns the
//! outcome into protocol-compliant responses with SCIM error bodies and
//! paginated list envelopes.
//!
//! # Core Components
//!
//! - [`ScimServerBuilder`] / [`ScimServer`] - Immutable registry of schemas and resource types
//! - [`ScimOperationHandler`] - Request dispatcher
//! - [`ResourceProvider`] - Trait for implementing storage backends
//! - [`AttributeValidator`] - Trait for request body validation
//!
//! # Quick Start
//!
//! ```rust
//! use scim_dispatch::{ScimOperationHandler, ScimRequest, ScimServerBuilder};
//! use scim_dispatch::providers::InMemoryProvider;
//! use scim_dispatch::resource::ResourceType;
//! use scim_dispatch::schema::embedded::USER_SCHEMA_URI;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let server = ScimServerBuilder::new()
//!     .with_base_url("https://scim.example.com")
//!     .with_resource_type(ResourceType::new(
//!         "User",
//!         "/Users",
//!         USER_SCHEMA_URI,
//!         InMemoryProvider::new().with_unique_attribute("userName"),
//!     ))
//!     .build()?;
//! let handler = ScimOperationHandler::new(server);
//!
//! let response = handler.handle(ScimRequest::get("/v2/Users/unknown")).await;
//! assert_eq!(response.status().as_u16(), 404);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod operation_handler;
pub mod providers;
pub mod resource;
pub mod schema;
pub mod schema_discovery;
pub mod scim_server;

// Re-export commonly used types for convenience
pub use error::{
    BuildError, CreateError, DeleteError, ReadError, ReplaceError, ScimError, ScimErrorType,
    ScimResult, ValidationError,
};
pub use operation_handler::{ListResponse, ScimOperationHandler, ScimRequest, ScimResponse};
pub use resource::{
    ListRequestParams, Page, RequestContext, Resource, ResourceAttributes, ResourceProvider,
    ResourceType, SortOrder,
};
pub use schema::{AttributeValidator, Schema, SchemaRegistry, SchemaValidator};
pub use schema_discovery::{AuthenticationScheme, ServiceProviderConfig};
pub use scim_server::{ScimServer, ScimServerBuilder, ScimServerConfig};
