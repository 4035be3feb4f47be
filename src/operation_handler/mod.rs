//! Framework-agnostic SCIM request dispatcher.
//!
//! Turns protocol-shaped requests into provider calls and provider outcomes
//! into protocol responses: status codes, SCIM error bodies and paginated
//! list envelopes.
//!
//! # Key Types
//!
//! - [`ScimOperationHandler`] - Dispatcher with one entry point per operation
//! - [`ScimRequest`] - Raw request handed over by a transport
//! - [`ScimResponse`] - Status, content type and encoded body
//! - [`ListResponse`] - Paginated collection envelope
//!
//! # Examples
//!
//! ```rust
//! use scim_dispatch::operation_handler::{ScimOperationHandler, ScimRequest};
//! use scim_dispatch::providers::InMemoryProvider;
//! use scim_dispatch::resource::ResourceType;
//! use scim_dispatch::schema::embedded::USER_SCHEMA_URI;
//! use scim_dispatch::ScimServerBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let server = ScimServerBuilder::new()
//!     .with_resource_type(ResourceType::new(
//!         "User",
//!         "/Users",
//!         USER_SCHEMA_URI,
//!         InMemoryProvider::new(),
//!     ))
//!     .build()?;
//! let handler = ScimOperationHandler::new(server);
//!
//! let response = handler
//!     .handle(ScimRequest::post("/v2/Users", r#"{"userName": "bjensen"}"#))
//!     .await;
//! assert_eq!(response.status(), http::StatusCode::CREATED);
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
pub mod errors;
mod handlers;
pub mod list_response;
pub mod response;
mod routing;

pub use core::{ScimOperationHandler, ScimRequest};
pub use list_response::{LIST_RESPONSE_SCHEMA_URI, ListResponse};
pub use response::{SCIM_CONTENT_TYPE, ScimResponse};
