//! SCIM resource model and the backend capability set.
//!
//! # Key Components
//!
//! * [`Resource`] - Provider-owned resource with server metadata
//! * [`ResourceType`] - Registered resource kind bound to its provider
//! * [`ResourceProvider`] - Async backend capability set
//! * [`ListRequestParams`] / [`Page`] - List request and result page
//! * [`RequestContext`] - Per-request correlation data
//! * [`ResourceVersion`] - Content-based resource versions

pub mod context;
pub mod provider;
pub mod resource;
pub mod resource_type;
pub mod version;

/// Attribute set of a resource: a JSON object without `id`, `schemas` or `meta`.
pub type ResourceAttributes = serde_json::Map<String, serde_json::Value>;

pub use context::RequestContext;
pub use provider::{ListRequestParams, Page, ResourceProvider, SortOrder};
pub use resource::{Meta, Resource};
pub use resource_type::{ResourceType, SchemaExtension};
pub use version::ResourceVersion;
