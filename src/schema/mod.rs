//! Schema definitions, registry and validation for SCIM resources.
//!
//! # Key Types
//!
//! - [`Schema`] - SCIM schema definition with attributes and metadata
//! - [`SchemaRegistry`] - Immutable catalog of the schemas a server exposes
//! - [`AttributeValidator`] - Validation capability used by create and replace
//! - [`SchemaValidator`] - Default schema-driven validator
//!
//! # Examples
//!
//! ```rust
//! use scim_dispatch::schema::SchemaRegistry;
//! use scim_dispatch::schema::embedded::USER_SCHEMA_URI;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_embedded_schemas()?;
//! let user_schema = registry.get_schema(USER_SCHEMA_URI).expect("embedded");
//! assert_eq!(user_schema.name, "User");
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;
pub mod validation;

pub use registry::SchemaRegistry;
pub use types::{AttributeDefinition, AttributeType, Mutability, Returned, Schema, Uniqueness};
pub use validation::{AttributeValidator, ExtensionSchema, ResourceSchemas, SchemaValidator};
