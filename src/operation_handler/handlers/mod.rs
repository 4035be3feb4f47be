//! Per-operation handlers.
//!
//! - [`crud`] - Create, get, replace and delete
//! - [`query`] - List with pagination
//! - [`discovery`] - Schemas, resource types and service provider configuration

pub mod crud;
pub mod discovery;
pub mod query;
