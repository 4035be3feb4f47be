//! SCIM server registry and its builder.
//!
//! # Module Organization
//!
//! * [`core`] - The immutable [`ScimServer`] registry
//! * [`builder`] - [`ScimServerBuilder`] and [`ScimServerConfig`]

pub mod builder;
pub mod core;

pub use builder::{ScimServerBuilder, ScimServerConfig};
pub use core::ScimServer;
