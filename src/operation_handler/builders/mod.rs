//! Builder utilities for operation handler types.

pub mod request;

// Builder implementations are available through impl blocks on core types
