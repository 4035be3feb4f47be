//! Reference resource provider implementations.
//!
//! * [`InMemoryProvider`] - Thread-safe in-memory provider for testing and development
//!
//! Custom backends implement [`ResourceProvider`](crate::resource::ResourceProvider)
//! directly.

pub mod filter;
pub mod in_memory;

pub use filter::{AttributeFilter, FilterOperator};
pub use in_memory::{InMemoryError, InMemoryProvider};
