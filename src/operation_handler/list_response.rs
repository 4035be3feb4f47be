//! Paginated collection envelope (RFC 7644 §3.4.2).

use serde::Serialize;

/// Schema URI of list responses.
pub const LIST_RESPONSE_SCHEMA_URI: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// A page of resources as sent to the client.
///
/// `items_per_page` is always the number of resources actually present,
/// and `start_index` echoes the request rather than being recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    schemas: [&'static str; 1],
    total_results: usize,
    start_index: usize,
    items_per_page: usize,
    #[serde(rename = "Resources")]
    resources: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(resources: Vec<T>, total_results: usize, start_index: usize) -> Self {
        Self {
            schemas: [LIST_RESPONSE_SCHEMA_URI],
            total_results,
            start_index,
            items_per_page: resources.len(),
            resources,
        }
    }

    /// Envelope for an unpaginated catalog, e.g. `/Schemas`.
    pub fn complete(resources: Vec<T>) -> Self {
        let total = resources.len();
        Self::new(resources, total, 1)
    }

    pub fn total_results(&self) -> usize {
        self.total_results
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn resources(&self) -> &[T] {
        &self.resources
    }
}
