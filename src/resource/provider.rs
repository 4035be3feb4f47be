//! Resource provider trait for implementing SCIM data access.
//!
//! A provider is the backend behind one resource type. The dispatcher issues
//! exactly one provider call per request and translates the outcome into a
//! protocol response. Providers decide how resources are stored; they report
//! failures through the closed outcome enumerations in [`crate::error`].

use super::ResourceAttributes;
use super::context::RequestContext;
use super::resource::Resource;
use crate::error::{
    CreateError, DeleteError, ReadError, ReplaceError, ValidationError, ValidationResult,
};

use async_trait::async_trait;
use std::collections::HashMap;
use std::str::FromStr;

/// Backend capability set for one resource type.
///
/// The trait is object safe so that each [`ResourceType`](super::ResourceType)
/// can hold its provider as `Arc<dyn ResourceProvider>`.
///
/// # Example
///
/// ```rust
/// use scim_dispatch::resource::{ListRequestParams, RequestContext, ResourceProvider};
/// use scim_dispatch::providers::InMemoryProvider;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = InMemoryProvider::new();
/// let context = RequestContext::with_generated_id();
///
/// let attributes = json!({"userName": "bjensen"}).as_object().cloned().unwrap();
/// let created = provider.create(attributes, &context).await?;
///
/// let page = provider.list(&ListRequestParams::default(), &context).await?;
/// assert_eq!(page.total_results, 1);
/// assert_eq!(page.resources[0].id, created.id);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Store a new resource built from validated attributes.
    async fn create(
        &self,
        attributes: ResourceAttributes,
        context: &RequestContext,
    ) -> Result<Resource, CreateError>;

    /// Fetch one resource by identifier.
    async fn get(&self, id: &str, context: &RequestContext) -> Result<Resource, ReadError>;

    /// Return one page of matching resources and the total match count.
    ///
    /// Resources come back in the order the client should see them.
    async fn list(
        &self,
        params: &ListRequestParams,
        context: &RequestContext,
    ) -> Result<Page, ReadError>;

    /// Replace every client-settable attribute of an existing resource.
    async fn replace(
        &self,
        id: &str,
        attributes: ResourceAttributes,
        context: &RequestContext,
    ) -> Result<Resource, ReplaceError>;

    async fn delete(&self, id: &str, context: &RequestContext) -> Result<(), DeleteError>;
}

/// One page of list results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Resources of this page, in backend order
    pub resources: Vec<Resource>,
    /// Number of matches irrespective of pagination
    pub total_results: usize,
}

impl Page {
    pub fn new(resources: Vec<Resource>, total_results: usize) -> Self {
        Self {
            resources,
            total_results,
        }
    }
}

/// Sort direction for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("ascending") {
            Ok(SortOrder::Ascending)
        } else if value.eq_ignore_ascii_case("descending") {
            Ok(SortOrder::Descending)
        } else {
            Err(ValidationError::invalid_value(format!(
                "sortOrder must be \"ascending\" or \"descending\", got \"{}\"",
                value
            )))
        }
    }
}

/// Pagination, filtering and sorting parameters of a list request.
///
/// `start_index` is 1-based. A `count` of 0 asks only for the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequestParams {
    pub start_index: usize,
    pub count: usize,
    pub filter: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for ListRequestParams {
    fn default() -> Self {
        Self {
            start_index: 1,
            count: Self::DEFAULT_COUNT,
            filter: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl ListRequestParams {
    /// Page size used when neither the client nor the server says otherwise.
    pub const DEFAULT_COUNT: usize = 100;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start index; values below 1 become 1.
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index.max(1);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_order: Option<SortOrder>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = sort_order;
        self
    }

    /// Build parameters from raw query parameters.
    ///
    /// Names match case-insensitively. `startIndex` below 1 is read as 1,
    /// a negative `count` as 0, and `count` above `max_count` is clamped.
    /// Non-numeric values and unknown sort orders are rejected.
    pub fn from_query(
        query: &HashMap<String, String>,
        default_count: usize,
        max_count: usize,
    ) -> ValidationResult<Self> {
        let lookup = |name: &str| {
            query
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.trim())
        };

        let start_index = match lookup("startIndex") {
            Some(raw) => parse_integer("startIndex", raw)?.max(1) as usize,
            None => 1,
        };

        let count = match lookup("count") {
            Some(raw) => parse_integer("count", raw)?.max(0) as usize,
            None => default_count,
        }
        .min(max_count);

        let sort_order = lookup("sortOrder")
            .filter(|raw| !raw.is_empty())
            .map(SortOrder::from_str)
            .transpose()?;

        let non_empty = |value: Option<&str>| {
            value
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string())
        };

        Ok(Self {
            start_index,
            count,
            filter: non_empty(lookup("filter")),
            sort_by: non_empty(lookup("sortBy")),
            sort_order,
        })
    }
}

fn parse_integer(name: &str, raw: &str) -> ValidationResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        ValidationError::invalid_value(format!("{} must be an integer, got \"{}\"", name, raw))
    })
}
