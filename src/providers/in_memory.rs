//! Thread-safe in-memory resource provider.
//!
//! Keeps resources in a `HashMap` behind a tokio `RwLock`. Intended for
//! tests, development, and as a reference for custom providers.
//!
//! # Features
//!
//! * UUID v4 identifiers and server-maintained `created` / `lastModified`
//! * Content-hash versions; a replace with unchanged content is a no-op
//! * Optional case-insensitive unique attributes (e.g. `userName`)
//! * `eq`, `co`, `sw` and `pr` filters on top-level attributes
//! * Sorting by any top-level attribute, 1-based pagination
//!
//! # Example Usage
//!
//! ```rust
//! use scim_dispatch::providers::InMemoryProvider;
//! use scim_dispatch::resource::{RequestContext, ResourceProvider};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = InMemoryProvider::new().with_unique_attribute("userName");
//! let context = RequestContext::with_generated_id();
//!
//! let attributes = json!({"userName": "bjensen"}).as_object().cloned().unwrap();
//! let user = provider.create(attributes.clone(), &context).await?;
//! assert!(user.meta.version.is_some());
//!
//! // Same userName again: rejected
//! assert!(provider.create(attributes, &context).await.is_err());
//! # Ok(())
//! # }
//! ```

use super::filter::{AttributeFilter, eq_ignore_case, fold_case};
use crate::error::{CreateError, DeleteError, ReadError, ReplaceError};
use crate::resource::{
    ListRequestParams, Meta, Page, RequestContext, Resource, ResourceAttributes,
    ResourceProvider, ResourceVersion, SortOrder,
};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, trace};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors raised inside the in-memory provider.
#[derive(Debug, Error)]
pub enum InMemoryError {
    #[error("Attribute '{attribute}' value '{value}' is already in use")]
    DuplicateAttribute { attribute: String, value: String },

    #[error("Unsupported filter expression: '{filter}'")]
    UnsupportedFilter { filter: String },

    #[error("Failed to compute resource version: {source}")]
    Version {
        #[from]
        source: serde_json::Error,
    },
}

/// In-memory implementation of [`ResourceProvider`].
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    resources: Arc<RwLock<HashMap<String, Resource>>>,
    unique_attributes: Vec<String>,
}

impl InMemoryProvider {
    /// Create an empty provider without uniqueness constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject creates and replaces that reuse another resource's value
    /// for `attribute`. Values compare case-insensitively.
    pub fn with_unique_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.unique_attributes.push(attribute.into());
        self
    }

    /// Number of stored resources.
    pub async fn len(&self) -> usize {
        self.resources.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.resources.read().await.is_empty()
    }

    /// Remove every stored resource.
    pub async fn clear(&self) {
        self.resources.write().await.clear();
    }

    fn check_uniqueness(
        &self,
        resources: &HashMap<String, Resource>,
        attributes: &ResourceAttributes,
        exclude_id: Option<&str>,
    ) -> Result<(), InMemoryError> {
        for unique in &self.unique_attributes {
            let Some(candidate) = lookup(attributes, unique).and_then(Value::as_str) else {
                continue;
            };
            let taken = resources
                .values()
                .filter(|existing| Some(existing.id.as_str()) != exclude_id)
                .filter_map(|existing| existing.get_attribute(unique).and_then(Value::as_str))
                .any(|value| eq_ignore_case(value, candidate));
            if taken {
                return Err(InMemoryError::DuplicateAttribute {
                    attribute: unique.clone(),
                    value: candidate.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceProvider for InMemoryProvider {
    async fn create(
        &self,
        attributes: ResourceAttributes,
        context: &RequestContext,
    ) -> Result<Resource, CreateError> {
        let version = ResourceVersion::from_attributes(&attributes)
            .map_err(|e| CreateError::internal(InMemoryError::from(e)))?;

        let mut resources = self.resources.write().await;
        self.check_uniqueness(&resources, &attributes, None)
            .map_err(|e| CreateError::Uniqueness(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let resource = Resource::new(
            id.clone(),
            attributes,
            Meta::created_now().with_version(version),
        );
        resources.insert(id.clone(), resource.clone());

        debug!(
            "In-memory provider created resource '{}' (request: '{}')",
            id, context.request_id
        );
        Ok(resource)
    }

    async fn get(&self, id: &str, context: &RequestContext) -> Result<Resource, ReadError> {
        trace!(
            "In-memory provider get '{}' (request: '{}')",
            id, context.request_id
        );
        self.resources
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(ReadError::NotFound)
    }

    async fn list(
        &self,
        params: &ListRequestParams,
        context: &RequestContext,
    ) -> Result<Page, ReadError> {
        let filter = params
            .filter
            .as_deref()
            .map(AttributeFilter::parse)
            .transpose()
            .map_err(|e| ReadError::InvalidFilter(e.to_string()))?;

        let resources = self.resources.read().await;
        let mut matches: Vec<&Resource> = resources
            .values()
            .filter(|resource| match &filter {
                Some(filter) => filter.matches(attribute_of(resource, &filter.attribute).as_ref()),
                None => true,
            })
            .collect();

        match params.sort_by.as_deref() {
            Some(sort_by) => matches.sort_by(|a, b| {
                compare_values(
                    attribute_of(a, sort_by).as_ref(),
                    attribute_of(b, sort_by).as_ref(),
                )
                .then_with(|| a.id.cmp(&b.id))
            }),
            None => matches.sort_by(|a, b| {
                a.meta
                    .created
                    .cmp(&b.meta.created)
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
        if params.sort_order == Some(SortOrder::Descending) {
            matches.reverse();
        }

        let total_results = matches.len();
        let page: Vec<Resource> = matches
            .into_iter()
            .skip(params.start_index.saturating_sub(1))
            .take(params.count)
            .cloned()
            .collect();

        debug!(
            "In-memory provider listed {} of {} resources (request: '{}')",
            page.len(),
            total_results,
            context.request_id
        );
        Ok(Page::new(page, total_results))
    }

    async fn replace(
        &self,
        id: &str,
        attributes: ResourceAttributes,
        context: &RequestContext,
    ) -> Result<Resource, ReplaceError> {
        let version = ResourceVersion::from_attributes(&attributes)
            .map_err(|e| ReplaceError::internal(InMemoryError::from(e)))?;

        let mut resources = self.resources.write().await;
        if !resources.contains_key(id) {
            return Err(ReplaceError::NotFound);
        }
        self.check_uniqueness(&resources, &attributes, Some(id))
            .map_err(|e| ReplaceError::Uniqueness(e.to_string()))?;

        let existing = resources.get_mut(id).ok_or(ReplaceError::NotFound)?;
        if existing.attributes == attributes {
            debug!(
                "In-memory provider replace of '{}' left content unchanged (request: '{}')",
                id, context.request_id
            );
            return Ok(existing.clone());
        }

        existing.attributes = attributes;
        existing.meta.last_modified = Utc::now();
        existing.meta.version = Some(version);

        debug!(
            "In-memory provider replaced resource '{}' (request: '{}')",
            id, context.request_id
        );
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str, context: &RequestContext) -> Result<(), DeleteError> {
        match self.resources.write().await.remove(id) {
            Some(_) => {
                debug!(
                    "In-memory provider deleted resource '{}' (request: '{}')",
                    id, context.request_id
                );
                Ok(())
            }
            None => Err(DeleteError::NotFound),
        }
    }
}

fn lookup<'a>(attributes: &'a ResourceAttributes, name: &str) -> Option<&'a Value> {
    attributes
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// Top-level attribute of a resource, with `id` resolving to the identifier.
fn attribute_of(resource: &Resource, name: &str) -> Option<Value> {
    if name.eq_ignore_ascii_case("id") {
        return Some(Value::String(resource.id.clone()));
    }
    resource.get_attribute(name).cloned()
}

/// Sort order for attribute values; absent values sort last.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::String(a)), Some(Value::String(b))) => {
            fold_case(a).cmp(&fold_case(b))
        }
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}
