//! Provider-owned resource and its wire representation.

use super::ResourceAttributes;
use super::resource_type::ResourceType;
use super::version::ResourceVersion;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Server-maintained resource metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub version: Option<ResourceVersion>,
}

impl Meta {
    /// Metadata for a resource created now.
    pub fn created_now() -> Self {
        let now = Utc::now();
        Self {
            created: now,
            last_modified: now,
            version: None,
        }
    }

    pub fn with_version(mut self, version: ResourceVersion) -> Self {
        self.version = Some(version);
        self
    }
}

/// A managed resource as returned by a provider.
///
/// The dispatcher never mutates a resource; it only renders it with
/// [`Resource::to_representation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Server-assigned identifier
    pub id: String,
    /// Provider-defined attributes, without `id`, `schemas` or `meta`
    pub attributes: ResourceAttributes,
    pub meta: Meta,
}

impl Resource {
    pub fn new(id: impl Into<String>, attributes: ResourceAttributes, meta: Meta) -> Self {
        Self {
            id: id.into(),
            attributes,
            meta,
        }
    }

    /// Look up a top-level attribute, ignoring case.
    pub fn get_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Render the resource for the wire.
    ///
    /// Adds `schemas`, `id` and `meta` on top of the attributes; these
    /// server-assigned fields win over attribute keys of the same name.
    pub fn to_representation(&self, resource_type: &ResourceType, location: &str) -> Value {
        let mut object = self.attributes.clone();
        object.retain(|key, _| {
            !["schemas", "id", "meta"]
                .iter()
                .any(|reserved| key.eq_ignore_ascii_case(reserved))
        });

        let schemas = resource_type
            .schema_uris()
            .into_iter()
            .map(|uri| Value::String(uri.to_string()))
            .collect();
        object.insert("schemas".to_string(), Value::Array(schemas));
        object.insert("id".to_string(), Value::String(self.id.clone()));

        let mut meta = Map::new();
        meta.insert(
            "resourceType".to_string(),
            Value::String(resource_type.name().to_string()),
        );
        meta.insert("created".to_string(), timestamp(&self.meta.created));
        meta.insert("lastModified".to_string(), timestamp(&self.meta.last_modified));
        meta.insert("location".to_string(), Value::String(location.to_string()));
        if let Some(version) = &self.meta.version {
            meta.insert("version".to_string(), Value::String(version.to_etag()));
        }
        object.insert("meta".to_string(), Value::Object(meta));

        Value::Object(object)
    }
}

fn timestamp(value: &DateTime<Utc>) -> Value {
    Value::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
