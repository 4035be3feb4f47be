//! Content-based resource versions.
//!
//! A version is an opaque string derived from the resource content. Two
//! resources with identical attributes always carry the same version, which
//! lets providers detect no-op replacements and lets clients use
//! `meta.version` as a weak ETag.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use super::ResourceAttributes;

/// Opaque resource version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceVersion {
    opaque: String,
}

impl ResourceVersion {
    /// Derive a version from raw content bytes.
    ///
    /// Uses the first 8 bytes of the SHA-256 digest, base64 encoded.
    pub fn from_content(content: &[u8]) -> Self {
        let hash = Sha256::digest(content);
        Self {
            opaque: BASE64.encode(&hash[..8]),
        }
    }

    /// Derive a version from an attribute set.
    pub fn from_attributes(attributes: &ResourceAttributes) -> Result<Self, serde_json::Error> {
        let content = serde_json::to_vec(attributes)?;
        Ok(Self::from_content(&content))
    }

    /// Wrap a provider-specific version string (sequence number, timestamp, ...).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self {
            opaque: hash.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.opaque
    }

    /// Weak ETag form used in `meta.version`.
    pub fn to_etag(&self) -> String {
        format!("W/\"{}\"", self.opaque)
    }
}

impl fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_etag())
    }
}

impl Serialize for ResourceVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_etag())
    }
}
