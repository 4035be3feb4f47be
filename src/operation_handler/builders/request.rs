//! Request builder utilities for ScimRequest
//!
//! Convenience constructors for transports and tests that assemble a
//! [`ScimRequest`] by hand.

use crate::operation_handler::core::ScimRequest;

use http::Method;
use serde::Serialize;
use std::collections::HashMap;

impl ScimRequest {
    /// Create a request with an empty body and no query parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            body: Vec::new(),
            request_id: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST with a raw body.
    pub fn post(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// PUT with a raw body.
    pub fn put(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Encode `value` as the body.
    pub fn with_json_body<T: Serialize>(mut self, value: &T) -> serde_json::Result<Self> {
        self.body = serde_json::to_vec(value)?;
        Ok(self)
    }

    /// Add one query parameter.
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}
