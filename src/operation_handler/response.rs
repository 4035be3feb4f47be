//! Transport-neutral SCIM responses.

use crate::error::ScimError;

use http::{HeaderValue, StatusCode, header};
use log::{error, warn};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Media type of every non-empty SCIM body.
pub const SCIM_CONTENT_TYPE: &str = "application/scim+json";

/// Pre-encoded 500 body, sent when even the error body fails to encode.
///
/// `concat!` takes literals only; the URI must stay equal to
/// [`ERROR_SCHEMA_URI`](crate::error::ERROR_SCHEMA_URI).
const FALLBACK_INTERNAL_ERROR_BODY: &str = concat!(
    r#"{"schemas":[""#,
    "urn:ietf:params:scim:api:messages:2.0:Error",
    r#""],"detail":"Internal server error.","status":500}"#
);

/// Status code and encoded body of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScimResponse {
    status: StatusCode,
    body: Vec<u8>,
    location: Option<String>,
}

impl ScimResponse {
    /// Response with no body, e.g. 204 after a delete.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
            location: None,
        }
    }

    /// Encode `value` as the body.
    ///
    /// A value that fails to encode turns into the generic 500 error.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                body,
                location: None,
            },
            Err(e) => {
                error!("Failed to encode {} response body: {}", status.as_u16(), e);
                Self::error(&ScimError::internal())
            }
        }
    }

    /// Encode a SCIM error; the status line follows the error's status.
    pub fn error(scim_error: &ScimError) -> Self {
        match serde_json::to_vec(scim_error) {
            Ok(body) => Self {
                status: scim_error.status(),
                body,
                location: None,
            },
            Err(e) => {
                error!("Failed to encode error body: {}", e);
                Self::fallback_internal_error()
            }
        }
    }

    fn fallback_internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: FALLBACK_INTERNAL_ERROR_BODY.as_bytes().to_vec(),
            location: None,
        }
    }

    /// Attach the URL of the resource the response describes.
    ///
    /// Ignored on error responses.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        if self.status.is_success() {
            self.location = Some(location.into());
        }
        self
    }

    /// Value of the `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Content type header value, absent for an empty body.
    pub fn content_type(&self) -> Option<&'static str> {
        (!self.body.is_empty()).then_some(SCIM_CONTENT_TYPE)
    }

    /// Decode the body, `None` if empty or not JSON.
    pub fn to_json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Convert into an `http::Response` for any framework built on `http`.
    pub fn into_http(self) -> http::Response<Vec<u8>> {
        let content_type = self.content_type();
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        if let Some(content_type) = content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if let Some(location) = self.location {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(e) => warn!("Dropping Location header '{}': {}", location, e),
            }
        }
        response
    }

    /// Write the body to a transport.
    ///
    /// A failed write is logged and reported back; no second response is
    /// attempted.
    pub async fn write_body<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let result = async {
            writer.write_all(&self.body).await?;
            writer.flush().await
        }
        .await;

        if let Err(e) = &result {
            warn!(
                "Failed to write {} response body ({} bytes): {}",
                self.status.as_u16(),
                self.body.len(),
                e
            );
        }
        result
    }
}

impl From<ScimError> for ScimResponse {
    fn from(scim_error: ScimError) -> Self {
        Self::error(&scim_error)
    }
}
