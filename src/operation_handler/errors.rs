//! Translation of backend outcomes into SCIM protocol errors.
//!
//! Every mapping is an exhaustive `match`. Internal causes are logged with
//! the request id and replaced by the generic 500 detail.

use crate::error::{
    BoxError, CreateError, DeleteError, ReadError, ReplaceError, ScimError, ValidationError,
};
use crate::resource::RequestContext;

use log::{error, warn};

/// Map a validation failure to a 400.
pub fn translate_validation_error(err: &ValidationError, context: &RequestContext) -> ScimError {
    warn!(
        "Rejected request body: {} (request: '{}')",
        err, context.request_id
    );
    match err {
        ValidationError::InvalidSyntax(message) => ScimError::invalid_syntax(message.as_str()),
        ValidationError::InvalidValue(message) => ScimError::invalid_value(message.as_str()),
    }
}

pub fn translate_create_error(err: &CreateError, context: &RequestContext) -> ScimError {
    match err {
        CreateError::Uniqueness(message) => {
            warn!(
                "Create conflict: {} (request: '{}')",
                message, context.request_id
            );
            ScimError::uniqueness(message.as_str())
        }
        CreateError::Internal(cause) => internal("create", cause, context),
    }
}

/// Map a get or list failure. `id` is `None` for list requests.
pub fn translate_read_error(
    err: &ReadError,
    id: Option<&str>,
    context: &RequestContext,
) -> ScimError {
    match (err, id) {
        (ReadError::NotFound, Some(id)) => ScimError::resource_not_found(id),
        (ReadError::NotFound, None) => ScimError::new(
            http::StatusCode::NOT_FOUND,
            "Resource not found.",
            None,
        ),
        (ReadError::InvalidFilter(message), _) => {
            warn!(
                "Rejected filter: {} (request: '{}')",
                message, context.request_id
            );
            ScimError::invalid_filter(message.as_str())
        }
        (ReadError::Internal(cause), _) => internal("read", cause, context),
    }
}

pub fn translate_replace_error(
    err: &ReplaceError,
    id: &str,
    context: &RequestContext,
) -> ScimError {
    match err {
        ReplaceError::NotFound => ScimError::resource_not_found(id),
        ReplaceError::Uniqueness(message) => {
            warn!(
                "Replace conflict on '{}': {} (request: '{}')",
                id, message, context.request_id
            );
            ScimError::uniqueness(message.as_str())
        }
        ReplaceError::Internal(cause) => internal("replace", cause, context),
    }
}

pub fn translate_delete_error(err: &DeleteError, id: &str, context: &RequestContext) -> ScimError {
    match err {
        DeleteError::NotFound => ScimError::resource_not_found(id),
        DeleteError::Internal(cause) => internal("delete", cause, context),
    }
}

fn internal(operation: &str, cause: &BoxError, context: &RequestContext) -> ScimError {
    error!(
        "Provider {} failed: {} (request: '{}')",
        operation, cause, context.request_id
    );
    ScimError::internal()
}
