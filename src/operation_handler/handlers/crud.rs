//! Create, get, replace and delete handlers.

use crate::error::{ScimError, ScimResult};
use crate::operation_handler::core::ScimOperationHandler;
use crate::operation_handler::errors::{
    translate_create_error, translate_delete_error, translate_read_error,
    translate_replace_error, translate_validation_error,
};
use crate::operation_handler::response::ScimResponse;
use crate::resource::{RequestContext, Resource, ResourceAttributes, ResourceType};

use http::StatusCode;
use log::{debug, error};

/// Validate the body, store it, answer 201.
pub async fn handle_create(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    body: &[u8],
    context: &RequestContext,
) -> ScimResult<ScimResponse> {
    let attributes = validate_body(handler, resource_type, body, context)?;

    let resource = resource_type
        .provider()
        .create(attributes, context)
        .await
        .map_err(|e| translate_create_error(&e, context))?;

    debug!(
        "Created {} '{}' (request: '{}')",
        resource_type.name(),
        resource.id,
        context.request_id
    );
    let location = resource_location(handler, resource_type, &resource.id);
    let representation = resource.to_representation(resource_type, &location);
    Ok(ScimResponse::json(StatusCode::CREATED, &representation).with_location(location))
}

pub async fn handle_get(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    id: &str,
    context: &RequestContext,
) -> ScimResult<ScimResponse> {
    let resource = resource_type
        .provider()
        .get(id, context)
        .await
        .map_err(|e| translate_read_error(&e, Some(id), context))?;

    Ok(resource_response(
        handler,
        resource_type,
        &resource,
        StatusCode::OK,
    ))
}

/// Validate the body and replace the stored resource, answer 200.
pub async fn handle_replace(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    id: &str,
    body: &[u8],
    context: &RequestContext,
) -> ScimResult<ScimResponse> {
    let attributes = validate_body(handler, resource_type, body, context)?;

    let resource = resource_type
        .provider()
        .replace(id, attributes, context)
        .await
        .map_err(|e| translate_replace_error(&e, id, context))?;

    debug!(
        "Replaced {} '{}' (request: '{}')",
        resource_type.name(),
        id,
        context.request_id
    );
    Ok(resource_response(
        handler,
        resource_type,
        &resource,
        StatusCode::OK,
    ))
}

/// Delete the resource, answer 204 with no body.
pub async fn handle_delete(
    resource_type: &ResourceType,
    id: &str,
    context: &RequestContext,
) -> ScimResult<ScimResponse> {
    resource_type
        .provider()
        .delete(id, context)
        .await
        .map_err(|e| translate_delete_error(&e, id, context))?;

    debug!(
        "Deleted {} '{}' (request: '{}')",
        resource_type.name(),
        id,
        context.request_id
    );
    Ok(ScimResponse::empty(StatusCode::NO_CONTENT))
}

fn validate_body(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    body: &[u8],
    context: &RequestContext,
) -> ScimResult<ResourceAttributes> {
    let server = handler.server();
    let schemas = server.resource_schemas(resource_type).ok_or_else(|| {
        error!(
            "Schemas of resource type '{}' are not registered (request: '{}')",
            resource_type.name(),
            context.request_id
        );
        ScimError::internal()
    })?;

    server
        .validator()
        .validate(body, &schemas)
        .map_err(|e| translate_validation_error(&e, context))
}

pub(crate) fn resource_location(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    id: &str,
) -> String {
    handler
        .server()
        .config()
        .location(&format!("{}/{}", resource_type.endpoint(), id))
}

fn resource_response(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    resource: &Resource,
    status: StatusCode,
) -> ScimResponse {
    let location = resource_location(handler, resource_type, &resource.id);
    ScimResponse::json(status, &resource.to_representation(resource_type, &location))
}
