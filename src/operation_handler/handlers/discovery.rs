//! Discovery handlers: `/Schemas`, `/ResourceTypes`, `/ServiceProviderConfig`.
//!
//! Served straight from the immutable registry; catalogs are never paginated.

use crate::error::{ScimError, ScimResult};
use crate::operation_handler::core::ScimOperationHandler;
use crate::operation_handler::list_response::ListResponse;
use crate::operation_handler::response::ScimResponse;
use crate::schema_discovery::SchemaRepresentation;

use http::StatusCode;

pub fn handle_list_schemas(handler: &ScimOperationHandler) -> ScimResponse {
    let server = handler.server();
    let schemas = server.schema_registry().get_schemas();
    let locations: Vec<String> = schemas
        .iter()
        .map(|schema| server.config().location(&format!("/Schemas/{}", schema.id)))
        .collect();

    let representations = schemas
        .iter()
        .zip(&locations)
        .map(|(schema, location)| SchemaRepresentation::new(schema, location))
        .collect();
    ScimResponse::json(StatusCode::OK, &ListResponse::complete(representations))
}

pub fn handle_get_schema(handler: &ScimOperationHandler, id: &str) -> ScimResult<ScimResponse> {
    let server = handler.server();
    let schema = server.schema_registry().get_schema(id).ok_or_else(|| {
        ScimError::new(
            StatusCode::NOT_FOUND,
            format!("Schema \"{}\" not found.", id),
            None,
        )
    })?;

    let location = server.config().location(&format!("/Schemas/{}", schema.id));
    Ok(ScimResponse::json(
        StatusCode::OK,
        &SchemaRepresentation::new(schema, &location),
    ))
}

pub fn handle_list_resource_types(handler: &ScimOperationHandler) -> ScimResponse {
    let server = handler.server();
    let resource_types = server.resource_types();
    let locations: Vec<String> = resource_types
        .iter()
        .map(|rt| {
            server
                .config()
                .location(&format!("/ResourceTypes/{}", rt.name()))
        })
        .collect();

    let representations = resource_types
        .iter()
        .zip(&locations)
        .map(|(rt, location)| rt.to_representation(location))
        .collect();
    ScimResponse::json(StatusCode::OK, &ListResponse::complete(representations))
}

pub fn handle_get_resource_type(
    handler: &ScimOperationHandler,
    name: &str,
) -> ScimResult<ScimResponse> {
    let server = handler.server();
    let resource_type = server.resource_type(name).ok_or_else(|| {
        ScimError::new(
            StatusCode::NOT_FOUND,
            format!("Resource type \"{}\" not found.", name),
            None,
        )
    })?;

    let location = server
        .config()
        .location(&format!("/ResourceTypes/{}", resource_type.name()));
    Ok(ScimResponse::json(
        StatusCode::OK,
        &resource_type.to_representation(&location),
    ))
}

pub fn handle_service_provider_config(handler: &ScimOperationHandler) -> ScimResponse {
    let server = handler.server();
    let location = server.config().location("/ServiceProviderConfig");
    ScimResponse::json(
        StatusCode::OK,
        &server.service_provider_config().to_representation(&location),
    )
}
