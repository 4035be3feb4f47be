//! List handler and list envelope assembly.

use crate::error::ScimResult;
use crate::operation_handler::core::ScimOperationHandler;
use crate::operation_handler::errors::translate_read_error;
use crate::operation_handler::handlers::crud::resource_location;
use crate::operation_handler::list_response::ListResponse;
use crate::operation_handler::response::ScimResponse;
use crate::resource::{ListRequestParams, Page, RequestContext, ResourceType};

use http::StatusCode;
use log::debug;
use serde_json::Value;

/// Ask the provider for one page and wrap it in a list envelope.
pub async fn handle_list(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    params: &ListRequestParams,
    context: &RequestContext,
) -> ScimResult<ScimResponse> {
    let page = resource_type
        .provider()
        .list(params, context)
        .await
        .map_err(|e| translate_read_error(&e, None, context))?;

    debug!(
        "Listed {} of {} {} resources (request: '{}')",
        page.resources.len(),
        page.total_results,
        resource_type.name(),
        context.request_id
    );

    let envelope = build_list_response(handler, resource_type, page, params);
    Ok(ScimResponse::json(StatusCode::OK, &envelope))
}

/// Wrap every resource of the page, keeping the provider's order.
pub fn build_list_response(
    handler: &ScimOperationHandler,
    resource_type: &ResourceType,
    page: Page,
    params: &ListRequestParams,
) -> ListResponse<Value> {
    let resources = page
        .resources
        .iter()
        .map(|resource| {
            let location = resource_location(handler, resource_type, &resource.id);
            resource.to_representation(resource_type, &location)
        })
        .collect();
    ListResponse::new(resources, page.total_results, params.start_index)
}
