//! Core operation handler infrastructure.
//!
//! [`ScimOperationHandler`] owns the server registry and exposes one entry
//! point per SCIM operation, plus [`handle`](ScimOperationHandler::handle)
//! which routes a raw HTTP-shaped request to the right entry point.

use crate::error::{ScimError, ScimResult};
use crate::operation_handler::handlers::{crud, discovery, query};
use crate::operation_handler::response::ScimResponse;
use crate::operation_handler::routing::{Route, resolve};
use crate::resource::{ListRequestParams, RequestContext, ResourceType};
use crate::scim_server::ScimServer;

use http::Method;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Dispatcher for SCIM requests.
///
/// Holds no per-request state; share it across tasks behind an `Arc`.
#[derive(Debug)]
pub struct ScimOperationHandler {
    pub(super) server: ScimServer,
}

/// A protocol-shaped request as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScimRequest {
    pub method: Method,
    /// Request path, with or without the version prefix (`/v2/Users/123`)
    pub path: String,
    /// Decoded query parameters
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
    /// Correlation id; generated when absent
    pub request_id: Option<String>,
}

impl ScimOperationHandler {
    pub fn new(server: ScimServer) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &ScimServer {
        &self.server
    }

    /// Route and dispatch one request.
    pub async fn handle(&self, request: ScimRequest) -> ScimResponse {
        let context = match &request.request_id {
            Some(id) => RequestContext::new(id.clone()),
            None => RequestContext::with_generated_id(),
        };

        info!(
            "SCIM {} {} (request: '{}')",
            request.method, request.path, context.request_id
        );

        let response = match resolve(&self.server, &request.method, &request.path) {
            Ok(route) => self.dispatch(route, &request, &context).await,
            Err(e) => {
                warn!(
                    "No route for {} {}: {} (request: '{}')",
                    request.method,
                    request.path,
                    e.detail(),
                    context.request_id
                );
                ScimResponse::error(&e)
            }
        };

        debug!(
            "SCIM {} {} answered {} (request: '{}')",
            request.method,
            request.path,
            response.status().as_u16(),
            context.request_id
        );
        response
    }

    async fn dispatch(
        &self,
        route: Route<'_>,
        request: &ScimRequest,
        context: &RequestContext,
    ) -> ScimResponse {
        match route {
            Route::ListSchemas => self.list_schemas(),
            Route::GetSchema(id) => self.get_schema(id),
            Route::ListResourceTypes => self.list_resource_types(),
            Route::GetResourceType(name) => self.get_resource_type(name),
            Route::ServiceProviderConfig => self.service_provider_config(),
            Route::Create(rt) => self.create(rt, &request.body, context).await,
            Route::List(rt) => {
                let config = self.server.config();
                match ListRequestParams::from_query(
                    &request.query,
                    config.default_page_size,
                    config.max_page_size,
                ) {
                    Ok(params) => self.list(rt, &params, context).await,
                    Err(e) => ScimResponse::error(
                        &super::errors::translate_validation_error(&e, context),
                    ),
                }
            }
            Route::Get(rt, id) => self.get(rt, id, context).await,
            Route::Replace(rt, id) => self.replace(rt, id, &request.body, context).await,
            Route::Delete(rt, id) => self.delete(rt, id, context).await,
        }
    }

    /// Create a resource from a raw request body.
    pub async fn create(
        &self,
        resource_type: &ResourceType,
        body: &[u8],
        context: &RequestContext,
    ) -> ScimResponse {
        respond(crud::handle_create(self, resource_type, body, context).await)
    }

    pub async fn get(
        &self,
        resource_type: &ResourceType,
        id: &str,
        context: &RequestContext,
    ) -> ScimResponse {
        respond(crud::handle_get(self, resource_type, id, context).await)
    }

    pub async fn list(
        &self,
        resource_type: &ResourceType,
        params: &ListRequestParams,
        context: &RequestContext,
    ) -> ScimResponse {
        respond(query::handle_list(self, resource_type, params, context).await)
    }

    /// Replace a resource with a raw request body.
    pub async fn replace(
        &self,
        resource_type: &ResourceType,
        id: &str,
        body: &[u8],
        context: &RequestContext,
    ) -> ScimResponse {
        respond(crud::handle_replace(self, resource_type, id, body, context).await)
    }

    pub async fn delete(
        &self,
        resource_type: &ResourceType,
        id: &str,
        context: &RequestContext,
    ) -> ScimResponse {
        respond(crud::handle_delete(resource_type, id, context).await)
    }

    pub fn list_schemas(&self) -> ScimResponse {
        discovery::handle_list_schemas(self)
    }

    pub fn get_schema(&self, id: &str) -> ScimResponse {
        respond(discovery::handle_get_schema(self, id))
    }

    pub fn list_resource_types(&self) -> ScimResponse {
        discovery::handle_list_resource_types(self)
    }

    pub fn get_resource_type(&self, name: &str) -> ScimResponse {
        respond(discovery::handle_get_resource_type(self, name))
    }

    pub fn service_provider_config(&self) -> ScimResponse {
        discovery::handle_service_provider_config(self)
    }
}

fn respond(result: ScimResult<ScimResponse>) -> ScimResponse {
    result.unwrap_or_else(|e: ScimError| ScimResponse::error(&e))
}
