//! Path routing for [`ScimOperationHandler::handle`](super::ScimOperationHandler::handle).

use crate::error::{ScimError, ScimResult};
use crate::resource::ResourceType;
use crate::scim_server::ScimServer;

use http::Method;

/// Responder selected for a request, with its path parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Route<'a> {
    ListSchemas,
    GetSchema(&'a str),
    ListResourceTypes,
    GetResourceType(&'a str),
    ServiceProviderConfig,
    Create(&'a ResourceType),
    List(&'a ResourceType),
    Get(&'a ResourceType, &'a str),
    Replace(&'a ResourceType, &'a str),
    Delete(&'a ResourceType, &'a str),
}

/// Resolve `method` and `path` against the registry.
///
/// A trailing slash is ignored and the configured version prefix is
/// optional. Unknown paths give 404, known paths with another method 405.
pub(crate) fn resolve<'a>(
    server: &'a ScimServer,
    method: &Method,
    path: &'a str,
) -> ScimResult<Route<'a>> {
    let relative = strip_prefix(path, &server.config().path_prefix());
    let segments: Vec<&str> = relative
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let not_found = || ScimError::endpoint_not_found(path);
    let not_allowed = || ScimError::method_not_allowed(method, path);

    match segments.as_slice() {
        ["Schemas"] => get_only(method, Route::ListSchemas).ok_or_else(not_allowed),
        ["Schemas", id] => get_only(method, Route::GetSchema(*id)).ok_or_else(not_allowed),
        ["ResourceTypes"] => get_only(method, Route::ListResourceTypes).ok_or_else(not_allowed),
        ["ResourceTypes", name] => {
            get_only(method, Route::GetResourceType(*name)).ok_or_else(not_allowed)
        }
        ["ServiceProviderConfig"] => {
            get_only(method, Route::ServiceProviderConfig).ok_or_else(not_allowed)
        }
        [endpoint] => {
            let rt = server
                .resource_type_by_endpoint(endpoint)
                .ok_or_else(not_found)?;
            match *method {
                Method::POST => Ok(Route::Create(rt)),
                Method::GET => Ok(Route::List(rt)),
                _ => Err(not_allowed()),
            }
        }
        [endpoint, id] => {
            let rt = server
                .resource_type_by_endpoint(endpoint)
                .ok_or_else(not_found)?;
            match *method {
                Method::GET => Ok(Route::Get(rt, *id)),
                Method::PUT => Ok(Route::Replace(rt, *id)),
                Method::DELETE => Ok(Route::Delete(rt, *id)),
                _ => Err(not_allowed()),
            }
        }
        _ => Err(not_found()),
    }
}

fn get_only<'a>(method: &Method, route: Route<'a>) -> Option<Route<'a>> {
    (*method == Method::GET).then_some(route)
}

fn strip_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    match path.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}
