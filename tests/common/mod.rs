//! Shared fixtures for integration tests.

#![allow(dead_code)]

use scim_dispatch::providers::InMemoryProvider;
use scim_dispatch::resource::ResourceType;
use scim_dispatch::schema::embedded::{ENTERPRISE_USER_SCHEMA_URI, GROUP_SCHEMA_URI, USER_SCHEMA_URI};
use scim_dispatch::{ScimOperationHandler, ScimRequest, ScimResponse, ScimServerBuilder};
use serde_json::{Value, json};

pub const BASE_URL: &str = "https://scim.example.com";

/// Route library log output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn user_resource_type() -> ResourceType {
    ResourceType::new(
        "User",
        "/Users",
        USER_SCHEMA_URI,
        InMemoryProvider::new().with_unique_attribute("userName"),
    )
    .with_description("User Account")
    .with_extension(ENTERPRISE_USER_SCHEMA_URI, false)
}

pub fn group_resource_type() -> ResourceType {
    ResourceType::new(
        "Group",
        "/Groups",
        GROUP_SCHEMA_URI,
        InMemoryProvider::new().with_unique_attribute("displayName"),
    )
    .with_description("Group")
}

/// Handler with in-memory User and Group resource types.
pub fn create_handler() -> ScimOperationHandler {
    init_logging();
    let server = ScimServerBuilder::new()
        .with_base_url(BASE_URL)
        .with_default_page_size(10)
        .with_max_page_size(50)
        .with_resource_type(user_resource_type())
        .with_resource_type(group_resource_type())
        .build()
        .expect("test server should build");
    ScimOperationHandler::new(server)
}

pub fn body(response: &ScimResponse) -> Value {
    response
        .to_json()
        .unwrap_or_else(|| panic!("expected JSON body, got {:?}", response.body()))
}

/// POST a user and return its wire representation.
pub async fn create_user(handler: &ScimOperationHandler, user_name: &str) -> Value {
    let request = ScimRequest::post("/v2/Users", json!({"userName": user_name}).to_string());
    let response = handler.handle(request).await;
    assert_eq!(response.status().as_u16(), 201, "create failed: {:?}", body(&response));
    body(&response)
}

/// Assert the response carries a well-formed SCIM error with this status.
pub fn assert_scim_error(response: &ScimResponse, status: u16) -> Value {
    assert_eq!(response.status().as_u16(), status);
    let error = body(response);
    assert_eq!(
        error["schemas"],
        json!(["urn:ietf:params:scim:api:messages:2.0:Error"])
    );
    assert_eq!(error["status"], status);
    assert!(error["detail"].is_string());
    error
}
