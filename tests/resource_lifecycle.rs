//! End-to-end resource lifecycle through the request router.

mod common;

use common::{BASE_URL, assert_scim_error, body, create_handler, create_user};
use futures::future::join_all;
use scim_dispatch::ScimRequest;
use scim_dispatch::schema::embedded::{ENTERPRISE_USER_SCHEMA_URI, USER_SCHEMA_URI};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_create_user_returns_created_resource() {
    let handler = create_handler();

    let response = handler
        .handle(ScimRequest::post("/v2/Users", r#"{"userName":"bjensen"}"#))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.content_type(), Some("application/scim+json"));

    let user = body(&response);
    let id = user["id"].as_str().expect("id assigned");
    assert!(!id.is_empty());
    assert_eq!(user["userName"], "bjensen");
    assert!(
        user["schemas"]
            .as_array()
            .unwrap()
            .contains(&json!(USER_SCHEMA_URI))
    );
    assert_eq!(user["meta"]["resourceType"], "User");
    assert_eq!(
        user["meta"]["location"],
        format!("{}/v2/Users/{}", BASE_URL, id)
    );
    assert!(user["meta"]["version"].as_str().unwrap().starts_with("W/\""));

    assert_eq!(response.location(), user["meta"]["location"].as_str());
    let http_response = response.into_http();
    assert_eq!(
        http_response.headers()[http::header::LOCATION],
        format!("{}/v2/Users/{}", BASE_URL, id)
    );
}

#[tokio::test]
async fn test_only_create_sets_location() {
    let handler = create_handler();
    let user = create_user(&handler, "bjensen").await;

    let response = handler
        .handle(ScimRequest::get(format!("/Users/{}", user["id"].as_str().unwrap())))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.location(), None);

    let response = handler
        .handle(ScimRequest::post("/Users", r#"{"userName":"bjensen"}"#))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    assert!(response.into_http().headers().get(http::header::LOCATION).is_none());
}

#[tokio::test]
async fn test_create_then_get_returns_same_attributes() {
    let handler = create_handler();
    let mut payload = json!({
        "userName": "bjensen",
        "externalId": "ext-701984",
        "name": {"givenName": "Barbara", "familyName": "Jensen"},
        "emails": [{"value": "bjensen@example.com", "type": "work", "primary": true}],
        "active": true
    });
    payload[ENTERPRISE_USER_SCHEMA_URI] =
        json!({"employeeNumber": "701984", "department": "Tour Operations"});

    let created = handler
        .handle(ScimRequest::post("/Users", payload.to_string()))
        .await;
    assert_eq!(created.status().as_u16(), 201);
    let created = body(&created);
    let id = created["id"].as_str().unwrap();

    let fetched = handler
        .handle(ScimRequest::get(format!("/Users/{}", id)))
        .await;
    assert_eq!(fetched.status().as_u16(), 200);
    let fetched = body(&fetched);

    assert_eq!(fetched, created);
    assert_eq!(fetched["externalId"], "ext-701984");
    assert_eq!(fetched["name"]["givenName"], "Barbara");
    assert_eq!(fetched[ENTERPRISE_USER_SCHEMA_URI]["department"], "Tour Operations");
    for field in ["created", "lastModified", "location", "version"] {
        assert!(
            !fetched["meta"][field].as_str().unwrap_or_default().is_empty(),
            "meta.{} should be present",
            field
        );
    }
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let handler = create_handler();

    let response = handler
        .handle(ScimRequest::get("/v2/Users/nonexistent-id"))
        .await;

    let error = assert_scim_error(&response, 404);
    assert!(error["detail"].as_str().unwrap().contains("nonexistent-id"));
    assert!(error.get("scimType").is_none());
}

#[tokio::test]
async fn test_client_supplied_server_fields_are_ignored() {
    let handler = create_handler();

    let response = handler
        .handle(ScimRequest::post(
            "/Users",
            r#"{"id":"chosen-by-client","meta":{"version":"W/\"x\""},"userName":"bjensen"}"#,
        ))
        .await;

    let user = body(&response);
    assert_ne!(user["id"], "chosen-by-client");
    assert_ne!(user["meta"]["version"], "W/\"x\"");
}

#[tokio::test]
async fn test_invalid_bodies_are_rejected() {
    let handler = create_handler();

    let response = handler.handle(ScimRequest::post("/Users", "{not json")).await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidSyntax");

    let response = handler.handle(ScimRequest::post("/Users", "[1, 2]")).await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidSyntax");

    let response = handler
        .handle(ScimRequest::post("/Users", r#"{"displayName":"No Username"}"#))
        .await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidValue");
    assert!(error["detail"].as_str().unwrap().contains("userName"));

    let response = handler
        .handle(ScimRequest::post("/Users", r#"{"userName":"x","active":"yes"}"#))
        .await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidValue");

    let response = handler
        .handle(ScimRequest::post(
            "/Users",
            r#"{"userName":"lower","USERNAME":"upper"}"#,
        ))
        .await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidValue");
}

#[tokio::test]
async fn test_duplicate_user_name_conflicts() {
    let handler = create_handler();
    create_user(&handler, "bjensen").await;

    let response = handler
        .handle(ScimRequest::post("/Users", r#"{"userName":"BJensen"}"#))
        .await;

    let error = assert_scim_error(&response, 409);
    assert_eq!(error["scimType"], "uniqueness");
}

#[tokio::test]
async fn test_non_ascii_user_names_conflict_and_filter_alike() {
    let handler = create_handler();
    create_user(&handler, "émile").await;

    let response = handler
        .handle(ScimRequest::post("/Users", r#"{"userName":"ÉMILE"}"#))
        .await;
    let error = assert_scim_error(&response, 409);
    assert_eq!(error["scimType"], "uniqueness");

    for filter in [r#"userName eq "ÉMILE""#, r#"userName sw "ÉMILE""#] {
        let response = handler
            .handle(ScimRequest::get("/Users").with_query_param("filter", filter))
            .await;
        assert_eq!(body(&response)["totalResults"], 1, "{}", filter);
    }
}

#[tokio::test]
async fn test_replace_updates_resource() {
    let handler = create_handler();
    let user = create_user(&handler, "bjensen").await;
    let id = user["id"].as_str().unwrap();

    let response = handler
        .handle(ScimRequest::put(
            format!("/v2/Users/{}", id),
            r#"{"userName":"bjensen","displayName":"Babs Jensen"}"#,
        ))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let replaced = body(&response);
    assert_eq!(replaced["id"], user["id"]);
    assert_eq!(replaced["displayName"], "Babs Jensen");
    assert_eq!(replaced["meta"]["created"], user["meta"]["created"]);
    assert_ne!(replaced["meta"]["version"], user["meta"]["version"]);
}

#[tokio::test]
async fn test_replacing_twice_is_idempotent() {
    let handler = create_handler();
    let user = create_user(&handler, "bjensen").await;
    let path = format!("/Users/{}", user["id"].as_str().unwrap());
    let payload = r#"{"userName":"bjensen","title":"Tour Guide"}"#;

    let first = body(&handler.handle(ScimRequest::put(path.clone(), payload)).await);
    let second = body(&handler.handle(ScimRequest::put(path, payload)).await);

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_replace_failures() {
    let handler = create_handler();
    create_user(&handler, "taken").await;
    let user = create_user(&handler, "bjensen").await;

    let response = handler
        .handle(ScimRequest::put("/Users/missing-id", r#"{"userName":"x"}"#))
        .await;
    let error = assert_scim_error(&response, 404);
    assert!(error["detail"].as_str().unwrap().contains("missing-id"));

    let response = handler
        .handle(ScimRequest::put(
            format!("/Users/{}", user["id"].as_str().unwrap()),
            r#"{"userName":"taken"}"#,
        ))
        .await;
    let error = assert_scim_error(&response, 409);
    assert_eq!(error["scimType"], "uniqueness");

    let response = handler
        .handle(ScimRequest::put(
            format!("/Users/{}", user["id"].as_str().unwrap()),
            "",
        ))
        .await;
    assert_scim_error(&response, 400);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let handler = create_handler();
    let user = create_user(&handler, "bjensen").await;
    let path = format!("/Users/{}", user["id"].as_str().unwrap());

    let response = handler.handle(ScimRequest::delete(path.clone())).await;
    assert_eq!(response.status().as_u16(), 204);
    assert!(response.body().is_empty());
    assert_eq!(response.content_type(), None);

    let response = handler.handle(ScimRequest::get(path.clone())).await;
    assert_scim_error(&response, 404);

    let response = handler.handle(ScimRequest::delete(path)).await;
    assert_scim_error(&response, 404);
}

#[tokio::test]
async fn test_resource_types_are_isolated() {
    let handler = create_handler();
    let user = create_user(&handler, "bjensen").await;

    let response = handler
        .handle(ScimRequest::get(format!(
            "/Groups/{}",
            user["id"].as_str().unwrap()
        )))
        .await;
    assert_scim_error(&response, 404);

    let response = handler
        .handle(ScimRequest::post("/Groups", r#"{"displayName":"Tour Guides"}"#))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(
        body(&response)["schemas"],
        json!(["urn:ietf:params:scim:schemas:core:2.0:Group"])
    );
}

#[tokio::test]
async fn test_routing_errors() {
    let handler = create_handler();

    let response = handler.handle(ScimRequest::get("/v2/Devices")).await;
    assert_scim_error(&response, 404);

    let response = handler
        .handle(ScimRequest::new(http::Method::PATCH, "/Users/123"))
        .await;
    assert_scim_error(&response, 405);
}

#[tokio::test]
async fn test_concurrent_creates() {
    let handler = Arc::new(create_handler());

    let tasks = (0..20).map(|i| {
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let request = ScimRequest::post("/Users", json!({"userName": format!("user{}", i)}).to_string())
                .with_request_id(format!("req-{}", i));
            handler.handle(request).await
        })
    });

    let responses = join_all(tasks).await;
    let mut ids = HashSet::new();
    for response in responses {
        let response = response.expect("task should not panic");
        assert_eq!(response.status().as_u16(), 201);
        ids.insert(body(&response)["id"].as_str().unwrap().to_string());
    }
    assert_eq!(ids.len(), 20);

    let list = handler
        .handle(ScimRequest::get("/Users").with_query_param("count", "50"))
        .await;
    assert_eq!(body(&list)["totalResults"], 20);
}
