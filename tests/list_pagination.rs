//! List requests: envelope semantics, pagination, filtering and sorting.

mod common;

use common::{assert_scim_error, body, create_handler, create_user};
use proptest::prelude::*;
use scim_dispatch::{ScimOperationHandler, ScimRequest};
use serde_json::Value;

async fn list(handler: &ScimOperationHandler, params: &[(&str, &str)]) -> Value {
    let mut request = ScimRequest::get("/v2/Users");
    for (name, value) in params {
        request = request.with_query_param(*name, *value);
    }
    let response = handler.handle(request).await;
    assert_eq!(response.status().as_u16(), 200, "{:?}", response.to_json());
    body(&response)
}

fn user_names(envelope: &Value) -> Vec<String> {
    envelope["Resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["userName"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_empty_collection() {
    let handler = create_handler();

    let envelope = list(&handler, &[]).await;

    assert_eq!(envelope["totalResults"], 0);
    assert_eq!(envelope["itemsPerPage"], 0);
    assert_eq!(envelope["startIndex"], 1);
    assert_eq!(envelope["Resources"], serde_json::json!([]));
}

#[tokio::test]
async fn test_items_per_page_is_actual_count() {
    let handler = create_handler();
    for name in ["alice", "bob", "carol"] {
        create_user(&handler, name).await;
    }

    let envelope = list(&handler, &[("count", "10")]).await;
    assert_eq!(envelope["totalResults"], 3);
    assert_eq!(envelope["itemsPerPage"], 3);

    let envelope = list(&handler, &[("startIndex", "3"), ("count", "10")]).await;
    assert_eq!(envelope["startIndex"], 3);
    assert_eq!(envelope["itemsPerPage"], 1);
    assert_eq!(envelope["totalResults"], 3);
}

#[tokio::test]
async fn test_default_page_size_and_clamping() {
    let handler = create_handler();
    for i in 0..12 {
        create_user(&handler, &format!("user{:02}", i)).await;
    }

    let envelope = list(&handler, &[]).await;
    assert_eq!(envelope["itemsPerPage"], 10);
    assert_eq!(envelope["totalResults"], 12);

    let envelope = list(&handler, &[("count", "0")]).await;
    assert_eq!(envelope["itemsPerPage"], 0);
    assert_eq!(envelope["totalResults"], 12);

    let envelope = list(&handler, &[("count", "-3"), ("startIndex", "-7")]).await;
    assert_eq!(envelope["itemsPerPage"], 0);
    assert_eq!(envelope["startIndex"], 1);
}

#[tokio::test]
async fn test_start_index_past_the_end() {
    let handler = create_handler();
    create_user(&handler, "alice").await;

    let envelope = list(&handler, &[("startIndex", "5")]).await;
    assert_eq!(envelope["startIndex"], 5);
    assert_eq!(envelope["itemsPerPage"], 0);
    assert_eq!(envelope["totalResults"], 1);
}

#[tokio::test]
async fn test_sorting() {
    let handler = create_handler();
    for name in ["carol", "alice", "bob"] {
        create_user(&handler, name).await;
    }

    let envelope = list(&handler, &[("sortBy", "userName")]).await;
    assert_eq!(user_names(&envelope), vec!["alice", "bob", "carol"]);

    let envelope = list(
        &handler,
        &[("sortBy", "userName"), ("sortOrder", "descending")],
    )
    .await;
    assert_eq!(user_names(&envelope), vec!["carol", "bob", "alice"]);
}

#[tokio::test]
async fn test_filtering() {
    let handler = create_handler();
    for name in ["bjensen", "bsmith", "jdoe"] {
        create_user(&handler, name).await;
    }

    let envelope = list(&handler, &[("filter", r#"userName sw "b""#)]).await;
    assert_eq!(envelope["totalResults"], 2);

    let envelope = list(&handler, &[("filter", r#"userName eq "JDOE""#)]).await;
    assert_eq!(user_names(&envelope), vec!["jdoe"]);

    let envelope = list(&handler, &[("filter", "title pr")]).await;
    assert_eq!(envelope["totalResults"], 0);
    assert_eq!(envelope["itemsPerPage"], 0);
}

#[tokio::test]
async fn test_bad_list_parameters() {
    let handler = create_handler();

    let response = handler
        .handle(ScimRequest::get("/Users").with_query_param("filter", "userName gt \"a\""))
        .await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidFilter");

    let response = handler
        .handle(ScimRequest::get("/Users").with_query_param("count", "many"))
        .await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidValue");

    let response = handler
        .handle(ScimRequest::get("/Users").with_query_param("sortOrder", "random"))
        .await;
    let error = assert_scim_error(&response, 400);
    assert_eq!(error["scimType"], "invalidValue");
}

#[tokio::test]
async fn test_listed_resources_carry_schemas() {
    let handler = create_handler();
    create_user(&handler, "alice").await;

    let envelope = list(&handler, &[]).await;
    let user = &envelope["Resources"][0];
    assert!(user["schemas"].as_array().unwrap().len() >= 1);
    assert_eq!(user["meta"]["resourceType"], "User");
    assert!(user["id"].is_string());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_envelope_matches_page(
        total in 0usize..15,
        start_index in 1usize..20,
        count in 0usize..60,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let envelope = runtime.block_on(async {
            let handler = create_handler();
            for i in 0..total {
                create_user(&handler, &format!("user{}", i)).await;
            }
            let start_index = start_index.to_string();
            let count = count.to_string();
            list(&handler, &[("startIndex", start_index.as_str()), ("count", count.as_str())]).await
        });

        let items = envelope["Resources"].as_array().unwrap().len();
        let expected = count.min(50).min(total.saturating_sub(start_index - 1));

        prop_assert_eq!(envelope["itemsPerPage"].as_u64(), Some(items as u64));
        prop_assert_eq!(items, expected);
        prop_assert_eq!(envelope["totalResults"].as_u64(), Some(total as u64));
        prop_assert_eq!(envelope["startIndex"].as_u64(), Some(start_index as u64));
    }
}
