//! Integration tests for the pantry lifecycle.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//!   (cargo run -p shelfsense-cli -- migrate)
//! - The server running (cargo run -p shelfsense-server)
//!
//! Run with: cargo test -p shelfsense-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use shelfsense_integration_tests::{base_url, client, unique_user};

/// Test helper: add a batch of raw items for a user.
async fn add_items(user: &str, items: Value) -> reqwest::Response {
    client()
        .post(format!("{}/pantry", base_url()))
        .json(&json!({"userId": user, "foodItems": items}))
        .send()
        .await
        .expect("POST /pantry failed")
}

/// Test helper: list a user's pantry as JSON.
async fn list_pantry(user: &str) -> reqwest::Response {
    client()
        .get(format!("{}/pantry", base_url()))
        .query(&[("userId", user)])
        .send()
        .await
        .expect("GET /pantry failed")
}

// ============================================================================
// Add & List
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_then_list_roundtrip() {
    let user = unique_user("roundtrip");

    let resp = add_items(
        &user,
        json!([{"foodItem": " Whole Milk ", "quantity": "1.5", "unit": " qt ", "expirationDate": "01/15/2034"}]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("add response");
    assert_eq!(body["inserted"], 1);
    assert_eq!(body["failed"], json!([]));

    let pantry: Value = list_pantry(&user)
        .await
        .json()
        .await
        .expect("list response");
    let items = pantry.as_array().expect("pantry is an array");
    assert_eq!(items.len(), 1);

    // Field-for-field equality after normalization
    let item = &items[0];
    assert_eq!(item["foodItem"], "Whole Milk");
    assert_eq!(item["quantity"], "1.5");
    assert_eq!(item["unit"], "qt");
    assert_eq!(item["expirationDate"], "01/15/2034");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_missing_unit_gets_count_sentinel() {
    let user = unique_user("sentinel");

    let resp = add_items(
        &user,
        json!([{"foodItem": "milk", "quantity": 1, "unit": "", "expirationDate": "01/15/2034"}]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let pantry: Value = list_pantry(&user).await.json().await.expect("list");
    assert_eq!(pantry[0]["unit"], "count");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_empty_batch_is_successful_noop() {
    let user = unique_user("empty-batch");

    let resp = add_items(&user, json!([])).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("add response");
    assert_eq!(body["inserted"], 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_invalid_date_is_rejected() {
    let user = unique_user("bad-date");

    let resp = add_items(
        &user,
        json!([{"foodItem": "milk", "quantity": 1, "unit": "", "expirationDate": "13/40/2024"}]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_listing_sorted_soonest_first() {
    let user = unique_user("sorted");

    add_items(
        &user,
        json!([
            {"foodItem": "late", "quantity": 1, "unit": "", "expirationDate": "06/01/2034"},
            {"foodItem": "soon", "quantity": 1, "unit": "", "expirationDate": "01/15/2034"},
            {"foodItem": "middle", "quantity": 1, "unit": "", "expirationDate": "03/01/2034"}
        ]),
    )
    .await;

    let pantry: Value = list_pantry(&user).await.json().await.expect("list");
    let names: Vec<&str> = pantry
        .as_array()
        .expect("array")
        .iter()
        .map(|i| i["foodItem"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["soon", "middle", "late"]);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_list_unknown_user_is_not_found() {
    let resp = list_pantry(&unique_user("never-seen")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Remove
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_remove_missing_item_is_noop() {
    let user = unique_user("remove-noop");
    add_items(
        &user,
        json!([{"foodItem": "milk", "quantity": 1, "unit": "", "expirationDate": "01/15/2034"}]),
    )
    .await;

    let resp = client()
        .delete(format!("{}/pantry", base_url()))
        .json(&json!({"userId": user, "foodItemName": "kale"}))
        .send()
        .await
        .expect("DELETE /pantry failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("remove response");
    assert_eq!(body["removed"], 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_remove_matches_all_case_insensitively() {
    let user = unique_user("remove-all");
    add_items(
        &user,
        json!([
            {"foodItem": "Milk", "quantity": 1, "unit": "", "expirationDate": "01/15/2034"},
            {"foodItem": "milk", "quantity": 2, "unit": "", "expirationDate": "01/20/2034"},
            {"foodItem": "eggs", "quantity": 12, "unit": "", "expirationDate": "01/25/2034"}
        ]),
    )
    .await;

    let resp = client()
        .delete(format!("{}/pantry", base_url()))
        .json(&json!({"userId": user, "foodItemName": "MILK"}))
        .send()
        .await
        .expect("DELETE /pantry failed");

    let body: Value = resp.json().await.expect("remove response");
    assert_eq!(body["removed"], 2);

    let pantry: Value = list_pantry(&user).await.json().await.expect("list");
    assert_eq!(pantry.as_array().expect("array").len(), 1);
    assert_eq!(pantry[0]["foodItem"], "eggs");
}

// ============================================================================
// Edit
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_edit_missing_item_is_not_found() {
    let user = unique_user("edit-missing");
    add_items(
        &user,
        json!([{"foodItem": "milk", "quantity": 1, "unit": "", "expirationDate": "01/15/2034"}]),
    )
    .await;

    let resp = client()
        .put(format!("{}/pantry", base_url()))
        .json(&json!({
            "userId": user,
            "foodItemName": "kale",
            "updatedItem": {"foodItem": "kale", "quantity": 2, "unit": "", "expirationDate": "01/15/2034"}
        }))
        .send()
        .await
        .expect("PUT /pantry failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_edit_rewrites_earliest_match_only() {
    let user = unique_user("edit-first");
    add_items(
        &user,
        json!([
            {"foodItem": "milk", "quantity": 1, "unit": "", "expirationDate": "01/15/2034"},
            {"foodItem": "milk", "quantity": 1, "unit": "", "expirationDate": "01/20/2034"}
        ]),
    )
    .await;

    let resp = client()
        .put(format!("{}/pantry", base_url()))
        .json(&json!({
            "userId": user,
            "foodItemName": "Milk",
            "updatedItem": {"foodItem": "milk", "quantity": 9, "unit": "qt", "expirationDate": "01/15/2034"}
        }))
        .send()
        .await
        .expect("PUT /pantry failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let pantry: Value = list_pantry(&user).await.json().await.expect("list");
    let items = pantry.as_array().expect("array");
    assert_eq!(items.len(), 2);

    // The earliest-inserted entry changed; the later one is untouched
    assert_eq!(items[0]["expirationDate"], "01/15/2034");
    assert_eq!(items[0]["quantity"], "9");
    assert_eq!(items[1]["expirationDate"], "01/20/2034");
    assert_eq!(items[1]["quantity"], "1");
}

// ============================================================================
// Voice
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_interpret_voice_requires_transcript() {
    let resp = client()
        .post(format!("{}/interpret-voice", base_url()))
        .json(&json!({"speechInput": "   "}))
        .send()
        .await
        .expect("POST /interpret-voice failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
