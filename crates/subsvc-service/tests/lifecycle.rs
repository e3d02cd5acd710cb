//! End-to-end subscription lifecycle over each storage backend.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

async fn run_lifecycle(harness: &TestHarness) {
    // create user -> id 1
    let user_id = harness.create_user("alice@example.com").await;
    assert_eq!(user_id, 1);

    // (1, "pro") -> id 1, active
    let pro = harness.create_subscription(user_id, "pro").await;
    assert_eq!(
        pro,
        json!({ "id": 1, "user_id": 1, "plan": "pro", "active": true })
    );

    // duplicate (1, "pro") -> conflict
    harness
        .server
        .post("/subscriptions")
        .json(&json!({ "user_id": user_id, "plan": "pro" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    // (1, "enterprise") -> id 2, active
    let enterprise = harness.create_subscription(user_id, "enterprise").await;
    assert_eq!(enterprise["id"], 2);
    assert_eq!(enterprise["active"], true);

    // list -> 2 records
    assert_eq!(harness.list_subscriptions(user_id).await.len(), 2);

    // deactivate id 1
    let response = harness
        .server
        .patch("/subscriptions/1")
        .add_query_param("active", false)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["active"], false);

    // re-list -> one active, one inactive
    let subscriptions = harness.list_subscriptions(user_id).await;
    assert_eq!(subscriptions.len(), 2);
    assert_eq!(subscriptions[0]["id"], 1);
    assert_eq!(subscriptions[0]["active"], false);
    assert_eq!(subscriptions[1]["id"], 2);
    assert_eq!(subscriptions[1]["active"], true);
}

#[tokio::test]
async fn lifecycle_in_memory() {
    run_lifecycle(&TestHarness::new()).await;
}

#[cfg(feature = "rocksdb-backend")]
#[tokio::test]
async fn lifecycle_on_rocksdb() {
    run_lifecycle(&TestHarness::with_rocksdb()).await;
}
