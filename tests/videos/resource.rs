//! Per-endpoint behavior of `/api/videos`.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use vidzy::{CollectionExt, InMemoryDocumentStore};

use crate::support::{
    start_memory_server, start_server, start_server_with_timeout, FailingStore, SlowStore,
};

async fn create(client: &reqwest::Client, base: &str, body: Value) -> Value {
    let resp = client
        .post(format!("{base}/api/videos"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn list_starts_empty() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/videos")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_record_with_identifier() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let body = create(&client, &base, json!({ "title": "A", "description": "B" })).await;
    assert_eq!(body["title"], "A");
    assert_eq!(body["description"], "B");
    assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn create_ignores_client_identifier() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let body = create(&client, &base, json!({ "_id": "chosen", "title": "A" })).await;
    assert_ne!(body["_id"], "chosen");

    let resp = client
        .get(format!("{base}/api/videos/chosen"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn missing_and_empty_fields_are_stored_as_is() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let body = create(&client, &base, json!({ "title": "" })).await;
    assert_eq!(body["title"], "");
    assert_eq!(body["description"], Value::Null);

    let body = create(&client, &base, json!({})).await;
    assert_eq!(body["title"], Value::Null);
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn get_unknown_returns_404_with_error_body() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/videos/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "video not found: nope" }));
}

#[tokio::test]
async fn update_reports_outcome() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "title": "A", "description": "B" })).await;
    let id = created["_id"].as_str().unwrap();

    let resp = client
        .put(format!("{base}/api/videos/{id}"))
        .json(&json!({ "title": "A2", "description": "B2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "matched": 1, "modified": 1 }));
}

#[tokio::test]
async fn update_preserves_other_stored_fields() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let doc = store
        .collection("videos")
        .insert(
            json!({ "title": "A", "description": "B", "duration": 90 })
                .as_object()
                .unwrap()
                .clone(),
        )
        .unwrap();
    let id = doc["_id"].as_str().unwrap().to_string();

    let base = start_server(store.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/videos/{id}"))
        .json(&json!({ "_id": "other", "title": "A2", "description": "B2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let stored = store.collection("videos").find_one(&id).unwrap().unwrap();
    assert_eq!(stored["_id"], id.as_str());
    assert_eq!(stored["title"], "A2");
    assert_eq!(stored["duration"], 90);
}

#[tokio::test]
async fn update_unknown_returns_404() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/videos/nope"))
        .json(&json!({ "title": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_reports_outcome_then_404() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let created = create(&client, &base, json!({ "title": "A", "description": "B" })).await;
    let id = created["_id"].as_str().unwrap();

    let resp = client
        .delete(format!("{base}/api/videos/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "removed": 1 }));

    let resp = client
        .delete(format!("{base}/api/videos/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/videos"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("bad request"));

    let resp = client
        .post(format!("{base}/api/videos"))
        .json(&json!({ "title": 42 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn store_failure_returns_500_without_detail() {
    let base = start_server(Arc::new(FailingStore)).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/videos")).send().await.unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "internal server error" }));

    let resp = client
        .post(format!("{base}/api/videos"))
        .json(&json!({ "title": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let resp = client
        .delete(format!("{base}/api/videos/x"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn slow_request_times_out_with_error_body() {
    let store = SlowStore {
        inner: InMemoryDocumentStore::new(),
        delay: Duration::from_secs(1),
    };
    let base = start_server_with_timeout(Arc::new(store), Duration::from_millis(100)).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/api/videos")).send().await.unwrap();
    assert_eq!(resp.status(), 408);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "request timed out" }));

    // Writes are not delayed and finish inside the timeout.
    let resp = client
        .post(format!("{base}/api/videos"))
        .json(&json!({ "title": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn slow_store_call_does_not_stall_other_requests() {
    // tokio::test runs a single-threaded runtime shared with the server, so a
    // store call made on it would hold up every other request.
    let store = SlowStore {
        inner: InMemoryDocumentStore::new(),
        delay: Duration::from_millis(1500),
    };
    let base = start_server(Arc::new(store)).await;
    let client = reqwest::Client::new();

    let slow = tokio::spawn({
        let client = client.clone();
        let url = format!("{base}/api/videos/x");
        async move { client.get(url).send().await.unwrap().status() }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let created = tokio::time::timeout(
        Duration::from_millis(750),
        client
            .post(format!("{base}/api/videos"))
            .json(&json!({ "title": "A" }))
            .send(),
    )
    .await
    .expect("insert waited on the slow read")
    .unwrap();
    assert_eq!(created.status(), 200);

    assert_eq!(slow.await.unwrap(), 404);
}

#[tokio::test]
async fn health_counts_videos() {
    let base = start_memory_server().await;
    let client = reqwest::Client::new();

    create(&client, &base, json!({ "title": "A" })).await;
    create(&client, &base, json!({ "title": "B" })).await;

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true, "videos": 2 }));
}
