//! Integration tests for the portal's HTTP API.
//!
//! These tests verify the full request/response cycle through the HTTP API.

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use tower::ServiceExt;

use rail_feedback::api::{AppState, router};
use rail_feedback::i18n::Language;
use rail_feedback::storage::{MemoryStore, SqliteStore, Storage};

fn create_test_server(store: MemoryStore) -> TestServer {
    let state = AppState::new(Storage::Memory(store), "reports", Language::En);
    TestServer::new(router(state)).unwrap()
}

fn station_draft() -> Value {
    json!({
        "type": "station",
        "category": "cleanliness",
        "priority": "medium",
        "title": "Dirty Platform 3",
        "description": "Trash overflowing",
        "station": "New Delhi",
        "trainNumber": "",
        "platform": "",
        "coach": "",
        "name": "Asha Verma",
        "phone": "9999999999",
        "email": "asha@example.com",
        "isAnonymous": true,
        "photos": []
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(MemoryStore::new());

    let response = server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_anonymous_submission_appears_first() {
    let store = MemoryStore::new();
    let server = create_test_server(store.clone());

    server
        .post("/reports")
        .json(&json!({
            "category": "food",
            "title": "Cold dinner",
            "description": "Meal served cold in pantry car"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.post("/reports").json(&station_draft()).await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["report"]["status"], "submitted");
    assert_eq!(body["report"]["userInfo"]["isAnonymous"], true);
    assert!(body["report"]["userInfo"]["name"].is_null());
    assert!(body["report"]["userInfo"]["phone"].is_null());
    assert!(body["report"]["userInfo"]["email"].is_null());
    assert_eq!(body["report"]["photos"], json!([]));
    assert!(body["message"].as_str().unwrap().contains("successfully"));

    // The stored document carries no contact data either
    let stored = store.documents("reports");
    assert_eq!(stored.len(), 2);
    assert!(!stored[1].user_info.has_contact());

    let dashboard: Value = server.get("/dashboard").await.json();
    assert_eq!(dashboard["reports"][0]["title"], "Dirty Platform 3");
    assert_eq!(dashboard["reports"][0]["location"]["station"], "New Delhi");
    assert_eq!(dashboard["reports"][1]["title"], "Cold dinner");
}

#[tokio::test]
async fn test_dashboard_counts_after_two_submissions() {
    let server = create_test_server(MemoryStore::new());

    for title in ["Leaking roof", "No drinking water"] {
        server
            .post("/reports")
            .json(&json!({
                "category": "infrastructure",
                "title": title,
                "description": "Platform 5"
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.get("/dashboard?status=all").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["stats"]["total"], 2);
    assert_eq!(body["stats"]["submitted"], 2);
    assert_eq!(body["stats"]["resolved"], 0);

    let resolved: Value = server.get("/dashboard?status=resolved").await.json();
    assert!(resolved["reports"].as_array().unwrap().is_empty());
    assert_eq!(resolved["stats"]["total"], 2);
}

#[tokio::test]
async fn test_search_without_match_shows_empty_state() {
    let server = create_test_server(MemoryStore::new());
    server.post("/reports").json(&station_draft()).await;

    let body: Value = server.get("/dashboard?search=refund").await.json();
    assert!(body["reports"].as_array().unwrap().is_empty());
    assert_eq!(body["emptyMessage"], "No reports found");

    let body: Value = server.get("/dashboard?search=DIRTY&lang=hi").await.json();
    assert_eq!(body["reports"].as_array().unwrap().len(), 1);
    assert_eq!(body["reports"][0]["statusLabel"], "सबमिट की गई");
}

#[tokio::test]
async fn test_invalid_status_filter_is_rejected() {
    let server = create_test_server(MemoryStore::new());

    let response = server.get("/dashboard?status=pending").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_incomplete_draft_is_unprocessable() {
    let store = MemoryStore::new();
    let server = create_test_server(store.clone());

    let response = server
        .post("/reports?lang=hi")
        .json(&json!({ "category": "", "title": "Only a title" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["missing"], json!(["category", "description"]));
    assert_eq!(body["error"]["message"], "कृपया सभी आवश्यक फ़ील्ड भरें।");
    assert!(store.documents("reports").is_empty());
}

#[tokio::test]
async fn test_unknown_category_uses_error_envelope() {
    let store = MemoryStore::new();
    let server = create_test_server(store.clone());

    let response = server
        .post("/reports")
        .json(&json!({
            "category": "weather",
            "title": "Rain",
            "description": "Roof leaks"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Bad request");
    assert!(body["error"]["details"].as_str().unwrap().contains("weather"));
    assert!(store.documents("reports").is_empty());
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let server = create_test_server(MemoryStore::new());

    let response = server
        .post("/reports")
        .bytes(Bytes::from_static(b"{\"title\": "))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Bad request");
}

#[tokio::test]
async fn test_whitespace_title_is_accepted() {
    let store = MemoryStore::new();
    let server = create_test_server(store.clone());

    let response = server
        .post("/reports")
        .json(&json!({
            "category": "other",
            "title": "   ",
            "description": " "
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(store.documents("reports").len(), 1);
}

#[tokio::test]
async fn test_details_show_contact_of_named_submitter() {
    let server = create_test_server(MemoryStore::new());

    let mut draft = station_draft();
    draft["isAnonymous"] = json!(false);
    let created: Value = server.post("/reports").json(&draft).await.json();
    let id = created["report"]["id"].as_str().unwrap();

    let details: Value = server.get(&format!("/reports/{id}")).await.json();
    assert_eq!(details["submittedBy"], "Asha Verma");
    assert_eq!(details["phone"], "9999999999");
    assert_eq!(details["email"], "asha@example.com");
}

#[tokio::test]
async fn test_store_failure_returns_draft() {
    let store = MemoryStore::new();
    store.fail_with("Missing or insufficient permissions.");
    let server = create_test_server(store.clone());

    let mut draft = station_draft();
    draft["isAnonymous"] = json!(false);
    let response = server.post("/reports").json(&draft).await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(
        body["error"]["message"],
        "❌ Failed to submit report: Missing or insufficient permissions."
    );
    assert_eq!(body["draft"]["title"], "Dirty Platform 3");
    assert_eq!(body["draft"]["name"], "Asha Verma");

    let dashboard: Value = server.get("/dashboard").await.json();
    assert_eq!(dashboard["stats"]["total"], 0);

    // Retry once the store is back
    store.recover();
    server
        .post("/reports")
        .json(&body["draft"])
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_report_details() {
    let server = create_test_server(MemoryStore::new());

    let created: Value = server.post("/reports").json(&station_draft()).await.json();
    let id = created["report"]["id"].as_str().unwrap().to_string();

    let response = server.get(&format!("/reports/{}", id)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["submittedBy"], "Anonymous");
    assert_eq!(body["locationLines"].as_array().unwrap().len(), 1);
    assert_eq!(body["locationLines"][0]["value"], "New Delhi");

    server
        .get("/reports/0")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_follows_accept_language() {
    let state = AppState::new(Storage::Memory(MemoryStore::new()), "reports", Language::En);

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/catalog")
                .header("Accept-Language", "hi-IN,hi;q=0.9,en;q=0.8")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["language"], "hi");
    assert_eq!(body["categories"][0]["value"], "cleanliness");
    assert_eq!(body["categories"][0]["label"], "स्वच्छता");
    assert_eq!(body["statusFilters"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_full_workflow_with_sqlite() {
    let store = SqliteStore::new("sqlite::memory:").await.unwrap();
    let state = AppState::new(Storage::Sqlite(store.clone()), "reports", Language::En);
    let server = TestServer::new(router(state)).unwrap();

    // 1. Health check
    server.get("/health").await.assert_status_ok();

    // 2. Submit reports of every type
    for kind in ["station", "train", "general", "appreciation"] {
        server
            .post("/reports")
            .json(&json!({
                "type": kind,
                "category": "staff",
                "title": format!("{} feedback", kind),
                "description": "Helpful ticket checker"
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    // 3. Everything was written exactly once
    assert_eq!(store.document_count("reports").await.unwrap(), 4);

    // 4. Newest first on the dashboard
    let body: Value = server.get("/dashboard").await.json();
    assert_eq!(body["reports"][0]["type"], "appreciation");
    assert_eq!(body["reports"][3]["type"], "station");
    assert_eq!(body["stats"]["submitted"], 4);
}
