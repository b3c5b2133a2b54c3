//! Handler tests for the Users domain
//!
//! Drive the domain router directly (no `/api` prefix, no app middleware)
//! against a migrated in-memory SQLite database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(db: &TestDatabase) -> Router {
    handlers::router(UserService::new(SqlUserRepository::new(db.connection())))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn alice() -> Value {
    json!({
        "name": "Alice",
        "age": 30,
        "city": "Pune",
        "state": "MH",
        "pincode": "411001"
    })
}

#[tokio::test]
async fn test_user_lifecycle_scenario() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    // Create
    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", alice()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();
    let created: User = json_body(response.into_body()).await;
    assert_eq!(location, format!("/users/{}", created.id));
    assert_eq!(created.name, "Alice");

    // Read
    let response = app
        .clone()
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: User = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    // Replace
    let replacement = json!({
        "name": "Alicia",
        "age": 31,
        "city": "Pune",
        "state": "MH",
        "pincode": "411002"
    });
    let response = app
        .clone()
        .oneshot(json_request("PUT", &location, replacement))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    let fetched: User = json_body(response.into_body()).await;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "Alicia");
    assert_eq!(fetched.age, 31);
    assert_eq!(fetched.pincode, "411002");

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request("GET", &location))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_created_users() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let response = app.clone().oneshot(empty_request("GET", "/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<User> = json_body(response.into_body()).await;
    assert!(users.is_empty());

    for name in ["Alice", "Bob"] {
        let mut body = alice();
        body["name"] = json!(name);
        let response = app
            .clone()
            .oneshot(json_request("POST", "/users", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(empty_request("GET", "/users")).await.unwrap();
    let users: Vec<User> = json_body(response.into_body()).await;
    let mut names: Vec<_> = users.into_iter().map(|u| u.name).collect();
    names.sort();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn test_create_reports_every_violation() {
    let db = TestDatabase::new().await;

    let mut body = alice();
    body["name"] = json!("");
    body["age"] = json!(200);

    let response = app(&db)
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert!(error["details"]["name"].is_array());
    assert!(error["details"]["age"].is_array());
    assert!(error["details"].get("city").is_none());
}

#[tokio::test]
async fn test_create_with_nul_in_pincode_is_validation_error() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let mut body = alice();
    body["pincode"] = json!("12\u{0}345");

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "VALIDATION_ERROR");
    assert_eq!(error["details"]["pincode"][0]["code"], "control_character");

    let response = app.oneshot(empty_request("GET", "/users")).await.unwrap();
    let users: Vec<User> = json_body(response.into_body()).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_storage_fault_is_database_error() {
    let db = TestDatabase::new().await;
    let app = app(&db);
    db.connection().close().await.unwrap();

    let response = app.oneshot(empty_request("GET", "/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["code"], 2003);
    assert_eq!(error["error"], "DATABASE_ERROR");
    assert_eq!(error["message"], "Database error occurred");
}

#[tokio::test]
async fn test_create_with_missing_fields_is_bad_request() {
    let db = TestDatabase::new().await;

    let response = app(&db)
        .oneshot(json_request("POST", "/users", json!({ "name": "Alice" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    for field in ["age", "city", "state", "pincode"] {
        assert_eq!(error["details"][field][0]["code"], "required", "field {}", field);
    }
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let db = TestDatabase::new().await;
    let client_id = Uuid::now_v7();

    let mut body = alice();
    body["id"] = json!(client_id);

    let response = app(&db)
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: User = json_body(response.into_body()).await;
    assert_ne!(created.id, client_id);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let db = TestDatabase::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = json_body(response.into_body()).await;
    assert_eq!(error["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_non_json_content_type_is_unsupported() {
    let db = TestDatabase::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(alice().to_string()))
        .unwrap();

    let response = app(&db).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request_not_not_found() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    for request in [
        empty_request("GET", "/users/not-a-uuid"),
        empty_request("DELETE", "/users/123"),
        json_request("PUT", "/users/xyz", alice()),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["error"], "INVALID_UUID");
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let db = TestDatabase::new().await;
    let app = app(&db);
    let uri = format!("/users/{}", Uuid::now_v7());

    for request in [
        empty_request("GET", &uri),
        json_request("PUT", &uri, alice()),
        empty_request("DELETE", &uri),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["error"], "NOT_FOUND");
        assert!(error["message"].as_str().unwrap().contains(&uri["/users/".len()..]));
    }
}

#[tokio::test]
async fn test_update_with_invalid_payload_is_bad_request() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", alice()))
        .await
        .unwrap();
    let created: User = json_body(response.into_body()).await;

    let mut body = alice();
    body["pincode"] = json!("12");
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/users/{}", created.id), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Stored record untouched
    let response = app
        .oneshot(empty_request("GET", &format!("/users/{}", created.id)))
        .await
        .unwrap();
    let fetched: User = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_router_works_with_in_memory_repository() {
    let app = handlers::router(UserService::new(InMemoryUserRepository::new()));

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", alice()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: User = json_body(response.into_body()).await;

    let response = app
        .oneshot(empty_request("GET", &format!("/users/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
