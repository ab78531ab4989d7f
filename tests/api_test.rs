use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use roster::api::router;
use roster::db::{MemoryStorage, SqliteStorage, Storage};
use roster::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn memory_app() -> Router {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    router(AppState::new(storage))
}

async fn sqlite_app() -> Router {
    let storage = SqliteStorage::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create database");
    router(AppState::new(Arc::new(storage)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn ann() -> Value {
    json!({
        "first_name": "Ann",
        "last_name": "Lee",
        "age": 20,
        "city": "Austin"
    })
}

fn math() -> Value {
    json!({
        "class_name": "Math",
        "description": "...",
        "start_date": "2024-01-01",
        "end_date": "2024-06-01",
        "number_of_hours": 40
    })
}

async fn enrollment_scenario(app: Router) {
    let (status, body) = send(&app, "POST", "/students", Some(ann())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"student_id": 1, "message": "Student added."}));

    let (status, body) = send(&app, "POST", "/classes", Some(math())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"class_id": 1, "message": "Class added."}));

    let (status, body) = send(&app, "POST", "/classes/1/register?student_id=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student registered to class."}));

    let (status, body) = send(&app, "GET", "/classes/1/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"students": [{"id": 1, "first_name": "Ann", "last_name": "Lee", "city": "Austin"}]})
    );
}

#[tokio::test]
async fn test_enrollment_scenario_in_memory() {
    enrollment_scenario(memory_app()).await;
}

#[tokio::test]
async fn test_enrollment_scenario_sqlite() {
    enrollment_scenario(sqlite_app().await).await;
}

#[tokio::test]
async fn test_health() {
    let (status, _) = send(&memory_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&sqlite_app().await, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_student_update_and_delete() {
    let app = memory_app();
    send(&app, "POST", "/students", Some(ann())).await;

    let replacement = json!({
        "first_name": "Ann",
        "last_name": "Lee",
        "middle_name": "Marie",
        "age": 21,
        "city": "Dallas"
    });
    let (status, body) = send(&app, "PUT", "/students/1", Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student updated."}));

    let (status, body) = send(&app, "GET", "/students/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["middle_name"], "Marie");
    assert_eq!(body["age"], 21);
    assert_eq!(body["city"], "Dallas");

    let (status, body) = send(&app, "DELETE", "/students/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted."}));

    let (status, body) = send(&app, "DELETE", "/students/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found.");
}

#[tokio::test]
async fn test_unknown_student_returns_404() {
    let app = memory_app();

    let (status, body) = send(&app, "PUT", "/students/42", Some(ann())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found.");

    let (status, _) = send(&app, "GET", "/students/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/students", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_class_update_and_delete() {
    let app = memory_app();
    send(&app, "POST", "/classes", Some(math())).await;

    let mut art = math();
    art["class_name"] = json!("Art");
    let (status, body) = send(&app, "PUT", "/classes/1", Some(art)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Class updated."}));

    let (_, body) = send(&app, "GET", "/classes", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["class_name"], "Art");

    let (status, body) = send(&app, "DELETE", "/classes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Class deleted."}));

    let (status, body) = send(&app, "PUT", "/classes/1", Some(math())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Class not found.");

    let (status, _) = send(&app, "DELETE", "/classes/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_requires_existing_class_and_student() {
    let app = memory_app();
    send(&app, "POST", "/students", Some(ann())).await;
    send(&app, "POST", "/classes", Some(math())).await;

    let (status, body) = send(&app, "POST", "/classes/2/register?student_id=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Class or Student not found.");

    let (status, _) = send(&app, "POST", "/classes/1/register?student_id=2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/classes/1/students", None).await;
    assert_eq!(body, json!({"students": []}));
}

#[tokio::test]
async fn test_roster_keeps_duplicates_and_skips_deleted_students() {
    let app = memory_app();
    send(&app, "POST", "/students", Some(ann())).await;
    let mut bob = ann();
    bob["first_name"] = json!("Bob");
    send(&app, "POST", "/students", Some(bob)).await;
    send(&app, "POST", "/classes", Some(math())).await;

    send(&app, "POST", "/classes/1/register?student_id=1", None).await;
    send(&app, "POST", "/classes/1/register?student_id=2", None).await;
    send(&app, "POST", "/classes/1/register?student_id=1", None).await;

    let (_, body) = send(&app, "GET", "/classes/1/students", None).await;
    let ids: Vec<i64> = body["students"]
        .as_array()
        .expect("students array")
        .iter()
        .filter_map(|s| s["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2, 1]);

    send(&app, "DELETE", "/students/1", None).await;
    let (status, body) = send(&app, "GET", "/classes/1/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["students"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["students"][0]["first_name"], "Bob");
}

#[tokio::test]
async fn test_roster_of_unknown_class_returns_404() {
    let (status, body) = send(&memory_app(), "GET", "/classes/9/students", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Class not found.");
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let app = memory_app();
    let incomplete = json!({"first_name": "Ann", "last_name": "Lee", "city": "Austin"});

    let (status, _) = send(&app, "POST", "/students", Some(incomplete)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, "GET", "/students", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_student_ids_keep_increasing_after_delete() {
    let app = sqlite_app().await;
    send(&app, "POST", "/students", Some(ann())).await;
    send(&app, "POST", "/students", Some(ann())).await;
    send(&app, "DELETE", "/students/2", None).await;

    let (_, body) = send(&app, "POST", "/students", Some(ann())).await;
    assert_eq!(body["student_id"], 3);
}
