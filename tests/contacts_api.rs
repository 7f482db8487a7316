use std::sync::Arc;

use address_book::contacts::{contacts_router, ContactRepository, InMemoryContactRepository};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn router() -> (Router, Arc<InMemoryContactRepository>) {
    let repository = Arc::new(InMemoryContactRepository::default());
    (contacts_router(repository.clone()), repository)
}

fn bootstrap_request(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/contacts/bootstrap")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn listing_an_empty_store_returns_no_contacts() {
    let (router, _repository) = router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/contacts")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!([]));
}

#[tokio::test]
async fn bootstrap_endpoint_loads_inline_csv_and_reports_the_store_size() {
    let (router, repository) = router();

    let csv = "Jane Doe,1985-03-14,F,555-0101,12 Elm Street\n\
               Anna Little,1995-12-30,X,555-0105,90 Birch Court\n\
               John Smith,1979-11-02,M,555-0102,34 Oak Avenue\n";
    let response = router
        .clone()
        .oneshot(bootstrap_request(json!({ "csv": csv })))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "contacts": 2 }));

    let names: Vec<_> = repository
        .find_all()
        .expect("find_all succeeds")
        .into_iter()
        .map(|contact| contact.name)
        .collect();
    assert_eq!(names, vec!["Jane Doe", "John Smith"]);
}

#[tokio::test]
async fn bootstrap_endpoint_loads_a_server_side_export() {
    let (router, _repository) = router();

    let response = router
        .oneshot(bootstrap_request(
            json!({ "path": "tests/data/addressbook.csv" }),
        ))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "contacts": 5 }));
}

#[tokio::test]
async fn bootstrap_endpoint_rejects_ambiguous_requests() {
    let (router, _repository) = router();

    let response = router
        .oneshot(bootstrap_request(
            json!({ "path": "tests/data/addressbook.csv", "csv": "x" }),
        ))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn bootstrap_endpoint_reports_a_missing_export_file() {
    let (router, repository) = router();

    let response = router
        .oneshot(bootstrap_request(
            json!({ "path": "tests/data/does-not-exist.csv" }),
        ))
        .await
        .expect("handler responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(repository.find_all().expect("find_all succeeds").is_empty());
}

#[tokio::test]
async fn listing_reflects_bootstrapped_contacts() {
    let (router, _repository) = router();

    let response = router
        .clone()
        .oneshot(bootstrap_request(
            json!({ "path": "tests/data/addressbook.csv" }),
        ))
        .await
        .expect("handler responds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/contacts")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("handler responds");

    let contacts = read_json_body(response).await;
    let entries = contacts.as_array().expect("array payload");
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["name"], "Jane Doe");
    assert_eq!(entries[0]["gender"], "Female");
}
