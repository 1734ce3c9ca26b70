//! Handler tests for Items domain
//!
//! These tests drive the items router over the in-memory store:
//! - Request deserialization and validation
//! - Response serialization and status codes
//! - The soft-delete / restore lifecycle over HTTP

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_items::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ItemService::new(InMemoryItemRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, body: Value) -> Item {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

async fn list(app: &Router, uri: &str) -> ItemPage {
    let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

fn ids(page: &ItemPage) -> Vec<i64> {
    page.items.iter().map(|item| item.id).collect()
}

#[tokio::test]
async fn test_create_item_returns_201_with_defaults() {
    let app = app();

    let item = create(&app, json!({ "name": "desk lamp", "price": 24.5 })).await;

    assert_eq!(item.id, 1);
    assert_eq!(item.name, "desk lamp");
    assert_eq!(item.description, None);
    assert_eq!(item.price, 24.5);
    assert!(item.in_stock);
    assert!(!item.is_deleted);
}

#[tokio::test]
async fn test_create_then_get_round_trips_all_fields() {
    let app = app();

    let created = create(
        &app,
        json!({
            "name": "kettle",
            "description": "1.7l, steel",
            "price": 39.0,
            "in_stock": false
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched: Item = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched.description.as_deref(), Some("1.7l, steel"));
    assert!(!fetched.in_stock);
}

#[tokio::test]
async fn test_create_item_validates_input() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "", "price": 1.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "mug", "price": -2.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn test_create_item_rejects_wrong_types() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "mug", "price": "cheap" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_get_item_not_found_and_invalid_id() {
    let app = app();

    let response = app.clone().oneshot(empty_request("GET", "/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Item 42 not found");

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_update_item_replaces_fields() {
    let app = app();
    let created = create(
        &app,
        json!({ "name": "chair", "description": "oak", "price": 80.0 }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "stool", "price": 45.0, "in_stock": false }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Item = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "stool");
    assert_eq!(updated.description, None);
    assert_eq!(updated.price, 45.0);
    assert!(!updated.in_stock);
    assert!(!updated.is_deleted);
}

#[tokio::test]
async fn test_update_unknown_item_returns_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/7",
            json!({ "name": "stool", "price": 45.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_and_restore_lifecycle() {
    let app = app();
    let created = create(
        &app,
        json!({ "name": "vase", "description": "blue", "price": 12.0 }),
    )
    .await;
    let path = format!("/{}", created.id);

    // Soft-delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &path))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "message": "Item soft-deleted", "id": created.id }));

    // Hidden from reads and updates
    let response = app.clone().oneshot(empty_request("GET", &path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &path, json!({ "name": "urn", "price": 1.0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting twice is an error
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &path))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Listed only in the deleted partition
    assert!(list(&app, "/").await.items.is_empty());
    assert_eq!(ids(&list(&app, "/deleted").await), vec![created.id]);

    // Restore brings back identical fields
    let response = app
        .clone()
        .oneshot(empty_request("PUT", &format!("{}/restore", path)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let restored: Item = json_body(response.into_body()).await;
    assert_eq!(restored, created);

    assert_eq!(ids(&list(&app, "/").await), vec![created.id]);
    assert!(list(&app, "/deleted").await.items.is_empty());
}

#[tokio::test]
async fn test_restore_active_item_returns_400() {
    let app = app();
    let created = create(&app, json!({ "name": "rug", "price": 60.0 })).await;

    let response = app
        .clone()
        .oneshot(empty_request("PUT", &format!("/{}/restore", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_STATE");
    assert_eq!(body["message"], format!("Item {} is not deleted", created.id));

    let response = app
        .oneshot(empty_request("PUT", "/999/restore"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_price_range() {
    let app = app();
    create(&app, json!({ "name": "a", "price": 1.0 })).await;
    let middle = create(&app, json!({ "name": "b", "price": 2.0 })).await;
    create(&app, json!({ "name": "c", "price": 3.0 })).await;

    let page = list(&app, "/?min_price=1.5&max_price=2.5").await;

    assert_eq!(page.total, 1);
    assert_eq!(ids(&page), vec![middle.id]);
}

#[tokio::test]
async fn test_list_search_and_stock_filter() {
    let app = app();
    let lamp = create(
        &app,
        json!({ "name": "desk lamp", "price": 20.0, "in_stock": true }),
    )
    .await;
    create(
        &app,
        json!({ "name": "floor light", "description": "LAMP shade", "price": 40.0, "in_stock": false }),
    )
    .await;
    create(&app, json!({ "name": "table", "price": 90.0 })).await;

    let page = list(&app, "/?search=lamp").await;
    assert_eq!(page.total, 2);

    let page = list(&app, "/?search=lamp&in_stock=true").await;
    assert_eq!(ids(&page), vec![lamp.id]);
}

#[tokio::test]
async fn test_list_sort_last_key_is_primary() {
    let app = app();
    let a = create(&app, json!({ "name": "b", "price": 1.0 })).await;
    let b = create(&app, json!({ "name": "a", "price": 1.0 })).await;
    let c = create(&app, json!({ "name": "c", "price": 0.5 })).await;

    let page = list(&app, "/?sort_by=name,price&sort_order=asc,asc").await;
    assert_eq!(ids(&page), vec![c.id, b.id, a.id]);

    let page = list(&app, "/?sort_by=price&sort_order=desc").await;
    assert_eq!(ids(&page), vec![a.id, b.id, c.id]);
}

#[tokio::test]
async fn test_list_ignores_unknown_sort_field() {
    let app = app();
    let first = create(&app, json!({ "name": "z", "price": 5.0 })).await;
    let second = create(&app, json!({ "name": "y", "price": 4.0 })).await;

    let page = list(&app, "/?sort_by=bogus").await;

    assert_eq!(ids(&page), vec![first.id, second.id]);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = app();
    for i in 0..5 {
        create(&app, json!({ "name": format!("item {}", i), "price": 1.0 })).await;
    }

    let page = list(&app, "/?skip=1&limit=2").await;
    assert_eq!(page.total, 5);
    assert_eq!(page.skip, 1);
    assert_eq!(page.limit, 2);
    assert_eq!(ids(&page), vec![2, 3]);

    let page = list(&app, "/?skip=5").await;
    assert_eq!(page.total, 5);
    assert!(page.items.is_empty());

    let page = list(&app, "/?skip=18446744073709551615").await;
    assert_eq!(page.total, 5);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_list_caps_limit_above_maximum() {
    let app = app();
    for i in 0..3 {
        create(&app, json!({ "name": format!("item {}", i), "price": 1.0 })).await;
    }

    let page = list(&app, "/?limit=500").await;
    assert_eq!(page.limit, 100);
    assert_eq!(page.items.len(), 3);

    let page = list(&app, "/deleted?limit=101").await;
    assert_eq!(page.limit, 100);
}

#[tokio::test]
async fn test_list_rejects_out_of_range_params() {
    let app = app();

    for uri in [
        "/?limit=0",
        "/?min_price=-1",
        "/?min_price=NaN",
        "/?max_price=inf",
        "/?min_price=1&max_price=-infinity",
        "/deleted?limit=0",
    ] {
        let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "VALIDATION_ERROR", "uri: {}", uri);
    }

    let response = app
        .oneshot(empty_request("GET", "/?limit=many"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_QUERY");
}
