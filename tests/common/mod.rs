//! Common test utilities for integration tests.
//!
//! JSON builders for the publications endpoint and helpers that wire an
//! [`App`] to a [`MockHttpClient`].

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use zews::adapters::mock::{MockHttpClient, MockResponse};
use zews::app::{App, AppMessage};
use zews::config::ViewerConfig;
use zews::route::Route;
use zews::traits::Response;

pub const TEST_BASE_URL: &str = "https://cms.test";

/// One publication record in the CMS envelope.
pub fn publication_json(id: u32, title: &str) -> Value {
    json!({
        "id": id,
        "attributes": {
            "title": title,
            "content": format!("<p>Body of {}</p><script>alert({})</script>", title, id),
            "customDate": null,
            "createdAt": "2024-03-01T09:00:00.000Z",
            "publishedAt": "2024-03-01T09:00:00.000Z",
            "updatedAt": "2024-03-01T09:50:00.000Z",
            "image": { "data": { "id": id, "attributes": { "url": format!("https://cdn.test/{}.png", id) } } },
            "tags": { "data": [
                { "id": 1, "attributes": { "name": "forex" } },
                { "id": 2, "attributes": { "name": "markets" } }
            ] }
        }
    })
}

/// A page body with `count` publications numbered after the page offset.
pub fn page_json(count: u32, page_number: u32, page_size: u32, total: u32) -> Value {
    let offset = (page_number.saturating_sub(1)) * page_size;
    let result: Vec<Value> = (1..=count)
        .map(|i| publication_json(offset + i, &format!("Publication {}", offset + i)))
        .collect();
    json!({
        "result": result,
        "pagination": { "pageNumber": page_number, "pageSize": page_size, "total": total }
    })
}

pub fn test_config() -> ViewerConfig {
    ViewerConfig::default().with_api_base_url(TEST_BASE_URL)
}

pub fn ok(body: &Value) -> MockResponse {
    MockResponse::Success(Response::json_body(body))
}

pub fn delayed(ms: u64, body: &Value) -> MockResponse {
    MockResponse::Delayed(Duration::from_millis(ms), Response::json_body(body))
}

/// App over `mock`, not yet started.
pub fn app_with(mock: &MockHttpClient, route: Route) -> App {
    App::with_http(test_config(), Arc::new(mock.clone()), route)
}

/// Receive the next fetch result and hand it to the app.
pub async fn pump_one(app: &mut App) -> AppMessage {
    let rx = app.message_rx.as_mut().expect("receiver already taken");
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for fetch result")
        .expect("channel closed");
    app.handle_message(msg.clone());
    msg
}
