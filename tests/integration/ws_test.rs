//! Integration tests for realtime post broadcasts.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use serde_json::Value;
use tokio::sync::mpsc::Receiver;

use helpers::{Part, TestApp};

async fn next_frame(rx: &mut Receiver<String>) -> Value {
    let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a frame")
        .expect("connection closed");
    serde_json::from_str(&frame).unwrap()
}

#[tokio::test]
async fn test_post_changes_are_broadcast() {
    let app = TestApp::new().await;
    let author = app.register("author@example.com").await;
    let watcher = app.register("watcher@example.com").await;

    let connections = &app.state.realtime.connections;
    let (handle, mut rx) = connections.register(watcher.id, "watcher@example.com".to_string());
    let conn_id = handle.id;
    drop(handle);

    let hello = next_frame(&mut rx).await;
    assert_eq!(hello["type"], "connected");
    assert_eq!(hello["user_id"], watcher.id.to_string());

    let post = app.create_post(&author.token, "Broadcast me").await;
    let id = post["id"].as_str().unwrap();

    let created = next_frame(&mut rx).await;
    assert_eq!(created["type"], "posts");
    assert_eq!(created["action"], "created");
    assert_eq!(created["post"]["title"], "Broadcast me");
    assert_eq!(created["post"]["creator"]["name"], "Max");

    let response = app
        .multipart(
            "PUT",
            &format!("/feed/post/{id}"),
            &[
                Part::Text("title", "Broadcast again"),
                Part::Text("content", "Some interesting content"),
                Part::png("image"),
            ],
            Some(&author.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let updated = next_frame(&mut rx).await;
    assert_eq!(updated["action"], "updated");
    assert_eq!(updated["post"]["title"], "Broadcast again");

    let response = app
        .request("DELETE", &format!("/feed/post/{id}"), None, Some(&author.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let deleted = next_frame(&mut rx).await;
    assert_eq!(deleted["action"], "deleted");
    assert_eq!(deleted["post"], id);

    connections.unregister(&conn_id);
    assert_eq!(connections.connection_count(), 0);
}

#[tokio::test]
async fn test_failed_mutation_is_not_broadcast() {
    let app = TestApp::new().await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;
    let post = app.create_post(&owner.token, "Owner post").await;

    let (_handle, mut rx) = app
        .state
        .realtime
        .connections
        .register(owner.id, "owner@example.com".to_string());
    next_frame(&mut rx).await;

    let id = post["id"].as_str().unwrap();
    let response = app
        .request("DELETE", &format!("/feed/post/{id}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_ping_is_answered() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;

    let connections = &app.state.realtime.connections;
    let (handle, mut rx) = connections.register(user.id, "max@example.com".to_string());
    next_frame(&mut rx).await;

    connections.handle_inbound(&handle.id, r#"{"type":"ping"}"#);
    assert_eq!(next_frame(&mut rx).await["type"], "pong");

    connections.handle_inbound(&handle.id, "garbage");
    let error = next_frame(&mut rx).await;
    assert_eq!(error["type"], "error");
    assert_eq!(error["code"], "INVALID_MESSAGE");
}

#[tokio::test]
async fn test_ws_requires_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/ws", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/ws?token=garbage", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_connections() {
    let app = TestApp::new().await;
    let user = app.register("max@example.com").await;
    let connections = &app.state.realtime.connections;
    let (_first, _first_rx) = connections.register(user.id, "max@example.com".to_string());
    let (_second, _second_rx) = connections.register(user.id, "max@example.com".to_string());

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["database"], "memory");
    assert_eq!(response.data()["ws_connections"], 2);
    assert_eq!(response.data()["ws_users"], 1);
}
