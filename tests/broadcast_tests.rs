mod common;

use futures::SinkExt;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

use common::{assert_silent, connect, post_json, recv_text, start_broadcaster};

#[tokio::test]
async fn test_post_reaches_both_clients() {
    let server = start_broadcaster().await;

    let mut a = connect(&server.ws_url()).await;
    let mut b = connect(&server.ws_url()).await;
    server.wait_for_connections(2).await;

    let response = post_json(&server.notify_url(), json!({ "payload": "ping" })).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "200: Notified");

    assert_eq!(recv_text(&mut a).await, "ping");
    assert_eq!(recv_text(&mut b).await, "ping");
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn test_post_without_clients_still_ok() {
    let server = start_broadcaster().await;

    let response = post_json(&server.notify_url(), json!({ "payload": "nobody" })).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "200: Notified");
}

#[tokio::test]
async fn test_form_body_is_broadcast() {
    let server = start_broadcaster().await;

    let mut a = connect(&server.ws_url()).await;
    server.wait_for_connections(1).await;

    let response = reqwest::Client::new()
        .post(server.notify_url())
        .header("content-type", "application/x-www-form-urlencoded")
        .body("payload=from+form")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    assert_eq!(recv_text(&mut a).await, "from form");
}

#[tokio::test]
async fn test_late_client_misses_earlier_broadcast() {
    let server = start_broadcaster().await;

    let mut early = connect(&server.ws_url()).await;
    server.wait_for_connections(1).await;

    post_json(&server.notify_url(), json!({ "payload": "first" })).await;
    assert_eq!(recv_text(&mut early).await, "first");

    let mut late = connect(&server.ws_url()).await;
    server.wait_for_connections(2).await;
    assert_silent(&mut late).await;

    post_json(&server.notify_url(), json!({ "payload": "second" })).await;
    assert_eq!(recv_text(&mut early).await, "second");
    assert_eq!(recv_text(&mut late).await, "second");
}

#[tokio::test]
async fn test_disconnected_client_is_dropped_from_broadcast() {
    let server = start_broadcaster().await;

    let mut stays = connect(&server.ws_url()).await;
    let mut leaves = connect(&server.ws_url()).await;
    server.wait_for_connections(2).await;

    leaves.close(None).await.unwrap();
    server.wait_for_connections(1).await;

    let response = post_json(&server.notify_url(), json!({ "payload": "after" })).await;
    assert_eq!(response.status(), 200);
    assert_eq!(recv_text(&mut stays).await, "after");
}

#[tokio::test]
async fn test_client_messages_are_ignored() {
    let server = start_broadcaster().await;

    let mut a = connect(&server.ws_url()).await;
    let mut b = connect(&server.ws_url()).await;
    server.wait_for_connections(2).await;

    a.send(Message::text("chatter")).await.unwrap();
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;
    assert_eq!(server.registry.len(), 2);
}

#[tokio::test]
async fn test_many_clients_each_receive_once() {
    let server = start_broadcaster().await;

    let mut clients = Vec::new();
    for _ in 0..8 {
        clients.push(connect(&server.ws_url()).await);
    }
    server.wait_for_connections(8).await;

    post_json(&server.notify_url(), json!({ "payload": { "n": 1 } })).await;

    for client in clients.iter_mut() {
        assert_eq!(recv_text(client).await, r#"{"n":1}"#);
    }
    for client in clients.iter_mut() {
        assert_silent(client).await;
    }
}

#[tokio::test]
async fn test_missing_payload_is_rejected_and_not_broadcast() {
    let server = start_broadcaster().await;

    let mut a = connect(&server.ws_url()).await;
    server.wait_for_connections(1).await;

    let response = post_json(&server.notify_url(), json!({ "data": "ping" })).await;
    assert_eq!(response.status(), 400);

    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_any_path_accepts_subscribers() {
    let server = start_broadcaster().await;

    let mut a = connect(&format!("ws://{}/some/path", server.ws_addr)).await;
    server.wait_for_connections(1).await;

    post_json(&server.notify_url(), json!({ "payload": "anywhere" })).await;
    assert_eq!(recv_text(&mut a).await, "anywhere");
}
