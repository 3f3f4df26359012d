//! Shared helpers for end-to-end tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use wsrelay::api::HttpServer;
use wsrelay::config::{BroadcastConfig, EchoConfig};
use wsrelay::relay::{Broadcaster, ConnectionRegistry};
use wsrelay::websocket::WsServer;

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A broadcaster bound to ephemeral local ports
pub struct TestBroadcaster {
    pub http_addr: SocketAddr,
    pub ws_addr: SocketAddr,
    pub registry: ConnectionRegistry,
    shutdown: watch::Sender<bool>,
}

impl TestBroadcaster {
    pub fn notify_url(&self) -> String {
        format!("http://{}/", self.http_addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/", self.ws_addr)
    }

    /// Wait until the registry holds exactly `count` connections
    pub async fn wait_for_connections(&self, count: usize) {
        let registry = self.registry.clone();
        tokio::time::timeout(Duration::from_secs(5), async move {
            while registry.len() != count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("registry did not reach expected connection count");
    }
}

impl Drop for TestBroadcaster {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// An echo server bound to an ephemeral local port
pub struct TestEcho {
    pub addr: SocketAddr,
    shutdown: watch::Sender<bool>,
}

impl TestEcho {
    pub fn ws_url(&self) -> String {
        format!("ws://{}/", self.addr)
    }
}

impl Drop for TestEcho {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

pub async fn start_broadcaster() -> TestBroadcaster {
    let config = BroadcastConfig {
        host: "127.0.0.1".to_string(),
        http_port: 0,
        ws_port: 0,
    };
    let registry = ConnectionRegistry::new();
    let (shutdown, shutdown_rx) = watch::channel(false);

    let http_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let ws_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let http_addr = http_listener.local_addr().unwrap();
    let ws_addr = ws_listener.local_addr().unwrap();

    let http_server = HttpServer::new(config.clone(), Broadcaster::new(registry.clone()));
    let ws_server = WsServer::broadcast(&config, registry.clone());

    let http_shutdown = shutdown_rx.clone();
    tokio::spawn(async move { http_server.serve(http_listener, http_shutdown).await });
    tokio::spawn(async move { ws_server.serve(ws_listener, shutdown_rx).await });

    TestBroadcaster {
        http_addr,
        ws_addr,
        registry,
        shutdown,
    }
}

pub async fn start_echo() -> TestEcho {
    let (shutdown, shutdown_rx) = watch::channel(false);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = WsServer::echo(&EchoConfig::default());
    tokio::spawn(async move { server.serve(listener, shutdown_rx).await });

    TestEcho { addr, shutdown }
}

pub async fn connect(url: &str) -> Client {
    let (client, _) = connect_async(url).await.expect("websocket connect failed");
    client
}

/// Next data message as text, skipping control frames
pub async fn recv_text(client: &mut Client) -> String {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for message")
            .expect("stream ended")
            .expect("websocket error");

        if msg.is_ping() || msg.is_pong() {
            continue;
        }

        assert!(msg.is_text(), "expected text message, got {:?}", msg);
        return msg.to_text().unwrap().to_string();
    }
}

/// Assert nothing arrives within a short window
pub async fn assert_silent(client: &mut Client) {
    let result = tokio::time::timeout(Duration::from_millis(200), client.next()).await;
    assert!(result.is_err(), "unexpected message: {:?}", result);
}

pub async fn post_json(url: &str, body: serde_json::Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("http request failed")
}
