//! End-to-end tests: `EventClient` against a real WebSocket server.

use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use pulse_core::NoticeKind;
use pulse_notify::NotificationCenter;
use pulse_realtime::{EventClient, RealtimeConfig};

fn config_for(addr: std::net::SocketAddr) -> RealtimeConfig {
    RealtimeConfig {
        endpoint: format!("ws://{addr}/ws"),
        reconnect_delay: Duration::from_millis(50),
        max_reconnect_attempts: 5,
    }
}

#[tokio::test]
async fn delivers_frames_over_a_real_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::text(
            r#"{"type":"product.created","payload":{"name":"Anvil"}}"#,
        ))
        .await
        .unwrap();
        // Hold the connection open until the client goes away.
        while ws.next().await.is_some() {}
    });

    let center = NotificationCenter::new();
    let client = EventClient::new(config_for(addr), Arc::new(center.clone()));

    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let _sub = client.on("product.created", move |payload| {
        let _ = seen_tx.send(payload);
    });
    client.connect();

    let payload = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
        .await
        .expect("no event within deadline")
        .expect("channel closed");
    assert_eq!(payload["name"], "Anvil");

    // Connection notice plus the mapped product notice.
    let messages: Vec<_> = center
        .notices()
        .into_iter()
        .map(|n| (n.kind, n.message))
        .collect();
    assert!(messages.contains(&(NoticeKind::Info, "Real-time updates enabled".into())));
    assert!(messages.contains(&(NoticeKind::Success, "New product: Anvil".into())));

    client.disconnect();
    server.abort();
}

#[tokio::test]
async fn reconnects_after_the_server_drops_the_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        // First connection: accept, then drop without a close handshake.
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        drop(ws);

        // Second connection (the automatic reconnect): deliver an event.
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        ws.send(Message::text(
            r#"{"type":"stock.updated","payload":{"name":"Anvil","quantity":2}}"#,
        ))
        .await
        .unwrap();
        while ws.next().await.is_some() {}
    });

    let center = NotificationCenter::new();
    let client = EventClient::new(config_for(addr), Arc::new(center.clone()));

    let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
    let _sub = client.on("stock.updated", move |payload| {
        let _ = seen_tx.send(payload);
    });
    client.connect();

    // Only the reconnected socket carries the event.
    let payload = tokio::time::timeout(Duration::from_secs(5), seen_rx.recv())
        .await
        .expect("no event after reconnect")
        .expect("channel closed");
    assert_eq!(payload["quantity"], 2);
    assert!(client.snapshot().connected);

    client.disconnect();
    server.abort();
}
