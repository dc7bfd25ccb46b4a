//! Integration tests for the WebSocket transport.
//!
//! These spin up a real listener and a `tokio-tungstenite` client to
//! verify that text frames actually flow both ways over the network.

use futures_util::{SinkExt, StreamExt};
use noughts_transport::{Connection, Listener, WebSocketListener};
use tokio_tungstenite::tungstenite::Message;

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn connect_client(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    ws
}

/// Binds on a random port, accepts one connection in the background, and
/// returns the server-side connection plus the client socket.
async fn accept_one() -> (noughts_transport::WebSocketConnection, ClientWs) {
    let mut listener = WebSocketListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().unwrap().to_string();

    let server_handle =
        tokio::spawn(async move { listener.accept().await.expect("should accept") });

    let client_ws = connect_client(&addr).await;
    let server_conn = server_handle.await.expect("task should complete");
    (server_conn, client_ws)
}

#[tokio::test]
async fn test_send_and_receive_text() {
    let (server_conn, mut client_ws) = accept_one().await;

    assert!(server_conn.id().into_inner() > 0);

    // Server → client.
    server_conn.send("hello from server").await.unwrap();
    let msg = client_ws.next().await.unwrap().unwrap();
    assert_eq!(msg.into_text().unwrap().as_str(), "hello from server");

    // Client → server.
    client_ws
        .send(Message::Text("hello from client".into()))
        .await
        .unwrap();
    let received = server_conn.recv().await.unwrap().unwrap();
    assert_eq!(received, "hello from client");

    server_conn.close().await.unwrap();
}

#[tokio::test]
async fn test_binary_frames_with_utf8_are_accepted() {
    let (server_conn, mut client_ws) = accept_one().await;

    client_ws
        .send(Message::Binary(b"{\"event\":\"ping\"}".to_vec().into()))
        .await
        .unwrap();

    let received = server_conn.recv().await.unwrap().unwrap();
    assert_eq!(received, "{\"event\":\"ping\"}");
}

#[tokio::test]
async fn test_recv_returns_none_on_client_close() {
    let (server_conn, mut client_ws) = accept_one().await;

    client_ws.send(Message::Close(None)).await.unwrap();

    let result = server_conn.recv().await.expect("recv should not error");
    assert!(result.is_none(), "should return None on client close");
}

#[tokio::test]
async fn test_connection_ids_are_unique() {
    let (a, _ws_a) = accept_one().await;
    let (b, _ws_b) = accept_one().await;
    assert_ne!(a.id(), b.id());
}
