#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use colab_sync::config::Config;
use colab_sync::routes::create_app;
use colab_sync::services::DocumentStore;
use colab_sync::state::AppState;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const WAIT: Duration = Duration::from_secs(2);
pub const QUIET: Duration = Duration::from_millis(500);

pub fn test_app(seed: &[&str]) -> (Router, AppState) {
    let store = Arc::new(DocumentStore::with_documents(seed.iter().copied()));
    let state = AppState::new(store, "colab-sync-test");
    let app = create_app(state.clone(), &Config::default());
    (app, state)
}

/// Serve the app on a free local port and return its `ws://` base URL.
pub async fn start_server(seed: &[&str]) -> (String, AppState) {
    let (app, state) = test_app(seed);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("ws://{addr}/ws"), state)
}

/// Connect to `doc_id` and return the client along with its init frame.
pub async fn connect(base: &str, doc_id: &str) -> (Client, Value) {
    let (mut client, _) = connect_async(format!("{base}?docID={doc_id}")).await.unwrap();
    let init = next_json(&mut client).await.expect("init frame");
    (client, init)
}

/// Next text frame as JSON, or `None` if nothing arrives within `WAIT`.
pub async fn next_json(client: &mut Client) -> Option<Value> {
    loop {
        let frame = timeout(WAIT, client.next()).await.ok()??.ok()?;
        if let Message::Text(_) = frame {
            return Some(serde_json::from_str(frame.to_text().unwrap()).unwrap());
        }
    }
}

pub async fn send_json(client: &mut Client, value: Value) {
    client.send(Message::text(value.to_string())).await.unwrap();
}

/// Assert that no data frame arrives within `QUIET`.
pub async fn assert_quiet(client: &mut Client) {
    match timeout(QUIET, client.next()).await {
        Err(_) => {}
        Ok(frame) => panic!("expected silence, got {frame:?}"),
    }
}

/// Poll `check` until it holds or `WAIT` elapses.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + WAIT;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
