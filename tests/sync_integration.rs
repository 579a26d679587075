//! End-to-end tests over real WebSocket connections.

mod common;

use common::*;
use serde_json::json;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as WsError;

#[tokio::test]
async fn notes_scenario() {
    let (base, state) = start_server(&[]).await;
    assert!(state.store.create("notes"));

    let (mut a, init_a) = connect(&base, "notes").await;
    assert_eq!(init_a, json!({"type": "init", "content": ""}));
    let (mut b, init_b) = connect(&base, "notes").await;
    assert_eq!(init_b, json!({"type": "init", "content": ""}));
    assert!(eventually(|| state.hub.member_count("notes") == 2).await);

    send_json(&mut a, json!({"content": "v1"})).await;

    assert_eq!(next_json(&mut b).await, Some(json!({"type": "update", "content": "v1"})));
    assert_quiet(&mut a).await;
    assert_eq!(state.store.get("notes"), "v1");
}

#[tokio::test]
async fn init_reflects_existing_content() {
    let (base, state) = start_server(&[]).await;
    state.store.update("greeting", "hello");

    let (_client, init) = connect(&base, "greeting").await;
    assert_eq!(init, json!({"type": "init", "content": "hello"}));
}

#[tokio::test]
async fn missing_document_id_is_rejected_before_upgrade() {
    let (base, state) = start_server(&[]).await;

    for url in [base.clone(), format!("{base}?docID=")] {
        match connect_async(url.as_str()).await {
            Err(WsError::Http(response)) => assert_eq!(response.status(), 400),
            Err(other) => panic!("unexpected error for {url}: {other}"),
            Ok(_) => panic!("{url} should have been rejected"),
        }
    }
    assert_eq!(state.hub.connection_count(), 0);
}

#[tokio::test]
async fn room_is_dropped_when_last_client_leaves() {
    let (base, state) = start_server(&[]).await;

    let (mut a, _) = connect(&base, "doc-X").await;
    assert!(eventually(|| state.hub.has_room("doc-X")).await);

    a.close(None).await.unwrap();
    assert!(eventually(|| !state.hub.has_room("doc-X")).await);
    assert_eq!(state.hub.room_count(), 0);

    let (mut b, init) = connect(&base, "doc-X").await;
    assert_eq!(init, json!({"type": "init", "content": ""}));
    assert_quiet(&mut b).await;
}

#[tokio::test]
async fn malformed_message_disconnects_sender_only() {
    let (base, state) = start_server(&["notes"]).await;

    let (mut bad, _) = connect(&base, "notes").await;
    let (mut good, _) = connect(&base, "notes").await;
    let (mut watcher, _) = connect(&base, "notes").await;
    assert!(eventually(|| state.hub.member_count("notes") == 3).await);

    send_json(&mut bad, json!(["not", "an", "edit"])).await;
    assert!(eventually(|| state.hub.member_count("notes") == 2).await);
    assert_eq!(next_json(&mut bad).await, None);

    send_json(&mut good, json!({"content": "fine", "cursor": 4})).await;
    assert_eq!(next_json(&mut watcher).await, Some(json!({"type": "update", "content": "fine"})));
}

#[tokio::test]
async fn edits_stay_within_their_document() {
    let (base, state) = start_server(&[]).await;

    let (mut one, _) = connect(&base, "doc-1").await;
    let (mut two, _) = connect(&base, "doc-2").await;
    assert!(eventually(|| state.hub.room_count() == 2).await);

    send_json(&mut one, json!({"content": "for doc-1"})).await;
    assert!(eventually(|| state.store.get("doc-1") == "for doc-1").await);
    assert_quiet(&mut two).await;
    assert_eq!(state.store.get("doc-2"), "");
}

#[tokio::test]
async fn realtime_edits_show_up_in_listing() {
    let (base, state) = start_server(&["doc-1"]).await;

    let (mut client, _) = connect(&base, "fresh").await;
    // Connecting alone does not create the document.
    assert_eq!(state.store.list(), vec!["doc-1"]);

    send_json(&mut client, json!({"content": "first words"})).await;
    assert!(eventually(|| state.store.contains("fresh")).await);
    assert_eq!(state.store.list(), vec!["doc-1", "fresh"]);
    assert_eq!(state.store.get("fresh"), "first words");
}
