use axum::{
    extract::{ws::WebSocketUpgrade, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::ErrorResponse;
use crate::state::AppState;
use crate::ws::{Connection, Hub};

/// Query parameters for a WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    #[serde(rename = "docID")]
    pub doc_id: Option<String>,
}

/// WebSocket handler
///
/// The document id is checked before the upgrade is accepted, so a request
/// without one is answered with 400 and never allocates a connection.
pub async fn websocket_handler(
    State(state): State<AppState>,
    Query(query): Query<ConnectQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let document_id = match Hub::admit(query.doc_id.as_deref()) {
        Ok(document_id) => document_id,
        Err(e) => {
            warn!("Rejected WebSocket connection: {}", e);
            return ErrorResponse::reply(StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    info!("New WebSocket connection attempt for document {}", document_id);
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| async move {
        let (connection, reader) = Connection::from_socket(document_id, socket);
        hub.serve(connection, reader).await;
    })
}
