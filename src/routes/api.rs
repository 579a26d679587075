use crate::{
    handlers::{create_document, delete_document, diagnostics, get_document, health_check, list_documents, login, ready_check},
    state::AppState,
    websocket::websocket_handler,
};
use axum::{routing::{get, post}, Router};

/// Create API routes
pub fn create_api_routes(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/login", post(login))
        .route("/documents", get(list_documents).post(create_document))
        .route("/documents/:doc_id", get(get_document).delete(delete_document))
        .route("/ws", get(websocket_handler))
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/diagnostics", get(diagnostics))
        .with_state(state)
}
