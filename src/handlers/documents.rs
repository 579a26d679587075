use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::models::{
    DocumentCreateRequest, DocumentCreateResponse, DocumentDeleteResponse, DocumentResponse, ErrorResponse,
};
use crate::state::AppState;

/// List the identifiers of all known documents
pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.list())
}

/// Create an empty document, leaving an existing one untouched
pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<DocumentCreateRequest>,
) -> Result<(StatusCode, Json<DocumentCreateResponse>), (StatusCode, Json<ErrorResponse>)> {
    let id = request.id.trim().to_string();
    if id.is_empty() {
        warn!("Rejected document creation without id");
        return Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, "Document id required"));
    }

    let created = state.store.create(&id);
    let status = if created {
        info!("Document '{}' created", id);
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DocumentCreateResponse { id, created })))
}

/// Current content of a document. Unknown documents read as empty.
pub async fn get_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Json<DocumentResponse> {
    let content = state.store.get(&doc_id);
    Json(DocumentResponse { id: doc_id, content })
}

/// Delete a document. Connected clients keep their rooms; their next edit recreates it.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Json<DocumentDeleteResponse> {
    let success = state.store.delete(&doc_id);
    if success {
        info!("Document '{}' deleted", doc_id);
    }
    Json(DocumentDeleteResponse { success })
}
