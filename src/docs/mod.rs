use utoipa::OpenApi;
use crate::models::*;

/// Mock login, accepts a form or a JSON body
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded", description = "Also accepted as application/json"),
    responses(
        (status = 200, description = "Login accepted", body = LoginResponse),
        (status = 400, description = "Missing username", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn login_doc() {}

/// List documents
#[utoipa::path(
    get,
    path = "/documents",
    responses(
        (status = 200, description = "Known document ids", body = [String])
    )
)]
#[allow(dead_code)]
pub async fn list_documents_doc() {}

/// Create a document
#[utoipa::path(
    post,
    path = "/documents",
    request_body = DocumentCreateRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentCreateResponse),
        (status = 200, description = "Document already existed", body = DocumentCreateResponse),
        (status = 400, description = "Missing id", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn create_document_doc() {}

/// Read a document
#[utoipa::path(
    get,
    path = "/documents/{doc_id}",
    params(("doc_id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Current content, empty for unknown documents", body = DocumentResponse)
    )
)]
#[allow(dead_code)]
pub async fn get_document_doc() {}

/// Delete a document
#[utoipa::path(
    delete,
    path = "/documents/{doc_id}",
    params(("doc_id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Whether a document was removed", body = DocumentDeleteResponse)
    )
)]
#[allow(dead_code)]
pub async fn delete_document_doc() {}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Service is ready to accept traffic", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Join a document room over WebSocket. The first frame is an `init` with
/// the current content, later frames carry `update`s from other members.
#[utoipa::path(
    get,
    path = "/ws",
    params(("docID" = String, Query, description = "Document to join")),
    responses(
        (status = 101, description = "Switching to the WebSocket protocol"),
        (status = 400, description = "Missing docID", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn ws_doc() {}

/// Diagnostics
#[utoipa::path(
    get,
    path = "/diagnostics",
    responses(
        (status = 200, description = "Runtime counters", body = DiagnosticsResponse)
    )
)]
#[allow(dead_code)]
pub async fn diagnostics_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        login_doc,
        list_documents_doc,
        create_document_doc,
        get_document_doc,
        delete_document_doc,
        ws_doc,
        health_check_doc,
        ready_check_doc,
        diagnostics_doc,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            DocumentCreateRequest,
            DocumentCreateResponse,
            DocumentResponse,
            DocumentDeleteResponse,
            HealthResponse,
            DiagnosticsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "api", description = "API endpoints")
    )
)]
pub struct ApiDoc;
