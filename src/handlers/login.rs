use axum::{
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    Form, Json,
};
use tracing::{info, warn};

use crate::models::{ErrorResponse, LoginRequest, LoginResponse};

/// Mock login: any non-empty username is accepted, sent either as a form or
/// as a JSON body
pub async fn login(
    request: Request,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("application/json"));

    let credentials = if is_json {
        Json::<LoginRequest>::from_request(request, &())
            .await
            .map(|Json(credentials)| credentials)
            .map_err(|e| {
                warn!("Rejected JSON login: {}", e);
                ErrorResponse::reply(e.status(), e.body_text())
            })?
    } else {
        Form::<LoginRequest>::from_request(request, &())
            .await
            .map(|Form(credentials)| credentials)
            .map_err(|e| {
                warn!("Rejected form login: {}", e);
                ErrorResponse::reply(e.status(), e.body_text())
            })?
    };

    let username = credentials.username.trim();
    if username.is_empty() {
        return Err(ErrorResponse::reply(StatusCode::BAD_REQUEST, "username required"));
    }

    info!("User '{}' logged in", username);
    Ok(Json(LoginResponse {
        status: "ok".to_string(),
        user: username.to_string(),
    }))
}
