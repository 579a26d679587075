use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for creating a document
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentCreateRequest {
    pub id: String,
}

/// Response returned after creating a document
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentCreateResponse {
    pub id: String,
    /// `false` when the document already existed
    pub created: bool,
}

/// Current content of a document
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: String,
    pub content: String,
}

/// Response returned after deleting a document
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentDeleteResponse {
    pub success: bool,
}
