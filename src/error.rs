/// Failures of the real-time sync path.
///
/// Every variant is scoped to a single connection. None of them is ever
/// surfaced to another connection or allowed to stop the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Admission was attempted without a document identifier.
    MissingDocumentId,
    /// The peer closed the stream or the transport failed while reading.
    StreamClosed,
    /// A write to the peer failed. The connection is unusable afterwards.
    WriteFailed(String),
    /// A received frame could not be interpreted as an edit.
    MalformedMessage(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::MissingDocumentId => write!(f, "docID required"),
            SyncError::StreamClosed => write!(f, "Stream closed"),
            SyncError::WriteFailed(e) => write!(f, "Write failed: {}", e),
            SyncError::MalformedMessage(e) => write!(f, "Malformed message: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}
