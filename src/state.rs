use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::services::DocumentStore;
use crate::ws::Hub;

/// Shared handles injected into every handler.
///
/// The hub and the HTTP document endpoints share one store, so edits made
/// over a connection show up in listings right away and vice versa.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub hub: Arc<Hub>,
    pub service_name: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<DocumentStore>, service_name: impl Into<String>) -> Self {
        let hub = Arc::new(Hub::new(store.clone()));
        Self {
            store,
            hub,
            service_name: service_name.into(),
            started_at: Utc::now(),
        }
    }
}
