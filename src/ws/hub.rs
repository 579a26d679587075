use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SyncError;
use crate::models::{EditMessage, SendMessage};
use crate::services::DocumentStore;
use crate::utils::scope_guard::ScopeGuard;
use super::connection::{Connection, ConnectionReader};

/// Connections subscribed to one document.
#[derive(Default)]
struct Room {
    members: HashMap<Uuid, Arc<Connection>>,
}

/// Room registry and per-connection lifecycle.
///
/// Membership lives behind a single mutex that is never held across an
/// await. A room is removed in the same critical section that removes its
/// last member, so an empty room is never observable and a new subscriber
/// can never be inserted into a room that is being torn down.
pub struct Hub {
    store: Arc<DocumentStore>,
    rooms: Mutex<HashMap<String, Room>>,
}

impl Hub {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            rooms: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    // Membership changes are single inserts/removes, so a poisoned map is
    // still consistent.
    fn rooms(&self) -> MutexGuard<'_, HashMap<String, Room>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate the document identifier supplied with a connection request.
    pub fn admit(document_id: Option<&str>) -> Result<String, SyncError> {
        match document_id {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(SyncError::MissingDocumentId),
        }
    }

    /// Drive one admitted connection until it terminates.
    ///
    /// Sends the `init` snapshot, registers the connection in its room and
    /// then applies every received edit. The loop ends on a read failure, a
    /// malformed edit, or as soon as the connection is closed from elsewhere
    /// (eviction or a failed write). On return the connection is out of its
    /// room and closed.
    pub async fn serve(self: Arc<Self>, connection: Arc<Connection>, mut reader: ConnectionReader) -> SyncError {
        let document_id = connection.document_id().to_string();
        let connection_id = connection.id();

        let snapshot = self.store.get(&document_id);
        if let Err(e) = connection.send(&SendMessage::init(snapshot)) {
            warn!("Failed to send init for document {} to connection {}: {}", document_id, connection_id, e);
            connection.close();
            return e;
        }

        self.join(connection.clone());
        info!("Connection {} registered for document {}", connection_id, document_id);

        let membership = {
            let hub = self.clone();
            let document_id = document_id.clone();
            ScopeGuard::new(move || {
                hub.leave(&document_id, connection_id);
            })
        };

        let reason = loop {
            let received = tokio::select! {
                received = reader.receive() => received,
                _ = connection.closed() => Err(SyncError::StreamClosed),
            };
            let text = match received {
                Ok(text) => text,
                Err(e) => break e,
            };
            let edit = match EditMessage::parse(&text) {
                Ok(edit) => edit,
                Err(e) => {
                    warn!("Dropping connection {} on document {}: {}", connection_id, document_id, e);
                    break e;
                }
            };

            debug!("Edit from {} on document {} ({} bytes)", connection_id, document_id, edit.content.len());
            self.store.update(&document_id, edit.content.as_str());
            self.broadcast(&document_id, &edit.content, connection_id);
        };

        drop(membership);
        connection.close();
        info!("Connection {} on document {} terminated: {}", connection_id, document_id, reason);
        reason
    }

    /// Add a connection to the room of its document, creating the room.
    pub fn join(&self, connection: Arc<Connection>) {
        let mut rooms = self.rooms();
        let room = rooms
            .entry(connection.document_id().to_string())
            .or_default();
        room.members.insert(connection.id(), connection);
    }

    /// Remove a connection from a room, dropping the room once it is empty.
    ///
    /// Returns `true` if the connection was still a member.
    pub fn leave(&self, document_id: &str, connection_id: Uuid) -> bool {
        let mut rooms = self.rooms();
        let Some(room) = rooms.get_mut(document_id) else {
            return false;
        };
        let removed = room.members.remove(&connection_id).is_some();
        if room.members.is_empty() {
            rooms.remove(document_id);
            debug!("Room for document {} closed", document_id);
        }
        removed
    }

    /// Queue `content` as an update for every member of the room except `sender`.
    ///
    /// Runs under the membership lock, so updates to one document are queued
    /// to every member in the same order. Sends only enqueue: a member that
    /// cannot take the frame is evicted and closed in the same pass, which
    /// also stops its read loop. Returns the number of members the update was
    /// queued for.
    pub fn broadcast(&self, document_id: &str, content: &str, sender: Uuid) -> usize {
        let msg = SendMessage::update(content);
        let mut rooms = self.rooms();
        let Some(room) = rooms.get_mut(document_id) else {
            return 0;
        };

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (id, member) in room.members.iter() {
            if *id == sender {
                continue;
            }
            match member.send(&msg) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!("Evicting connection {} from document {}: {}", id, document_id, e);
                    failed.push(*id);
                }
            }
        }

        for id in failed {
            if let Some(member) = room.members.remove(&id) {
                member.close();
            }
        }
        if room.members.is_empty() {
            rooms.remove(document_id);
            debug!("Room for document {} closed", document_id);
        }
        delivered
    }

    pub fn room_count(&self) -> usize {
        self.rooms().len()
    }

    pub fn connection_count(&self) -> usize {
        self.rooms().values().map(|room| room.members.len()).sum()
    }

    /// Number of connections subscribed to `document_id`.
    pub fn member_count(&self, document_id: &str) -> usize {
        self.rooms()
            .get(document_id)
            .map_or(0, |room| room.members.len())
    }

    pub fn has_room(&self, document_id: &str) -> bool {
        self.rooms().contains_key(document_id)
    }
}
