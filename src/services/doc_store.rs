use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory document contents, keyed by document identifier.
///
/// Every write replaces the whole content under the write lock, so readers
/// only ever see a fully committed value. Concurrent updates of the same
/// document resolve as last-write-wins in lock acquisition order.
///
/// Unknown identifiers read as the empty string, on the real-time path as
/// well as through the HTTP handlers.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: RwLock<HashMap<String, String>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with empty documents.
    pub fn with_documents<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let docs = ids
            .into_iter()
            .map(|id| (id.into(), String::new()))
            .collect();
        Self {
            docs: RwLock::new(docs),
        }
    }

    // A writer cannot leave a half-written entry behind (values are swapped
    // whole), so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.docs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.docs.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current content of `id`, or an empty string if it is unknown.
    pub fn get(&self, id: &str) -> String {
        self.read().get(id).cloned().unwrap_or_default()
    }

    /// Replace the content of `id`, creating the entry if needed.
    pub fn update(&self, id: &str, content: impl Into<String>) {
        let content = content.into();
        let mut docs = self.write();
        match docs.get_mut(id) {
            Some(current) => *current = content,
            None => {
                docs.insert(id.to_string(), content);
            }
        }
    }

    /// Ensure `id` exists. Existing content is left untouched.
    ///
    /// Returns `true` if a new, empty entry was created.
    pub fn create(&self, id: &str) -> bool {
        let mut docs = self.write();
        if docs.contains_key(id) {
            return false;
        }
        docs.insert(id.to_string(), String::new());
        true
    }

    /// Remove `id`. Returns `true` if an entry was removed.
    pub fn delete(&self, id: &str) -> bool {
        self.write().remove(id).is_some()
    }

    /// Sorted snapshot of the known identifiers.
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
