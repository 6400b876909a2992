//! Notes service: the layer between HTTP/CLI intents and the store.
//!
//! Every operation takes the store lock once and issues exactly one storage
//! call. Input checks (content presence, id syntax) happen before the lock is
//! taken, so a rejected request never touches the store.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::entity::{NewNote, Note, NoteId, ValidNote};
use crate::error::{NotesError, Result};
use crate::storage::NoteStore;

/// Check a create payload: `content` must be present and non-blank.
pub fn validate_new_note(payload: NewNote) -> Result<ValidNote> {
    let content = payload
        .content
        .ok_or_else(|| NotesError::validation("content", "content is missing"))?;
    ValidNote::new(content, payload.important.unwrap_or(false))
}

/// Shared handle to the notes collection. Cloning is cheap.
#[derive(Clone)]
pub struct NotesService {
    store: Arc<Mutex<Box<dyn NoteStore>>>,
}

impl NotesService {
    pub fn new(store: Box<dyn NoteStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// All notes in insertion order.
    pub async fn list(&self) -> Result<Vec<Note>> {
        let store = self.store.lock().await;
        store.find_all()
    }

    pub async fn create(&self, payload: NewNote) -> Result<Note> {
        let valid = validate_new_note(payload)?;
        let store = self.store.lock().await;
        let note = store.insert(valid)?;
        tracing::info!(id = %note.id, important = note.important, "note created");
        Ok(note)
    }

    pub async fn get(&self, raw_id: &str) -> Result<Note> {
        let id = NoteId::parse(raw_id)?;
        let store = self.store.lock().await;
        store
            .find_by_id(&id)?
            .ok_or_else(|| NotesError::NotFound(id.to_string()))
    }

    /// Remove one note. A malformed id is rejected before the store is consulted.
    pub async fn delete(&self, raw_id: &str) -> Result<()> {
        let id = NoteId::parse(raw_id)?;
        let store = self.store.lock().await;
        store.delete_by_id(&id)?;
        tracing::info!(id = %id, "note deleted");
        Ok(())
    }

    /// Empty the collection. Not reachable over HTTP.
    pub async fn reset(&self) -> Result<usize> {
        let store = self.store.lock().await;
        store.delete_all()
    }

    pub async fn flush(&self) -> Result<()> {
        let store = self.store.lock().await;
        store.flush()
    }
}
