//! Document storage for notes.
//!
//! A store holds a single collection of [`Note`] documents. Identifiers and
//! insertion sequence numbers are assigned by the store on insert; callers
//! hand over an already validated [`ValidNote`] and an already parsed
//! [`NoteId`], so neither blank content nor malformed ids can reach a backend.

mod loro_store;
mod sqlite_store;

pub use loro_store::LoroStore;
pub use sqlite_store::SqliteStore;

use crate::config::{Backend, StorageConfig};
use crate::entity::{Note, NoteId, ValidNote};
use crate::error::Result;

/// Operations every storage backend provides.
pub trait NoteStore: Send {
    /// Persist a new note and return the stored record.
    fn insert(&self, note: ValidNote) -> Result<Note>;

    /// All notes, in insertion order.
    fn find_all(&self) -> Result<Vec<Note>>;

    fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Remove one note. Fails with `NotesError::NotFound` if nothing matches.
    fn delete_by_id(&self, id: &NoteId) -> Result<()>;

    /// Remove every note and return how many were removed.
    fn delete_all(&self) -> Result<usize>;

    /// Make sure everything written so far is on disk.
    fn flush(&self) -> Result<()>;
}

/// Open the backend selected in `config`, creating its data directory if needed.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn NoteStore>> {
    tracing::debug!(backend = %config.backend, data_dir = %config.data_dir.display(), "opening store");
    let store: Box<dyn NoteStore> = match config.backend {
        Backend::Loro => Box::new(LoroStore::open(&config.data_dir)?),
        Backend::Sqlite => Box::new(SqliteStore::open(&config.data_dir)?),
    };
    Ok(store)
}
