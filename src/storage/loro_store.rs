use std::fs;
use std::path::{Path, PathBuf};

use loro::{LoroDoc, LoroMap, LoroValue, ValueOrContainer};

use super::NoteStore;
use crate::entity::{Note, NoteId, ValidNote};
use crate::error::{NotesError, Result};

const NOTES_SNAPSHOT: &str = "notes.loro";
const NOTES_COLLECTION: &str = "notes";
const META: &str = "_meta";
const SEQUENCE_KEY: &str = "note_sequence";

/// Note collection kept in a Loro document and persisted as a snapshot file.
///
/// Each note is a nested map keyed by its id inside the `notes` root map. The
/// last assigned sequence number lives in `_meta` so ordering survives reloads
/// even after the newest notes were deleted.
pub struct LoroStore {
    doc: LoroDoc,
    path: PathBuf,
}

impl LoroStore {
    /// Open the snapshot in `data_dir`, starting an empty document if there is none yet.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(NOTES_SNAPSHOT);

        let doc = LoroDoc::new();
        if path.exists() {
            let bytes = fs::read(&path)?;
            doc.import(&bytes)?;
        }

        let store = Self { doc, path };
        store.save()?;
        Ok(store)
    }

    /// Save the document to disk
    pub fn save(&self) -> Result<()> {
        let bytes = self.doc.export(loro::ExportMode::Snapshot)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn last_sequence_number(&self) -> u32 {
        let meta = self.doc.get_map(META);
        meta.get(SEQUENCE_KEY)
            .and_then(|v| match v {
                ValueOrContainer::Value(LoroValue::I64(n)) => Some(n as u32),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Decode one entry of the `notes` map. A malformed entry is a storage error.
    fn parse_note_from_map(key: &str, value: &LoroValue) -> Result<Note> {
        let corrupt =
            |what: &str| NotesError::Storage(format!("corrupt note record {}: {}", key, what));

        let LoroValue::Map(map) = value else {
            return Err(corrupt("not a map"));
        };
        let id = match map.get("id") {
            Some(LoroValue::String(s)) => s.parse::<NoteId>().map_err(|_| corrupt("invalid id"))?,
            _ => return Err(corrupt("missing id")),
        };
        let content = match map.get("content") {
            Some(LoroValue::String(s)) => s.to_string(),
            _ => return Err(corrupt("missing content")),
        };
        let sequence_number = match map.get("sequence_number") {
            Some(LoroValue::I64(n)) => *n as u32,
            _ => return Err(corrupt("missing sequence_number")),
        };
        let date = match map.get("date") {
            Some(LoroValue::String(s)) => chrono::DateTime::parse_from_rfc3339(s)
                .map_err(|_| corrupt("invalid date"))?
                .with_timezone(&chrono::Utc),
            _ => return Err(corrupt("missing date")),
        };
        let important = matches!(map.get("important"), Some(LoroValue::Bool(true)));

        Ok(Note {
            id,
            content,
            important,
            date,
            sequence_number,
        })
    }
}

impl NoteStore for LoroStore {
    fn insert(&self, note: ValidNote) -> Result<Note> {
        let sequence_number = self.last_sequence_number() + 1;
        let note = Note::from_valid(note, sequence_number);

        let notes = self.doc.get_map(NOTES_COLLECTION);
        let id_str = note.id.to_string();
        let entity_map = notes.insert_container(&id_str, LoroMap::new())?;

        entity_map.insert("id", id_str.clone())?;
        entity_map.insert("sequence_number", sequence_number as i64)?;
        entity_map.insert("content", note.content.clone())?;
        entity_map.insert("important", note.important)?;
        entity_map.insert("date", note.date.to_rfc3339())?;

        let meta = self.doc.get_map(META);
        meta.insert(SEQUENCE_KEY, sequence_number as i64)?;

        self.doc.commit();
        self.save()?;
        tracing::debug!(id = %id_str, sequence_number, "inserted note");
        Ok(note)
    }

    fn find_all(&self) -> Result<Vec<Note>> {
        let notes_map = self.doc.get_map(NOTES_COLLECTION);
        let mut notes = Vec::new();

        let json = notes_map.get_deep_value();
        if let LoroValue::Map(map) = json {
            for (key, entity_value) in map.iter() {
                notes.push(Self::parse_note_from_map(key, entity_value)?);
            }
        }

        notes.sort_by_key(|n| n.sequence_number);
        Ok(notes)
    }

    fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>> {
        let notes_map = self.doc.get_map(NOTES_COLLECTION);
        let id_str = id.to_string();

        let json = notes_map.get_deep_value();
        if let LoroValue::Map(map) = json {
            if let Some(entity_value) = map.get(&id_str) {
                return Self::parse_note_from_map(&id_str, entity_value).map(Some);
            }
        }
        Ok(None)
    }

    fn delete_by_id(&self, id: &NoteId) -> Result<()> {
        let notes_map = self.doc.get_map(NOTES_COLLECTION);
        let id_str = id.to_string();

        if notes_map.get(&id_str).is_none() {
            return Err(NotesError::NotFound(id_str));
        }

        notes_map.delete(&id_str)?;
        self.doc.commit();
        self.save()?;
        tracing::debug!(id = %id_str, "deleted note");
        Ok(())
    }

    fn delete_all(&self) -> Result<usize> {
        let notes_map = self.doc.get_map(NOTES_COLLECTION);
        let keys: Vec<String> = match notes_map.get_deep_value() {
            LoroValue::Map(map) => map.iter().map(|(key, _)| key.to_string()).collect(),
            _ => Vec::new(),
        };

        for key in &keys {
            notes_map.delete(key)?;
        }
        self.doc.commit();
        self.save()?;
        tracing::debug!(removed = keys.len(), "cleared notes");
        Ok(keys.len())
    }

    fn flush(&self) -> Result<()> {
        self.save()
    }
}
