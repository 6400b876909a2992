use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::NoteStore;
use crate::entity::{Note, NoteId, ValidNote};
use crate::error::{NotesError, Result};

const NOTES_DB: &str = "notes.db";

/// Note collection stored as rows of a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open or create the database in `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(NOTES_DB);
        let conn = Connection::open(&path)?;

        let store = Self { conn, path };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                sequence_number INTEGER NOT NULL,
                content TEXT NOT NULL,
                important INTEGER NOT NULL DEFAULT 0,
                date TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_notes_sequence ON notes(sequence_number)",
            [],
        )?;

        // Survives deletes, so sequence numbers are never reused
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn next_sequence_number(&self) -> Result<u32> {
        let last: Option<u32> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'note_sequence'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(last.unwrap_or(0) + 1)
    }

    fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
        let id: String = row.get(0)?;
        let date: String = row.get(4)?;
        let conversion = |message: String| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, message.into())
        };

        Ok(Note {
            id: NoteId::parse(&id).map_err(|e| conversion(e.to_string()))?,
            sequence_number: row.get(1)?,
            content: row.get(2)?,
            important: row.get(3)?,
            date: chrono::DateTime::parse_from_rfc3339(&date)
                .map_err(|e| conversion(e.to_string()))?
                .with_timezone(&chrono::Utc),
        })
    }
}

impl NoteStore for SqliteStore {
    fn insert(&self, note: ValidNote) -> Result<Note> {
        let tx = self.conn.unchecked_transaction()?;
        let note = Note::from_valid(note, self.next_sequence_number()?);

        tx.execute(
            "INSERT INTO notes (id, sequence_number, content, important, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                note.id.to_string(),
                note.sequence_number,
                note.content,
                note.important,
                note.date.to_rfc3339(),
            ],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('note_sequence', ?1)",
            [note.sequence_number],
        )?;
        tx.commit()?;

        tracing::debug!(id = %note.id, sequence_number = note.sequence_number, "inserted note");
        Ok(note)
    }

    fn find_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, sequence_number, content, important, date
             FROM notes ORDER BY sequence_number",
        )?;

        let notes = stmt
            .query_map([], Self::note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                "SELECT id, sequence_number, content, important, date
                 FROM notes WHERE id = ?1",
                [id.to_string()],
                Self::note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    fn delete_by_id(&self, id: &NoteId) -> Result<()> {
        let id_str = id.to_string();
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [&id_str])?;

        if removed == 0 {
            return Err(NotesError::NotFound(id_str));
        }
        tracing::debug!(id = %id_str, "deleted note");
        Ok(())
    }

    fn delete_all(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM notes", [])?;
        tracing::debug!(removed, "cleared notes");
        Ok(removed)
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl From<rusqlite::Error> for NotesError {
    fn from(e: rusqlite::Error) -> Self {
        NotesError::Storage(format!("SQLite error: {}", e))
    }
}
