use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{NotesError, Result};

/// Identifier of a stored note.
///
/// The only way to obtain one from user input is [`NoteId::parse`], so a
/// `NoteId` reaching the storage layer is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Allocate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a raw identifier, rejecting anything that is not a UUID.
    pub fn parse(raw: &str) -> Result<Self> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| NotesError::MalformedId(raw.to_string()))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for NoteId {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub important: bool,
    pub date: DateTime<Utc>,
    /// Insertion order within the collection; never serialized.
    #[serde(skip)]
    pub sequence_number: u32,
}

impl Note {
    /// Materialize a validated payload into a stored record.
    pub fn from_valid(valid: ValidNote, sequence_number: u32) -> Self {
        Self {
            id: NoteId::generate(),
            content: valid.content,
            important: valid.important,
            date: Utc::now(),
            sequence_number,
        }
    }
}

/// Create payload as received from a client. Nothing is guaranteed about it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub important: Option<bool>,
}

impl NewNote {
    pub fn new(content: impl Into<String>, important: bool) -> Self {
        Self {
            content: Some(content.into()),
            important: Some(important),
        }
    }
}

/// A create payload that passed validation: `content` is present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNote {
    content: String,
    important: bool,
}

impl ValidNote {
    pub fn new(content: impl Into<String>, important: bool) -> Result<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(NotesError::validation("content", "content must not be empty"));
        }
        Ok(Self { content, important })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn important(&self) -> bool {
        self.important
    }
}
