use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Validation failed for field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("malformed id: {0}")]
    MalformedId(String),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Loro error: {0}")]
    Loro(#[from] loro::LoroError),

    #[error("Loro encode error: {0}")]
    LoroEncode(#[from] loro::LoroEncodeError),
}

impl NotesError {
    /// Shorthand for a validation failure on a single field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        NotesError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// True for errors caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NotesError::Validation { .. } | NotesError::MalformedId(_) | NotesError::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
