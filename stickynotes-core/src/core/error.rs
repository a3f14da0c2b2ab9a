//! Error types for the Sticky Notes core library.

use thiserror::Error;

/// All errors that can occur within the Sticky Notes core library.
#[derive(Debug, Error)]
pub enum StickyNotesError {
    /// A SQLite operation on the slot table failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An update targeted a note ID that does not exist in the collection.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// A persistence slot holds data that is not valid JSON for its shape.
    #[error("Corrupt data in slot {key}: {source}")]
    CorruptSlot {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The opened file is not a Sticky Notes slot database.
    #[error("Invalid database: {0}")]
    InvalidDatabase(String),

    /// A drawing payload could not be decoded into image bytes.
    #[error("Invalid drawing: {0}")]
    InvalidDrawing(String),

    /// An external collaborator (OCR, share sheet, widget renderer) failed.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized to or from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`StickyNotesError`].
pub type Result<T> = std::result::Result<T, StickyNotesError>;

impl StickyNotesError {
    /// Returns `true` when the underlying storage medium failed to read or write.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Io(_)
                | Self::Json(_)
                | Self::CorruptSlot { .. }
                | Self::InvalidDatabase(_)
        )
    }

    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::CorruptSlot { .. } => "Stored notes could not be read".to_string(),
            Self::InvalidDatabase(_) => "Could not open notes database".to_string(),
            Self::InvalidDrawing(_) => "This drawing could not be read".to_string(),
            Self::ExternalService(msg) => msg.clone(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
