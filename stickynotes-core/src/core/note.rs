//! Note record, partial drafts accepted by the store, and derived helpers.

use serde::{Deserialize, Serialize};

/// Content previews are cut to this many characters.
const PREVIEW_CHARS: usize = 80;

/// A single user document as persisted under the notes slot.
///
/// Serializes with camelCase keys (`drawingPaths`, `createdAt`, ...).
/// Optional attachments are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing_paths: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<String>,
    /// Epoch milliseconds; set once at creation.
    pub created_at: i64,
    /// Epoch milliseconds; refreshed on every save.
    pub updated_at: i64,
}

/// What kind of note this is, judged by which attachment it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Text,
    Drawing,
    Voice,
}

impl Note {
    /// A voice recording takes precedence over a drawing.
    #[must_use]
    pub fn kind(&self) -> NoteKind {
        if self.audio_path.is_some() {
            NoteKind::Voice
        } else if self.drawing_paths.is_some() {
            NoteKind::Drawing
        } else {
            NoteKind::Text
        }
    }

    /// Title for list and widget display; empty titles read as "Untitled Note".
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled Note"
        } else {
            &self.title
        }
    }

    /// First 80 characters of the content, with `...` appended when cut.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.content.chars().count() > PREVIEW_CHARS {
            let head: String = self.content.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.content.clone()
        }
    }
}

/// Change to an optional attachment carried by a [`NoteDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Attachment {
    /// Leave whatever the stored note has.
    #[default]
    Keep,
    Set(String),
    Clear,
}

impl Attachment {
    pub(crate) fn apply(self, current: Option<String>) -> Option<String> {
        match self {
            Self::Keep => current,
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }
}

/// A partial note handed to [`NoteStore::save_note`](super::store::NoteStore::save_note).
///
/// Without an `id` the draft creates a new note; with one it updates the
/// matching note, touching only the fields that are supplied. An empty
/// `id` counts as no id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub drawing_paths: Attachment,
    pub audio_path: Attachment,
    /// Only honoured when creating.
    pub created_at: Option<i64>,
}

impl NoteDraft {
    /// Starts a draft for a note that does not exist yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a draft that updates the note with `id`.
    #[must_use]
    pub fn for_note(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn drawing_paths(mut self, drawing: impl Into<String>) -> Self {
        self.drawing_paths = Attachment::Set(drawing.into());
        self
    }

    #[must_use]
    pub fn clear_drawing(mut self) -> Self {
        self.drawing_paths = Attachment::Clear;
        self
    }

    #[must_use]
    pub fn audio_path(mut self, path: impl Into<String>) -> Self {
        self.audio_path = Attachment::Set(path.into());
        self
    }

    #[must_use]
    pub fn clear_audio(mut self) -> Self {
        self.audio_path = Attachment::Clear;
        self
    }

    #[must_use]
    pub fn created_at(mut self, millis: i64) -> Self {
        self.created_at = Some(millis);
        self
    }

    /// The target id, if this draft updates an existing note.
    pub(crate) fn target_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
