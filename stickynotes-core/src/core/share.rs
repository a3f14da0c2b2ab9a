//! Share-sheet payloads built from notes.

use crate::core::drawing;
use crate::{Note, NoteKind, Result, StickyNotesError};

/// What gets handed to the platform share sheet for one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharePayload {
    /// Plain text: the title followed by a blank line and the content.
    Text { title: String, message: String },
    /// A recorded voice clip referenced by `file://` URL.
    Audio {
        title: String,
        message: String,
        url: String,
        mime_type: &'static str,
    },
    /// The drawing as decoded PNG bytes.
    Drawing {
        title: String,
        message: String,
        png: Vec<u8>,
        mime_type: &'static str,
    },
}

/// A platform share mechanism.
pub trait ShareSurface {
    fn share(&self, payload: &SharePayload) -> Result<()>;
}

impl SharePayload {
    /// Builds the payload for `note`, choosing voice, then drawing, then text.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::InvalidDrawing`] if a drawing note's
    /// payload cannot be decoded.
    pub fn for_note(note: &Note) -> Result<Self> {
        match (note.kind(), &note.audio_path, &note.drawing_paths) {
            (NoteKind::Voice, Some(path), _) => Ok(Self::Audio {
                title: "Share Voice Note".to_string(),
                message: note.title.clone(),
                url: file_url(path),
                mime_type: audio_mime_type(path),
            }),
            (NoteKind::Drawing, _, Some(drawing)) => Ok(Self::Drawing {
                title: "Share Drawing".to_string(),
                message: note.title.clone(),
                png: drawing::decode_png(drawing)?,
                mime_type: "image/png",
            }),
            _ => Ok(Self::Text {
                title: "Share Note".to_string(),
                message: format!("{}\n\n{}", note.title, note.content),
            }),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Text { message, .. }
            | Self::Audio { message, .. }
            | Self::Drawing { message, .. } => message,
        }
    }
}

/// Builds the payload for `note` and hands it to `surface`.
///
/// # Errors
///
/// Returns [`StickyNotesError::InvalidDrawing`] for an undecodable drawing and
/// [`StickyNotesError::ExternalService`] when the surface refuses the payload.
pub fn share_note(surface: &dyn ShareSurface, note: &Note) -> Result<()> {
    let payload = SharePayload::for_note(note)?;
    surface.share(&payload).map_err(|e| match e {
        StickyNotesError::ExternalService(_) => e,
        other => StickyNotesError::ExternalService(format!("Could not share note: {other}")),
    })
}

fn file_url(path: &str) -> String {
    if path.starts_with("file://") {
        path.to_string()
    } else {
        format!("file://{path}")
    }
}

fn audio_mime_type(path: &str) -> &'static str {
    match path.rsplit_once('.') {
        Some((_, "mp3")) => "audio/mp3",
        _ => "audio/m4a",
    }
}
