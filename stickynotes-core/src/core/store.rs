//! The note store: sole authority for durable note data.
//!
//! The whole collection lives as one JSON array under [`NOTES_STORAGE_KEY`].
//! Every mutation reads the full array, changes it in memory, and writes the
//! full array back. There is no version token, so when two writers overlap
//! the last write wins, including over a delete made in between.

use crate::core::clock::{Clock, SystemClock};
use crate::{Note, NoteDraft, Result, SlotStore, StickyNotesError};
use uuid::Uuid;

/// Slot key holding the JSON array of notes.
pub const NOTES_STORAGE_KEY: &str = "@sticky_notes";

/// Create, read, update and delete over the notes slot of a [`SlotStore`].
///
/// Construct one per process and hand out references to it.
pub struct NoteStore<S: SlotStore> {
    slots: S,
    clock: Box<dyn Clock>,
}

impl<S: SlotStore> NoteStore<S> {
    /// Creates a store over `slots` that stamps notes with the system clock.
    pub fn new(slots: S) -> Self {
        Self::with_clock(slots, SystemClock)
    }

    pub fn with_clock(slots: S, clock: impl Clock + 'static) -> Self {
        Self {
            slots,
            clock: Box::new(clock),
        }
    }

    /// Returns the slot backend this store persists to.
    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Creates a note or updates an existing one and persists the collection.
    ///
    /// A draft without an id becomes a new note with a fresh UUID v4,
    /// `created_at` taken from the draft or the clock, and `updated_at` from
    /// the clock. A draft with an id replaces only the supplied fields of the
    /// matching note, keeps its `created_at`, and refreshes `updated_at`.
    /// `updated_at` never falls below `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::NoteNotFound`] if the draft names an id
    /// that is not in the collection, or a persistence error if the slot
    /// cannot be read or written. A slot holding corrupt JSON is treated as
    /// an empty collection and overwritten.
    pub fn save_note(&self, draft: NoteDraft) -> Result<Note> {
        let now = self.clock.now_millis();
        let mut notes = self.load_for_write()?;

        let saved = match draft.target_id().map(str::to_string) {
            Some(id) => {
                let index = notes
                    .iter()
                    .position(|n| n.id == id)
                    .ok_or_else(|| StickyNotesError::NoteNotFound(id.clone()))?;
                let existing = notes[index].clone();
                let merged = Note {
                    id: existing.id,
                    title: draft.title.unwrap_or(existing.title),
                    content: draft.content.unwrap_or(existing.content),
                    drawing_paths: draft.drawing_paths.apply(existing.drawing_paths),
                    audio_path: draft.audio_path.apply(existing.audio_path),
                    created_at: existing.created_at,
                    updated_at: now.max(existing.created_at),
                };
                notes[index] = merged.clone();
                merged
            }
            None => {
                let created_at = draft.created_at.unwrap_or(now);
                let note = Note {
                    id: Uuid::new_v4().to_string(),
                    title: draft.title.unwrap_or_default(),
                    content: draft.content.unwrap_or_default(),
                    drawing_paths: draft.drawing_paths.apply(None),
                    audio_path: draft.audio_path.apply(None),
                    created_at,
                    updated_at: now.max(created_at),
                };
                notes.push(note.clone());
                note
            }
        };

        self.persist(&notes)?;
        log::debug!("saved note {}", saved.id);
        Ok(saved)
    }

    /// Returns every note in stored order.
    ///
    /// A missing slot yields an empty list. So does a slot that cannot be
    /// read or parsed; in that case a warning is logged. Use
    /// [`try_get_all_notes`](Self::try_get_all_notes) to observe the failure.
    pub fn get_all_notes(&self) -> Vec<Note> {
        self.try_get_all_notes().unwrap_or_else(|e| {
            log::warn!("treating notes slot as empty: {e}");
            Vec::new()
        })
    }

    /// Like [`get_all_notes`](Self::get_all_notes) but surfaces read failures.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::CorruptSlot`] if the slot does not hold a
    /// JSON array of notes, or the backend's error if the read fails.
    pub fn try_get_all_notes(&self) -> Result<Vec<Note>> {
        match self.slots.read(NOTES_STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| {
                StickyNotesError::CorruptSlot {
                    key: NOTES_STORAGE_KEY.to_string(),
                    source,
                }
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Returns all notes, most recently updated first.
    pub fn recent_notes(&self) -> Vec<Note> {
        let mut notes = self.get_all_notes();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }

    /// Looks up a single note; `None` if no note has `id`.
    pub fn get_note(&self, id: &str) -> Option<Note> {
        self.get_all_notes().into_iter().find(|n| n.id == id)
    }

    /// Removes the note with `id`.
    ///
    /// Returns `false` without writing when no such note exists, so calling
    /// it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the slot cannot be read or written.
    pub fn delete_note(&self, id: &str) -> Result<bool> {
        let mut notes = self.load_for_write()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);

        if notes.len() == before {
            return Ok(false);
        }

        self.persist(&notes)?;
        log::debug!("deleted note {id}");
        Ok(true)
    }

    /// Reads the collection ahead of a mutation. Corrupt JSON counts as empty.
    fn load_for_write(&self) -> Result<Vec<Note>> {
        match self.try_get_all_notes() {
            Ok(notes) => Ok(notes),
            Err(e @ StickyNotesError::CorruptSlot { .. }) => {
                log::warn!("overwriting unreadable notes slot: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)?;
        self.slots.write(NOTES_STORAGE_KEY, &json)
    }
}
