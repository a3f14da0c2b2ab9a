//! Core library for Sticky Notes: local storage for text, drawing and voice notes.
//!
//! The primary entry point is [`NoteStore`], which owns a [`SlotStore`] backend
//! and keeps the whole note collection as one JSON document. A
//! [`WidgetSelection`] borrows the store to derive what the home-screen widget
//! shows.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    clock::{Clock, SystemClock},
    drawing::{decode_png, strip_data_url_prefix},
    error::{Result, StickyNotesError},
    note::{Attachment, Note, NoteDraft, NoteKind},
    ocr::{parse_ocr_response, Conversion, OcrConfig, TextRecognizer},
    share::{share_note, SharePayload, ShareSurface},
    storage::{MemorySlots, SlotStore, SqliteSlots},
    store::{NoteStore, NOTES_STORAGE_KEY},
    widget::{
        NullSurface, SnapshotFileSurface, WidgetSelection, WidgetSurface, WIDGET_MIN_NOTES,
        WIDGET_NOTES_KEY,
    },
};

#[cfg(feature = "ocr")]
#[doc(inline)]
pub use crate::core::ocr::OcrSpaceClient;
