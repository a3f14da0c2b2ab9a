//! Internal domain modules for the Sticky Notes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod clock;
pub mod drawing;
pub mod error;
pub mod note;
pub mod ocr;
pub mod share;
pub mod storage;
pub mod store;
pub mod widget;

#[doc(inline)]
pub use clock::{Clock, SystemClock};
#[doc(inline)]
pub use error::{Result, StickyNotesError};
#[doc(inline)]
pub use note::{Attachment, Note, NoteDraft, NoteKind};
#[doc(inline)]
pub use ocr::{Conversion, OcrConfig, TextRecognizer};
#[doc(inline)]
pub use share::{share_note, SharePayload, ShareSurface};
#[doc(inline)]
pub use storage::{MemorySlots, SlotStore, SqliteSlots};
#[doc(inline)]
pub use store::{NoteStore, NOTES_STORAGE_KEY};
#[doc(inline)]
pub use widget::{
    NullSurface, SnapshotFileSurface, WidgetSelection, WidgetSurface, WIDGET_MIN_NOTES,
    WIDGET_NOTES_KEY,
};
