//! Home-screen widget selection and the display set derived from it.

use crate::{Note, NoteStore, Result, SlotStore, StickyNotesError};
use std::path::PathBuf;

/// Slot key holding the JSON array of selected note ids.
pub const WIDGET_NOTES_KEY: &str = "@sticky_notes_widget";

/// The widget shows at least this many notes when enough exist.
pub const WIDGET_MIN_NOTES: usize = 3;

/// An external surface that renders the widget display set.
pub trait WidgetSurface {
    /// Redraws the surface from `notes`.
    fn refresh(&self, notes: &[Note]) -> Result<()>;
}

/// A surface that does nothing; used where no widget is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl WidgetSurface for NullSurface {
    fn refresh(&self, notes: &[Note]) -> Result<()> {
        log::debug!("widget refresh requested for {} notes, no surface attached", notes.len());
        Ok(())
    }
}

/// Writes the display set as a JSON array to a file the native widget reads.
#[derive(Debug, Clone)]
pub struct SnapshotFileSurface {
    path: PathBuf,
}

impl SnapshotFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl WidgetSurface for SnapshotFileSurface {
    fn refresh(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(notes)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// The ordered list of notes picked for the widget, joined against a [`NoteStore`].
///
/// The selection lives in its own slot and may name notes that have since
/// been deleted; those never appear in [`compute_display_set`](Self::compute_display_set).
pub struct WidgetSelection<'a, S: SlotStore> {
    store: &'a NoteStore<S>,
    surface: Box<dyn WidgetSurface + 'a>,
}

impl<'a, S: SlotStore> WidgetSelection<'a, S> {
    pub fn new(store: &'a NoteStore<S>, surface: impl WidgetSurface + 'a) -> Self {
        Self {
            store,
            surface: Box::new(surface),
        }
    }

    /// Returns the selected ids in the order they were added.
    ///
    /// Empty if the slot was never written or cannot be read.
    pub fn get_selected_ids(&self) -> Vec<String> {
        self.try_get_selected_ids().unwrap_or_else(|e| {
            log::warn!("treating widget selection as empty: {e}");
            Vec::new()
        })
    }

    /// Like [`get_selected_ids`](Self::get_selected_ids) but surfaces read failures.
    ///
    /// # Errors
    ///
    /// Returns [`StickyNotesError::CorruptSlot`] if the slot does not hold a
    /// JSON array of ids, or the backend's error if the read fails.
    pub fn try_get_selected_ids(&self) -> Result<Vec<String>> {
        match self.store.slots().read(WIDGET_NOTES_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| {
                StickyNotesError::CorruptSlot {
                    key: WIDGET_NOTES_KEY.to_string(),
                    source,
                }
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Appends `id` to the selection and refreshes the surface.
    ///
    /// Returns `false` without writing or refreshing when `id` is already selected.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the selection cannot be read or written.
    pub fn add_to_selection(&self, id: &str) -> Result<bool> {
        let mut ids = self.load_for_write()?;
        if ids.iter().any(|selected| selected == id) {
            return Ok(false);
        }

        ids.push(id.to_string());
        self.persist(&ids)?;
        self.notify_external_surface();
        Ok(true)
    }

    /// Drops `id` from the selection and refreshes the surface.
    ///
    /// Returns `false` without writing or refreshing when `id` was not selected.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the selection cannot be read or written.
    pub fn remove_from_selection(&self, id: &str) -> Result<bool> {
        let mut ids = self.load_for_write()?;
        let before = ids.len();
        ids.retain(|selected| selected != id);

        if ids.len() == before {
            return Ok(false);
        }

        self.persist(&ids)?;
        self.notify_external_surface();
        Ok(true)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.get_selected_ids().iter().any(|selected| selected == id)
    }

    /// Builds the list of notes the widget should show.
    ///
    /// Selected notes come first (in collection order, not selection
    /// order). If there are fewer than [`WIDGET_MIN_NOTES`], the most recently
    /// updated remaining notes fill the gap. The result is sorted by
    /// `updated_at`, newest first.
    pub fn compute_display_set(&self) -> Vec<Note> {
        let selected = self.get_selected_ids();
        let all_notes = self.store.get_all_notes();

        let mut display: Vec<Note> = all_notes
            .iter()
            .filter(|note| selected.contains(&note.id))
            .cloned()
            .collect();

        if display.len() < WIDGET_MIN_NOTES {
            let mut recent = all_notes;
            recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            for note in recent {
                if display.len() >= WIDGET_MIN_NOTES {
                    break;
                }
                if !display.iter().any(|n| n.id == note.id) {
                    display.push(note);
                }
            }
        }

        display.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        display
    }

    /// Pushes the current display set to the surface.
    ///
    /// A failing surface is logged and otherwise ignored.
    pub fn notify_external_surface(&self) {
        let display = self.compute_display_set();
        if let Err(e) = self.surface.refresh(&display) {
            log::warn!("widget refresh failed: {e}");
        }
    }

    /// Reads the selection ahead of a mutation. Corrupt JSON counts as empty.
    fn load_for_write(&self) -> Result<Vec<String>> {
        match self.try_get_selected_ids() {
            Ok(ids) => Ok(ids),
            Err(e @ StickyNotesError::CorruptSlot { .. }) => {
                log::warn!("overwriting unreadable widget selection: {e}");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self, ids: &[String]) -> Result<()> {
        let json = serde_json::to_string(ids)?;
        self.store.slots().write(WIDGET_NOTES_KEY, &json)
    }
}
