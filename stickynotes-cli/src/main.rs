use crate::cli::{CliConfig, Command, ConfigCommand, NoteArgs, NoteCommand, WidgetCommand};
use crate::settings::{load_settings, save_settings, settings_file_path, AppSettings};
use anyhow::{anyhow, Context};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use log::error;
use std::path::{Path, PathBuf};
use std::process::exit;
use stickynotes_core::{
    share_note, Note, NoteDraft, NoteStore, SharePayload, ShareSurface, SlotStore,
    SnapshotFileSurface, SqliteSlots, StickyNotesError, WidgetSelection,
};

mod cli;
mod settings;

fn main() {
    env_logger::init();

    let cli_config = CliConfig::parse();

    if let Err(e) = run(cli_config) {
        error!("{e:#}");
        match e.downcast_ref::<StickyNotesError>() {
            Some(store_error) => eprintln!("{}", store_error.user_message()),
            None => eprintln!("{e:#}"),
        }
        exit(1)
    }
}

fn run(cli_config: CliConfig) -> anyhow::Result<()> {
    let settings_path = cli_config.settings.clone().unwrap_or_else(settings_file_path);
    let settings = load_settings(&settings_path);

    match cli_config.command {
        Command::Config(command) => run_config(command, &settings_path, settings),
        Command::Notes(command) => {
            let db_path = cli_config
                .db
                .unwrap_or_else(|| PathBuf::from(&settings.database_path));
            run_notes(command, &db_path, &settings)
        }
    }
}

fn run_notes(command: NoteCommand, db_path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    let slots = SqliteSlots::open_or_create(db_path)
        .with_context(|| format!("opening {}", db_path.display()))?;
    let store = NoteStore::new(slots);
    let widget = WidgetSelection::new(
        &store,
        SnapshotFileSurface::new(&settings.widget_snapshot_path),
    );

    match command {
        NoteCommand::List { stored_order } => {
            let notes = if stored_order {
                store.get_all_notes()
            } else {
                store.recent_notes()
            };
            for note in &notes {
                print_summary(note, widget.is_selected(&note.id));
            }
        }
        NoteCommand::Show { id } => {
            let note = store
                .get_note(&id)
                .ok_or_else(|| anyhow!("no note with id {id}"))?;
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
        NoteCommand::Add(fields) => {
            let note = store.save_note(note_draft(NoteDraft::new(), fields)?)?;
            widget.notify_external_surface();
            println!("{}", note.id);
        }
        NoteCommand::Edit {
            id,
            fields,
            clear_drawing,
            clear_audio,
        } => {
            let mut draft = note_draft(NoteDraft::for_note(id), fields)?;
            if clear_drawing {
                draft = draft.clear_drawing();
            }
            if clear_audio {
                draft = draft.clear_audio();
            }
            let note = store.save_note(draft)?;
            widget.notify_external_surface();
            print_summary(&note, widget.is_selected(&note.id));
        }
        NoteCommand::Delete { id } => {
            if store.delete_note(&id)? {
                widget.notify_external_surface();
                println!("deleted {id}");
            } else {
                println!("no note with id {id}");
            }
        }
        NoteCommand::Widget(command) => run_widget(command, &widget)?,
        NoteCommand::Share { id } => {
            let note = store
                .get_note(&id)
                .ok_or_else(|| anyhow!("no note with id {id}"))?;
            share_note(&StdoutShare, &note)?;
        }
        #[cfg(feature = "ocr")]
        NoteCommand::Ocr { id } => {
            let client = stickynotes_core::OcrSpaceClient::new(settings.ocr.clone());
            match store.convert_drawing_to_text(&id, &client)? {
                stickynotes_core::Conversion::Converted(note) => {
                    widget.notify_external_surface();
                    println!("{}", note.content);
                }
                stickynotes_core::Conversion::Unchanged { advisory } => eprintln!("{advisory}"),
            }
        }
    }

    Ok(())
}

fn run_widget<S: SlotStore>(command: WidgetCommand, widget: &WidgetSelection<'_, S>) -> anyhow::Result<()> {
    match command {
        WidgetCommand::List => {
            for id in widget.get_selected_ids() {
                println!("{id}");
            }
        }
        WidgetCommand::Add { id } => {
            if !widget.add_to_selection(&id)? {
                println!("{id} is already on the widget");
            }
        }
        WidgetCommand::Remove { id } => {
            if !widget.remove_from_selection(&id)? {
                println!("{id} is not on the widget");
            }
        }
        WidgetCommand::Show => {
            for note in widget.compute_display_set() {
                print_summary(&note, widget.is_selected(&note.id));
            }
        }
        WidgetCommand::Refresh => widget.notify_external_surface(),
    }
    Ok(())
}

fn run_config(command: ConfigCommand, path: &Path, mut settings: AppSettings) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("# {}", path.display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            return Ok(());
        }
        ConfigCommand::SetDb { path } => {
            settings.database_path = path.to_string_lossy().to_string();
        }
        ConfigCommand::SetOcrKey { key } => settings.ocr.api_key = key,
    }
    save_settings(path, &settings)
}

/// Copies the supplied CLI fields into `draft`, reading a drawing file if given.
fn note_draft(mut draft: NoteDraft, fields: NoteArgs) -> anyhow::Result<NoteDraft> {
    if let Some(title) = fields.title {
        draft = draft.title(title);
    }
    if let Some(content) = fields.content {
        draft = draft.content(content);
    }
    if let Some(path) = fields.drawing {
        let png = std::fs::read(&path)
            .with_context(|| format!("reading drawing {}", path.display()))?;
        draft = draft.drawing_paths(format!("data:image/png;base64,{}", STANDARD.encode(png)));
    }
    if let Some(audio) = fields.audio {
        draft = draft.audio_path(audio);
    }
    Ok(draft)
}

fn print_summary(note: &Note, on_widget: bool) {
    let updated = chrono::DateTime::from_timestamp_millis(note.updated_at)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let marker = if on_widget { "*" } else { " " };
    println!(
        "{marker} {}  {updated}  {}  {}",
        note.id,
        note.display_title(),
        note.preview().replace('\n', " ")
    );
}

/// Prints the share payload instead of opening a platform share sheet.
struct StdoutShare;

impl ShareSurface for StdoutShare {
    fn share(&self, payload: &SharePayload) -> stickynotes_core::Result<()> {
        match payload {
            SharePayload::Text { message, .. } => println!("{message}"),
            SharePayload::Audio { url, mime_type, message, .. } => {
                println!("{message}\n{url} ({mime_type})");
            }
            SharePayload::Drawing { png, mime_type, message, .. } => {
                println!("{message}\n<{} bytes of {mime_type}>", png.len());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_draft_reads_drawing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();

        let draft = note_draft(
            NoteDraft::new(),
            NoteArgs {
                title: Some("Sketch".to_string()),
                drawing: Some(path),
                ..NoteArgs::default()
            },
        )
        .unwrap();

        assert_eq!(draft.title.as_deref(), Some("Sketch"));
        assert_eq!(
            draft.drawing_paths,
            stickynotes_core::Attachment::Set("data:image/png;base64,iVBORw0KGgo=".to_string())
        );
    }

    #[test]
    fn test_note_draft_missing_drawing_file_fails() {
        let result = note_draft(
            NoteDraft::new(),
            NoteArgs {
                drawing: Some(PathBuf::from("/definitely/not/here.png")),
                ..NoteArgs::default()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_edit_flags() {
        let cli = CliConfig::parse_from([
            "stickynotes", "--db", "/tmp/n.db", "edit", "a1", "--title", "v2", "--clear-audio",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/n.db")));
        match cli.command {
            Command::Notes(NoteCommand::Edit { id, fields, clear_audio, clear_drawing }) => {
                assert_eq!(id, "a1");
                assert_eq!(fields.title.as_deref(), Some("v2"));
                assert!(clear_audio);
                assert!(!clear_drawing);
            }
            other => panic!("Wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_config_commands_skip_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("never-created.db");
        let settings = dir.path().join("settings.json");

        let cli = CliConfig::parse_from([
            "stickynotes",
            "--db",
            db.to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
            "config",
            "set-ocr-key",
            "k-123",
        ]);
        assert!(matches!(cli.command, Command::Config(ConfigCommand::SetOcrKey { .. })));
        run(cli).unwrap();

        assert_eq!(load_settings(&settings).ocr.api_key, "k-123");
        assert!(!db.exists());
    }

    #[test]
    fn test_run_round_trip_against_temp_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("notes.db");
        let settings = dir.path().join("settings.json");
        let base = |args: &[&str]| {
            let mut full = vec![
                "stickynotes".to_string(),
                "--db".to_string(),
                db.to_string_lossy().to_string(),
                "--settings".to_string(),
                settings.to_string_lossy().to_string(),
            ];
            full.extend(args.iter().map(|a| a.to_string()));
            CliConfig::parse_from(full)
        };

        let snapshot = dir.path().join("widget.json");
        run(base(&["config", "set-db", db.to_str().unwrap()])).unwrap();
        let mut stored = load_settings(&settings);
        stored.widget_snapshot_path = snapshot.to_string_lossy().to_string();
        save_settings(&settings, &stored).unwrap();

        run(base(&["add", "--title", "Groceries", "--content", "milk"])).unwrap();

        let store = NoteStore::new(SqliteSlots::open(&db).unwrap());
        let notes = store.get_all_notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        drop(store);

        run(base(&["widget", "add", &notes[0].id])).unwrap();
        let shown: Vec<Note> =
            serde_json::from_str(&std::fs::read_to_string(&snapshot).unwrap()).unwrap();
        assert_eq!(shown[0].id, notes[0].id);

        run(base(&["delete", &notes[0].id])).unwrap();
        let store = NoteStore::new(SqliteSlots::open(&db).unwrap());
        assert!(store.get_all_notes().is_empty());
    }
}
