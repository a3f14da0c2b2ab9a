use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(name = "stickynotes", version, about = "Text, drawing and voice notes")]
pub struct CliConfig {
    /// Notes database; overrides the settings file.
    #[arg(long, env = "STICKYNOTES_DB")]
    pub db: Option<PathBuf>,

    /// Settings file to read and write.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Inspect or change settings.
    #[command(subcommand)]
    Config(ConfigCommand),
    #[command(flatten)]
    Notes(NoteCommand),
}

/// Commands that work against the notes database.
#[derive(Subcommand, Clone, Debug)]
pub enum NoteCommand {
    /// List notes, most recently updated first.
    List {
        /// Keep stored order instead of sorting by recency.
        #[arg(long)]
        stored_order: bool,
    },
    /// Print one note as JSON.
    Show { id: String },
    /// Create a note.
    Add(NoteArgs),
    /// Change fields of an existing note.
    Edit {
        id: String,
        #[command(flatten)]
        fields: NoteArgs,
        #[arg(long, conflicts_with = "drawing")]
        clear_drawing: bool,
        #[arg(long, conflicts_with = "audio")]
        clear_audio: bool,
    },
    /// Delete a note.
    Delete { id: String },
    /// Manage the home-screen widget selection.
    #[command(subcommand)]
    Widget(WidgetCommand),
    /// Show what would be handed to the share sheet.
    Share { id: String },
    /// Convert a drawing note's handwriting to text.
    #[cfg(feature = "ocr")]
    Ocr { id: String },
}

#[derive(Args, Clone, Debug, Default)]
pub struct NoteArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// PNG file to attach as the drawing.
    #[arg(long)]
    pub drawing: Option<PathBuf>,
    /// Recorded clip to reference as the voice note.
    #[arg(long)]
    pub audio: Option<String>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum WidgetCommand {
    /// Print the selected ids in selection order.
    List,
    Add { id: String },
    Remove { id: String },
    /// Print the notes the widget displays.
    Show,
    /// Rewrite the widget snapshot.
    Refresh,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommand {
    Show,
    SetDb { path: PathBuf },
    SetOcrKey { key: String },
}
