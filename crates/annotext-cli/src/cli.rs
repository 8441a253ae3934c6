//! Command-line arguments

use annotext_core::{AnnotationId, DocumentId, Label};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "annotext")]
#[command(about = "Annotate documents with entities, dates, and sentiment", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "annotext.yaml")]
    pub config: String,

    /// Journal file holding documents, annotations, and the knowledge base
    #[arg(short, long, env = "ANNOTEXT_STORE")]
    pub store: Option<PathBuf>,

    /// Tokenizer dictionary (`word [freq] tag` per line)
    #[arg(short, long)]
    pub lexicon: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage documents
    #[command(subcommand)]
    Doc(DocCommand),

    /// Run automatic annotation on a document
    Annotate { id: DocumentId },

    /// Label a character range by hand
    Label {
        id: DocumentId,
        #[arg(long)]
        start: usize,
        #[arg(long)]
        end: usize,
        #[arg(long)]
        label: Label,
    },

    /// Delete one annotation
    Unlabel { annotation_id: AnnotationId },

    /// Delete all annotations of a document
    Clear { id: DocumentId },

    /// Show the tokens of a document with their labels
    Segments { id: DocumentId },

    /// Manage the knowledge base
    #[command(subcommand)]
    Kb(KbCommand),

    /// Print annotation statistics
    Stats,

    /// Rewrite the store journal in its shortest form
    Compact,
}

#[derive(Subcommand, Debug)]
pub enum DocCommand {
    /// Add a UTF-8 text file
    Add { file: PathBuf },

    /// Create a document from text
    New {
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },

    /// List documents, newest first
    List,

    /// Show a document with its annotations
    Show { id: DocumentId },

    Delete { id: DocumentId },

    /// Mark a document as completed
    Complete { id: DocumentId },
}

#[derive(Subcommand, Debug)]
pub enum KbCommand {
    /// List entries sorted by text
    List,

    /// Add an entry unless the text is already known
    Add { text: String, label: Label },

    Remove { text: String },

    Clear,

    /// Write the knowledge base as JSON
    Export {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Read entries from an export file
    Import { file: PathBuf },
}
