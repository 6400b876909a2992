use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Backend;

#[derive(Parser, Debug)]
#[command(name = "notes-api")]
#[command(version, about = "A small notes REST API backed by a document store")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// YAML config file
    #[arg(long, global = true, env = "NOTES_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage overrides shared by every command.
#[derive(Args, Debug)]
pub struct StorageArgs {
    /// Directory holding the notes collection
    #[arg(long, global = true, env = "NOTES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend (loro, sqlite)
    #[arg(long, global = true, env = "NOTES_BACKEND")]
    pub backend: Option<Backend>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server until interrupted
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3001
        #[arg(long, env = "NOTES_BIND")]
        bind: Option<String>,

        /// Port to listen on (overrides the port part of the bind address)
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a note
    Add {
        /// Note content
        content: String,

        /// Mark the note as important
        #[arg(long, short = 'i')]
        important: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note by ID
    Get {
        /// Note ID (UUID)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note by ID
    Delete {
        /// Note ID (UUID)
        id: String,
    },
}
