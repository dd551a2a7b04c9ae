//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list: browse and filter the catalog
//! - owners: list owner directories
//! - show/cat: inspect a single toolset
//! - new-script: create a script toolset
//! - meta: edit a toolset's sidecar

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolshed - browse and edit an on-disk library of node-graph toolsets
#[derive(Parser, Debug)]
#[command(name = "toolshed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List toolsets, optionally filtered
    List {
        /// Case-insensitive name substring
        #[arg(short, long)]
        name: Option<String>,

        /// Comma/space separated tags; a toolset must carry all of them
        #[arg(short, long)]
        tags: Option<String>,

        /// Case-insensitive description substring
        #[arg(short, long)]
        description: Option<String>,

        /// Show only toolsets of this owner
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// List owner directories under the root
    Owners,

    /// Show one toolset: kind, metadata, payload path, graph summary
    Show {
        /// Owner directory name
        owner: String,

        /// Toolset name (case-insensitive)
        name: String,
    },

    /// Print a toolset's payload source to stdout
    Cat {
        /// Owner directory name
        owner: String,

        /// Toolset name (case-insensitive)
        name: String,
    },

    /// Create a script toolset from a file ("-" reads stdin)
    NewScript {
        /// Owner directory name
        owner: String,

        /// New toolset name
        name: String,

        /// Script source file, or "-" for stdin
        file: String,

        /// Sidecar description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Comma/space separated sidecar tags
        #[arg(short, long, default_value = "")]
        tags: String,

        /// Replace an existing toolset of the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// Rewrite a toolset's sidecar metadata
    Meta {
        /// Owner directory name
        owner: String,

        /// Toolset name (case-insensitive)
        name: String,

        /// New description (unchanged when omitted)
        #[arg(short, long)]
        description: Option<String>,

        /// New comma/space separated tags (unchanged when omitted)
        #[arg(short, long)]
        tags: Option<String>,
    },
}
