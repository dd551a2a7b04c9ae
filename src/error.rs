//! Error types for Toolshed
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Toolshed
#[derive(Debug, Error)]
pub enum ToolshedError {
    /// Toolset directory holds both payload kinds, or neither
    #[error("Ambiguous toolset at {path}: {reason}")]
    AmbiguousToolset { path: String, reason: String },

    /// Creating or updating a graph-fragment toolset with nothing selected in the host
    #[error("Nothing is selected in the host document")]
    EmptySelection,

    /// Creating or updating a script toolset with empty source text
    #[error("Script toolset has no source text")]
    EmptyScript,

    /// A toolset with the same owner and name already exists
    #[error("Toolset already exists: {0}")]
    AlreadyExists(String),

    /// Owner or toolset name is not a filesystem-safe token
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Script payload does not define the required entry point
    #[error("Script toolset '{0}' defines no execute() entry point")]
    MissingEntryPoint(String),

    /// Script entry point raised during the call
    #[error("Script execution failed: {0}")]
    Execution(String),

    /// Merging a graph fragment into the host document failed
    #[error("Fragment insertion failed: {0}")]
    Insertion(String),

    /// Owner or toolset lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Toolshed operations
pub type Result<T> = std::result::Result<T, ToolshedError>;
