//! CLI module for toolshed - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for browsing the catalog,
//! inspecting payloads, creating script toolsets, and editing metadata.

pub mod commands;

pub use commands::Cli;
