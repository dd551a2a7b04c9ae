//! Toolshed - a browser/editor for an on-disk library of node-graph toolsets
//!
//! Toolsets live under `root/<owner>/<name>/` as a payload file (a serialized
//! graph fragment or a script) plus a `data.json` sidecar. The host
//! application's document and script interpreter are consumed through the
//! capability traits in [`host`].

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod host;
pub mod runner;
pub mod storage;
pub mod writer;

pub use error::{Result, ToolshedError};
