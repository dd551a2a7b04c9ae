//! Domain types for toolsets
//!
//! A toolset is a named, owned directory holding exactly one payload file
//! (a serialized node-graph fragment or a script) plus a metadata sidecar.

mod metadata;
mod toolset;

pub use metadata::Metadata;
pub use toolset::{Toolset, ToolsetKind};
