//! Toolset runner: insert a graph fragment or execute a script.
//!
//! Graph fragments merge into the host's active document through the
//! `HostDocument` capability. Scripts load through the `ScriptEngine`
//! capability and must define a zero-argument `execute` entry point.

use crate::domain::{Toolset, ToolsetKind};
use crate::error::{Result, ToolshedError};
use crate::host::{HostDocument, ScriptEngine};

/// Name of the required script entry point.
pub const ENTRY_POINT: &str = "execute";

/// Run a toolset against the host.
pub fn run(toolset: &Toolset, host: &mut dyn HostDocument, engine: &dyn ScriptEngine) -> Result<()> {
    log::info!("Running toolset {}/{} ({})", toolset.owner, toolset.name, toolset.kind.label());
    match toolset.kind {
        ToolsetKind::GraphFragment => insert_fragment(toolset, host),
        ToolsetKind::Script => run_script(toolset, engine),
    }
}

/// Module name a script toolset loads under, unique per toolset so repeated
/// runs of different toolsets cannot collide in the engine's namespace.
pub fn module_name_for(toolset_name: &str) -> String {
    let safe: String = toolset_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("toolset_{}", safe)
}

fn insert_fragment(toolset: &Toolset, host: &mut dyn HostDocument) -> Result<()> {
    let fragment = toolset
        .payload_source()
        .map_err(|e| ToolshedError::Insertion(format!("unreadable payload: {}", e)))?;
    host.merge_fragment(&fragment).map_err(into_insertion)
}

fn run_script(toolset: &Toolset, engine: &dyn ScriptEngine) -> Result<()> {
    let source = toolset.payload_source()?;
    let module_name = module_name_for(&toolset.name);

    // Top-level code runs at load time; its failures are execution failures.
    let module = engine.load(&module_name, &source).map_err(into_execution)?;

    if !module.has_entry(ENTRY_POINT) {
        return Err(ToolshedError::MissingEntryPoint(toolset.name.clone()));
    }

    module.call(ENTRY_POINT).map_err(into_execution)
}

fn into_insertion(err: ToolshedError) -> ToolshedError {
    match err {
        ToolshedError::Insertion(_) => err,
        other => ToolshedError::Insertion(other.to_string()),
    }
}

/// Wrap engine failures as execution errors, carrying the original message
/// for display. Script exceptions are never reinterpreted.
fn into_execution(err: ToolshedError) -> ToolshedError {
    match err {
        ToolshedError::Execution(_) | ToolshedError::MissingEntryPoint(_) => err,
        other => ToolshedError::Execution(other.to_string()),
    }
}
