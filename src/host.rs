//! Capability traits for the embedding host.
//!
//! The crate never links against the compositing application. Everything the
//! runner and writer need from it is expressed as two narrow traits: the
//! active document (selection and fragment merging) and a script engine
//! (loading source text into an isolated module and calling into it). The
//! host plugin implements these with the real APIs; tests implement fakes.

use crate::error::Result;

/// The host's active node-graph document.
pub trait HostDocument {
    /// Serialize the current node selection to fragment text.
    /// Returns `None` when nothing is selected.
    fn selected_fragment(&self) -> Result<Option<String>>;

    /// Merge serialized fragment text into the active document at the
    /// host-determined insertion point.
    fn merge_fragment(&mut self, fragment: &str) -> Result<()>;
}

/// Loads script source text as a module in an isolated namespace.
///
/// Scripts run with the host process's full privileges. There is no
/// sandboxing: callers must trust the source of the toolset.
pub trait ScriptEngine {
    /// Load source under a module name unique to the toolset, executing the
    /// module's top-level code.
    fn load(&self, module_name: &str, source: &str) -> Result<Box<dyn ScriptModule>>;
}

/// A loaded script module and its callable entry points.
pub trait ScriptModule {
    /// Whether the module defines a callable with this name.
    fn has_entry(&self, name: &str) -> bool;

    /// Invoke a zero-argument callable by name. The return value of the
    /// callable is ignored; failures it raises propagate to the caller.
    fn call(&self, name: &str) -> Result<()>;
}
