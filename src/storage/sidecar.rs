//! Sidecar metadata persistence.
//!
//! Every toolset directory carries a small `data.json` sidecar with its
//! description and tags. Writes go through a temp file and an atomic rename,
//! so a reader concurrent with an interrupted write sees either the old or
//! the new document, never a partial one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Metadata;
use crate::error::Result;

/// File name of the metadata sidecar inside a toolset directory.
pub const SIDECAR_FILE: &str = "data.json";

const SIDECAR_TMP: &str = "data.json.tmp";

/// Path of the sidecar inside a toolset directory.
pub fn sidecar_path(toolset_dir: impl AsRef<Path>) -> PathBuf {
    toolset_dir.as_ref().join(SIDECAR_FILE)
}

/// Read the sidecar of a toolset directory.
///
/// A missing sidecar is not an error and yields empty metadata; a malformed
/// one is a JSON error for the caller to recover from.
pub fn read(toolset_dir: impl AsRef<Path>) -> Result<Metadata> {
    let path = sidecar_path(&toolset_dir);
    if !path.is_file() {
        return Ok(Metadata::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replace the sidecar of a toolset directory.
///
/// The document is written to `data.json.tmp` in the same directory and then
/// renamed over `data.json`; mid-write failure leaves the previous sidecar
/// untouched.
pub fn write(toolset_dir: impl AsRef<Path>, metadata: &Metadata) -> Result<()> {
    let dir = toolset_dir.as_ref();
    let tmp = dir.join(SIDECAR_TMP);
    let mut content = serde_json::to_string_pretty(metadata)?;
    content.push('\n');
    fs::write(&tmp, content)?;
    fs::rename(&tmp, sidecar_path(dir))?;
    Ok(())
}
