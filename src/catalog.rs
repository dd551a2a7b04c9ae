//! Catalog scanner: discovery of toolsets under a root directory.
//!
//! The layout is two levels deep: `root/<owner>/<name>/`. A scan returns a
//! snapshot; it is stale as soon as the filesystem changes, and callers
//! rescan to observe updates. Folders that cannot be classified are kept as
//! diagnostics instead of aborting the scan.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Toolset;
use crate::error::{Result, ToolshedError};

/// A toolset directory the scanner could not load, with the reason.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub path: PathBuf,
    pub message: String,
}

/// Snapshot of all toolsets discovered under a root at scan time.
#[derive(Debug, Default)]
pub struct Catalog {
    root: PathBuf,
    toolsets: Vec<Toolset>,
    scan_errors: Vec<ScanError>,
}

impl Catalog {
    /// Scan a root directory for `owner/name` toolset folders.
    ///
    /// A missing root yields an empty catalog: callers handle absence.
    /// Entries whose name starts with `_` or `.` are ignored on both levels,
    /// as is `.DS_Store` litter. Folders with an ambiguous payload are
    /// recorded in `scan_errors` and excluded, so one bad folder never hides
    /// the rest of the catalog.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut catalog = Self {
            root: root.clone(),
            toolsets: Vec::new(),
            scan_errors: Vec::new(),
        };

        if !root.is_dir() {
            log::info!("Toolsets root {} does not exist, catalog is empty", root.display());
            return Ok(catalog);
        }

        for owner_dir in sorted_dirs(&root)? {
            for toolset_dir in sorted_dirs(&owner_dir)? {
                match Toolset::from_dir(&toolset_dir) {
                    Ok(toolset) => catalog.toolsets.push(toolset),
                    Err(e) => {
                        log::warn!("Skipping {}: {}", toolset_dir.display(), e);
                        catalog.scan_errors.push(ScanError {
                            path: toolset_dir,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        log::info!(
            "Scanned {}: {} toolsets, {} skipped",
            catalog.root.display(),
            catalog.toolsets.len(),
            catalog.scan_errors.len()
        );
        Ok(catalog)
    }

    /// Root this catalog was scanned from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All discovered toolsets, in owner/name order.
    pub fn toolsets(&self) -> &[Toolset] {
        &self.toolsets
    }

    /// Distinct owner names, in directory order.
    pub fn owners(&self) -> Vec<String> {
        let mut owners: Vec<String> = self.toolsets.iter().map(|t| t.owner.clone()).collect();
        owners.dedup();
        owners
    }

    /// Look up a single toolset. The name comparison trims whitespace and
    /// ignores case; the owner must match exactly.
    pub fn get(&self, owner: &str, name: &str) -> Option<&Toolset> {
        let target = name.trim().to_lowercase();
        self.toolsets
            .iter()
            .find(|t| t.owner == owner && t.name.trim().to_lowercase() == target)
    }

    /// Like [`get`](Self::get), but a miss is an error naming the owner's
    /// available toolsets.
    pub fn require(&self, owner: &str, name: &str) -> Result<&Toolset> {
        self.get(owner, name).ok_or_else(|| {
            let available: Vec<&str> = self
                .toolsets
                .iter()
                .filter(|t| t.owner == owner)
                .map(|t| t.name.as_str())
                .collect();
            ToolshedError::NotFound(format!(
                "toolset '{}' for owner '{}'; available: {:?}",
                name, owner, available
            ))
        })
    }

    /// Folders the scan could not load.
    pub fn scan_errors(&self) -> &[ScanError] {
        &self.scan_errors
    }

    pub fn len(&self) -> usize {
        self.toolsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolsets.is_empty()
    }
}

/// Subdirectories of `dir` that are not ignored, sorted by name.
fn sorted_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_ignored(&name) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Directory names the scanner never descends into.
fn is_ignored(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.') || name == ".DS_Store"
}
