//! The Toolset record and its two payload kinds.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Metadata;
use crate::error::{Result, ToolshedError};
use crate::storage::sidecar;

/// What a toolset's payload file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolsetKind {
    /// Serialized node-graph fragment, mergeable into the host document
    GraphFragment,
    /// Script module exposing a zero-argument `execute` entry point
    Script,
}

impl ToolsetKind {
    /// Fixed payload file name for this kind.
    pub fn payload_file_name(&self) -> &'static str {
        match self {
            ToolsetKind::GraphFragment => "toolset.nk",
            ToolsetKind::Script => "toolset.py",
        }
    }

    /// Human-readable label used by the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            ToolsetKind::GraphFragment => "graph-fragment",
            ToolsetKind::Script => "script",
        }
    }
}

/// A single toolset discovered under `root/<owner>/<name>/`.
#[derive(Debug, Clone)]
pub struct Toolset {
    pub owner: String,
    pub name: String,
    pub kind: ToolsetKind,
    /// Directory that holds the payload and sidecar
    pub dir: PathBuf,
    pub metadata: Metadata,
}

impl Toolset {
    /// Classify a toolset directory and load its metadata.
    ///
    /// The kind is decided by which payload file is present; both or neither
    /// is `AmbiguousToolset`. A missing or malformed sidecar is not an error:
    /// it logs a warning and defaults to empty metadata so one bad sidecar
    /// never hides the entry.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let name = component_name(&dir)?;
        let owner = dir
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let kind = detect_kind(&dir)?;

        let metadata = match sidecar::read(&dir) {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("Ignoring unreadable sidecar in {}: {}", dir.display(), e);
                Metadata::default()
            }
        };

        Ok(Self {
            owner,
            name,
            kind,
            dir,
            metadata,
        })
    }

    /// Absolute path of the payload file.
    pub fn payload_path(&self) -> PathBuf {
        self.dir.join(self.kind.payload_file_name())
    }

    /// Payload contents as text, for the editor and the runner.
    pub fn payload_source(&self) -> Result<String> {
        Ok(fs::read_to_string(self.payload_path())?)
    }

    /// Short text block summarizing a graph-fragment payload: total node
    /// count, distinct class count, and the most frequent node classes.
    /// Returns `None` for script toolsets.
    ///
    /// Node blocks in a `.nk` payload open with a line like `Blur {`.
    pub fn graph_summary(&self) -> Result<Option<String>> {
        match self.kind {
            ToolsetKind::GraphFragment => {
                let source = self.payload_source()?;
                Ok(Some(summarize_graph(&self.name, &source)))
            }
            ToolsetKind::Script => Ok(None),
        }
    }
}

/// Decide the payload kind from the files present in a toolset directory.
fn detect_kind(dir: &Path) -> Result<ToolsetKind> {
    let nk = dir.join(ToolsetKind::GraphFragment.payload_file_name());
    let py = dir.join(ToolsetKind::Script.payload_file_name());

    match (nk.is_file(), py.is_file()) {
        (true, true) => Err(ToolshedError::AmbiguousToolset {
            path: dir.display().to_string(),
            reason: "found both toolset.nk and toolset.py; keep exactly one payload file".to_string(),
        }),
        (true, false) => Ok(ToolsetKind::GraphFragment),
        (false, true) => Ok(ToolsetKind::Script),
        (false, false) => Err(ToolshedError::AmbiguousToolset {
            path: dir.display().to_string(),
            reason: "no toolset.nk or toolset.py payload file".to_string(),
        }),
    }
}

fn component_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ToolshedError::InvalidName(dir.display().to_string()))
}

fn summarize_graph(name: &str, source: &str) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in source.lines() {
        let line = line.trim();
        let Some(class) = line.strip_suffix('{') else {
            continue;
        };
        let class = class.trim();
        let is_class = !class.is_empty()
            && class.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && !class.contains(char::is_whitespace);
        if is_class {
            *counts.entry(class).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (*k, *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let mut out = vec![
        name.to_string(),
        format!("{} nodes, {} classes", total, ranked.len()),
    ];
    if !ranked.is_empty() {
        out.push("Top classes:".to_string());
        for (class, count) in ranked.iter().take(10) {
            out.push(format!("  {:<22} {}", class, count));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn toolset_dir(temp: &TempDir, owner: &str, name: &str) -> PathBuf {
        let dir = temp.path().join(owner).join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_kind_payload_file_names() {
        assert_eq!(ToolsetKind::GraphFragment.payload_file_name(), "toolset.nk");
        assert_eq!(ToolsetKind::Script.payload_file_name(), "toolset.py");
    }

    #[test]
    fn test_from_dir_detects_graph_fragment() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "BlurSetup");
        fs::write(dir.join("toolset.nk"), "Blur {\n}\n").unwrap();

        let toolset = Toolset::from_dir(&dir).unwrap();
        assert_eq!(toolset.kind, ToolsetKind::GraphFragment);
        assert_eq!(toolset.owner, "alice");
        assert_eq!(toolset.name, "BlurSetup");
    }

    #[test]
    fn test_from_dir_detects_script() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "validate");
        fs::write(dir.join("toolset.py"), "def execute():\n    pass\n").unwrap();

        let toolset = Toolset::from_dir(&dir).unwrap();
        assert_eq!(toolset.kind, ToolsetKind::Script);
    }

    #[test]
    fn test_from_dir_both_payloads_is_ambiguous() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "both");
        fs::write(dir.join("toolset.nk"), "Blur {\n}\n").unwrap();
        fs::write(dir.join("toolset.py"), "def execute():\n    pass\n").unwrap();

        let err = Toolset::from_dir(&dir).unwrap_err();
        assert!(matches!(err, ToolshedError::AmbiguousToolset { .. }));
    }

    #[test]
    fn test_from_dir_no_payload_is_ambiguous() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "empty");

        let err = Toolset::from_dir(&dir).unwrap_err();
        assert!(matches!(err, ToolshedError::AmbiguousToolset { .. }));
    }

    #[test]
    fn test_from_dir_malformed_sidecar_defaults_metadata() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "bad_meta");
        fs::write(dir.join("toolset.nk"), "Blur {\n}\n").unwrap();
        fs::write(dir.join("data.json"), "{not json").unwrap();

        let toolset = Toolset::from_dir(&dir).unwrap();
        assert_eq!(toolset.metadata, Metadata::default());
    }

    #[test]
    fn test_payload_source_reads_file() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "script");
        fs::write(dir.join("toolset.py"), "def execute():\n    pass\n").unwrap();

        let toolset = Toolset::from_dir(&dir).unwrap();
        assert!(toolset.payload_source().unwrap().contains("def execute"));
    }

    #[test]
    fn test_graph_summary_counts_classes() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "comp");
        fs::write(
            dir.join("toolset.nk"),
            "Blur {\n size 10\n}\nBlur {\n}\nMerge2 {\n}\nset cut_paste_input [stack 0]\n",
        )
        .unwrap();

        let toolset = Toolset::from_dir(&dir).unwrap();
        let summary = toolset.graph_summary().unwrap().unwrap();
        assert!(summary.contains("3 nodes, 2 classes"));
        assert!(summary.contains("Blur"));
        assert!(summary.contains("Merge2"));
    }

    #[test]
    fn test_graph_summary_none_for_scripts() {
        let temp = TempDir::new().unwrap();
        let dir = toolset_dir(&temp, "alice", "script");
        fs::write(dir.join("toolset.py"), "def execute():\n    pass\n").unwrap();

        let toolset = Toolset::from_dir(&dir).unwrap();
        assert_eq!(toolset.graph_summary().unwrap(), None);
    }
}
