//! Toolset writer: create and overwrite toolsets on disk.
//!
//! Graph-fragment payloads come from the host's current selection; script
//! payloads are source text supplied by the caller. Preconditions (non-empty
//! selection or script, name validity, duplicate check) are enforced before
//! any directory is created, so a failed create leaves nothing on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Metadata, Toolset, ToolsetKind};
use crate::error::{Result, ToolshedError};
use crate::host::HostDocument;
use crate::storage::sidecar;

/// Writes toolsets for one owner under one root.
#[derive(Debug)]
pub struct ToolsetWriter {
    root: PathBuf,
    owner: String,
}

impl ToolsetWriter {
    /// Create a writer for `root/<owner>/`. The owner must be a
    /// filesystem-safe token.
    pub fn new(root: impl AsRef<Path>, owner: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        validate_component(&owner)?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            owner,
        })
    }

    /// Create a graph-fragment toolset from the host's current selection.
    ///
    /// Fails with `EmptySelection` when nothing is selected, leaving no
    /// directory on disk.
    pub fn create_from_selection(
        &self,
        name: &str,
        metadata: &Metadata,
        host: &dyn HostDocument,
        overwrite: bool,
    ) -> Result<Toolset> {
        let fragment = require_selection(host)?;
        self.create(name, ToolsetKind::GraphFragment, &fragment, metadata, overwrite)
    }

    /// Create a script toolset from source text.
    ///
    /// Fails with `EmptyScript` for blank source. Tabs are normalized to four
    /// spaces and a trailing newline is guaranteed.
    pub fn create_script(
        &self,
        name: &str,
        metadata: &Metadata,
        source: &str,
        overwrite: bool,
    ) -> Result<Toolset> {
        if source.trim().is_empty() {
            return Err(ToolshedError::EmptyScript);
        }
        let source = normalize_script(source);
        self.create(name, ToolsetKind::Script, &source, metadata, overwrite)
    }

    /// Rewrite a toolset's sidecar unconditionally.
    pub fn update_metadata(&self, toolset: &mut Toolset, metadata: Metadata) -> Result<()> {
        sidecar::write(&toolset.dir, &metadata)?;
        toolset.metadata = metadata;
        Ok(())
    }

    /// Overwrite a graph-fragment payload from the host's current selection.
    ///
    /// Irreversible; the confirmation gesture belongs to the caller.
    pub fn update_payload_from_selection(&self, toolset: &Toolset, host: &dyn HostDocument) -> Result<()> {
        let fragment = require_selection(host)?;
        fs::write(toolset.payload_path(), fragment)?;
        log::info!("Rewrote payload of {}/{}", toolset.owner, toolset.name);
        Ok(())
    }

    /// Overwrite a script payload with new source text.
    pub fn update_script(&self, toolset: &Toolset, source: &str) -> Result<()> {
        if source.trim().is_empty() {
            return Err(ToolshedError::EmptyScript);
        }
        fs::write(toolset.payload_path(), normalize_script(source))?;
        log::info!("Rewrote payload of {}/{}", toolset.owner, toolset.name);
        Ok(())
    }

    /// Directory a toolset of this owner lives in.
    pub fn toolset_dir(&self, name: &str) -> PathBuf {
        self.root.join(&self.owner).join(name)
    }

    fn create(
        &self,
        name: &str,
        kind: ToolsetKind,
        payload: &str,
        metadata: &Metadata,
        overwrite: bool,
    ) -> Result<Toolset> {
        validate_component(name)?;

        let dir = self.toolset_dir(name);
        if dir.is_dir() {
            if !overwrite {
                return Err(ToolshedError::AlreadyExists(format!("{}/{}", self.owner, name)));
            }
            // Overwriting may switch kinds; the old payload must not linger
            // or the folder becomes ambiguous.
            for other in [ToolsetKind::GraphFragment, ToolsetKind::Script] {
                if other != kind {
                    let stale = dir.join(other.payload_file_name());
                    if stale.is_file() {
                        fs::remove_file(&stale)?;
                    }
                }
            }
        }

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(kind.payload_file_name()), payload)?;
        sidecar::write(&dir, metadata)?;

        log::info!("Created toolset {}/{} ({})", self.owner, name, kind.label());
        Toolset::from_dir(&dir)
    }
}

/// Fetch the host selection, mapping absence to `EmptySelection`.
fn require_selection(host: &dyn HostDocument) -> Result<String> {
    match host.selected_fragment()? {
        Some(fragment) if !fragment.trim().is_empty() => Ok(fragment),
        _ => Err(ToolshedError::EmptySelection),
    }
}

/// Reject owner/name tokens that are empty, traverse the tree, or collide
/// with the scanner's ignore rules.
pub fn validate_component(token: &str) -> Result<()> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(ToolshedError::InvalidName(token.to_string()));
    }
    if trimmed.contains(['/', '\\', '\0']) {
        return Err(ToolshedError::InvalidName(token.to_string()));
    }
    // The scanner would never list these back.
    if trimmed.starts_with('_') || trimmed.starts_with('.') {
        return Err(ToolshedError::InvalidName(token.to_string()));
    }
    Ok(())
}

/// Normalize script text: tabs become four spaces, output ends with a newline.
pub fn normalize_script(source: &str) -> String {
    let mut normalized = source.replace('\t', "    ");
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Fake host with a configurable selection.
    struct FakeHost {
        selection: Option<String>,
    }

    impl HostDocument for FakeHost {
        fn selected_fragment(&self) -> Result<Option<String>> {
            Ok(self.selection.clone())
        }

        fn merge_fragment(&mut self, _fragment: &str) -> Result<()> {
            Ok(())
        }
    }

    fn selected(fragment: &str) -> FakeHost {
        FakeHost {
            selection: Some(fragment.to_string()),
        }
    }

    fn nothing_selected() -> FakeHost {
        FakeHost { selection: None }
    }

    #[test]
    fn test_create_from_selection_writes_payload_and_sidecar() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let meta = Metadata::new("soft blur", vec!["blur".to_string()]);

        let toolset = writer
            .create_from_selection("BlurSetup", &meta, &selected("Blur {\n}\n"), false)
            .unwrap();

        assert_eq!(toolset.kind, ToolsetKind::GraphFragment);
        assert_eq!(toolset.metadata, meta);
        assert!(toolset.payload_path().is_file());
        assert_eq!(sidecar::read(&toolset.dir).unwrap(), meta);
    }

    #[test]
    fn test_create_from_empty_selection_leaves_no_directory() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();

        let err = writer
            .create_from_selection("BlurSetup", &Metadata::default(), &nothing_selected(), false)
            .unwrap_err();

        assert!(matches!(err, ToolshedError::EmptySelection));
        assert!(!writer.toolset_dir("BlurSetup").exists());
    }

    #[test]
    fn test_create_script_normalizes_source() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();

        let toolset = writer
            .create_script("tool", &Metadata::default(), "def execute():\n\tpass", false)
            .unwrap();

        let written = toolset.payload_source().unwrap();
        assert_eq!(written, "def execute():\n    pass\n");
    }

    #[test]
    fn test_create_script_rejects_blank_source() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();

        let err = writer
            .create_script("tool", &Metadata::default(), "   \n", false)
            .unwrap_err();

        assert!(matches!(err, ToolshedError::EmptyScript));
        assert!(!writer.toolset_dir("tool").exists());
    }

    #[test]
    fn test_create_duplicate_fails_without_overwrite() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let meta = Metadata::default();

        writer.create_script("tool", &meta, "def execute():\n    pass\n", false).unwrap();
        let err = writer
            .create_script("tool", &meta, "def execute():\n    pass\n", false)
            .unwrap_err();

        assert!(matches!(err, ToolshedError::AlreadyExists(_)));
    }

    #[test]
    fn test_create_duplicate_succeeds_with_overwrite() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let meta = Metadata::default();

        writer.create_script("tool", &meta, "def execute():\n    return 1\n", false).unwrap();
        let toolset = writer
            .create_script("tool", &meta, "def execute():\n    return 2\n", true)
            .unwrap();

        assert!(toolset.payload_source().unwrap().contains("return 2"));
    }

    #[test]
    fn test_overwrite_switching_kinds_removes_stale_payload() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();

        writer
            .create_from_selection("swap", &Metadata::default(), &selected("Blur {\n}\n"), false)
            .unwrap();
        let toolset = writer
            .create_script("swap", &Metadata::default(), "def execute():\n    pass\n", true)
            .unwrap();

        assert_eq!(toolset.kind, ToolsetKind::Script);
        assert!(!toolset.dir.join("toolset.nk").exists());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();

        for bad in ["", "  ", "a/b", "a\\b", "..", "_draft", ".hidden"] {
            let err = writer
                .create_script(bad, &Metadata::default(), "def execute():\n    pass\n", false)
                .unwrap_err();
            assert!(matches!(err, ToolshedError::InvalidName(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_invalid_owner_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            ToolsetWriter::new(temp.path(), "../escape").unwrap_err(),
            ToolshedError::InvalidName(_)
        ));
    }

    #[test]
    fn test_update_metadata_rewrites_sidecar() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let mut toolset = writer
            .create_script("tool", &Metadata::default(), "def execute():\n    pass\n", false)
            .unwrap();

        let meta = Metadata::new("updated", vec!["new".to_string()]);
        writer.update_metadata(&mut toolset, meta.clone()).unwrap();

        assert_eq!(toolset.metadata, meta);
        assert_eq!(sidecar::read(&toolset.dir).unwrap(), meta);
    }

    #[test]
    fn test_update_payload_requires_selection() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let toolset = writer
            .create_from_selection("comp", &Metadata::default(), &selected("Blur {\n}\n"), false)
            .unwrap();

        let err = writer
            .update_payload_from_selection(&toolset, &nothing_selected())
            .unwrap_err();
        assert!(matches!(err, ToolshedError::EmptySelection));

        // Old payload intact.
        assert_eq!(toolset.payload_source().unwrap(), "Blur {\n}\n");
    }

    #[test]
    fn test_update_payload_from_selection_overwrites() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let toolset = writer
            .create_from_selection("comp", &Metadata::default(), &selected("Blur {\n}\n"), false)
            .unwrap();

        writer
            .update_payload_from_selection(&toolset, &selected("Merge2 {\n}\n"))
            .unwrap();

        assert_eq!(toolset.payload_source().unwrap(), "Merge2 {\n}\n");
    }

    #[test]
    fn test_update_script_rejects_blank_source() {
        let temp = TempDir::new().unwrap();
        let writer = ToolsetWriter::new(temp.path(), "alice").unwrap();
        let toolset = writer
            .create_script("tool", &Metadata::default(), "def execute():\n    pass\n", false)
            .unwrap();

        let err = writer.update_script(&toolset, "").unwrap_err();
        assert!(matches!(err, ToolshedError::EmptyScript));
    }

    #[test]
    fn test_normalize_script() {
        assert_eq!(normalize_script("a\tb"), "a    b\n");
        assert_eq!(normalize_script("line\n"), "line\n");
    }
}
