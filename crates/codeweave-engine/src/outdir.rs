//! Output directory lifecycle and the written-file registry.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Marker prefix for hidden directory entries.
///
/// `clean()` skips entries whose names begin with this marker, so caller
/// metadata (VCS directories, editor state) survives a full rebuild.
pub const HIDDEN_ENTRY_MARKER: char = '.';

/// Owns one output root: clean, write, and the registry of absolute paths
/// written since the last clean.
///
/// The registry is per-instance state; it never contains a path twice and
/// is cleared exactly when the root is cleaned.
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
    written: BTreeSet<PathBuf>,
}

impl OutputDir {
    /// Creates a manager for the given root, resolved to an absolute path.
    ///
    /// The root itself is created lazily by the first write.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, EngineError> {
        let root = root.as_ref();
        let absolute =
            std::path::absolute(root).map_err(|source| EngineError::io(root, source))?;
        Ok(Self {
            root: absolute,
            written: BTreeSet::new(),
        })
    }

    /// Returns the resolved absolute output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Empties the output root and resets the written-file registry.
    ///
    /// Direct children whose names begin with [`HIDDEN_ENTRY_MARKER`] are
    /// left untouched; every other entry is removed, regular files by
    /// deletion and everything else as a directory tree. A missing root is
    /// treated as already clean.
    pub fn clean(&mut self) -> Result<(), EngineError> {
        self.written.clear();
        if !self.root.exists() {
            return Ok(());
        }

        let entries =
            fs::read_dir(&self.root).map_err(|source| EngineError::io(&self.root, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| EngineError::io(&self.root, source))?;
            if entry
                .file_name()
                .to_string_lossy()
                .starts_with(HIDDEN_ENTRY_MARKER)
            {
                continue;
            }

            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|source| EngineError::io(&path, source))?;
            if file_type.is_file() {
                fs::remove_file(&path).map_err(|source| EngineError::io(&path, source))?;
            } else {
                fs::remove_dir_all(&path).map_err(|source| EngineError::io(&path, source))?;
            }
        }
        Ok(())
    }

    /// Writes one generated file (create-or-overwrite) and records its
    /// absolute path in the registry.
    ///
    /// Missing parent directories are created recursively. Returns the
    /// absolute path so the caller can fan out notifications.
    pub fn write(&mut self, relative: &Path, content: &str) -> Result<PathBuf, EngineError> {
        let absolute = self.root.join(relative);
        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).map_err(|source| EngineError::io(parent, source))?;
        }
        fs::write(&absolute, content).map_err(|source| EngineError::io(&absolute, source))?;
        self.written.insert(absolute.clone());
        Ok(absolute)
    }

    /// Number of distinct absolute paths written since the last clean.
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    /// Iterates over written paths in sorted order.
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.written.iter().map(PathBuf::as_path)
    }

    /// Returns true if the given absolute path was written since the last
    /// clean.
    pub fn was_written(&self, path: &Path) -> bool {
        self.written.contains(path)
    }
}
