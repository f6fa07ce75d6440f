//! Output tree writer.
//!
//! Directories below the output root are created strictly: an existing
//! directory is an error, so a second run against the same root fails
//! before touching anything it already wrote. Files are written fresh.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::RenderError;

/// Counts of what an emitter produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Directories created below the output root.
    pub directories: usize,
    /// Files written.
    pub files: usize,
}

/// Writes files under a single output root and tracks an [`EmitSummary`].
#[derive(Debug)]
pub struct OutputWriter {
    root: PathBuf,
    written: HashSet<PathBuf>,
    summary: EmitSummary,
}

impl OutputWriter {
    /// Opens the output root, creating it (and its parents) if missing.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Write` if the root cannot be created.
    pub fn open(root: &Path) -> Result<Self, RenderError> {
        fs::create_dir_all(root).map_err(|source| RenderError::Write {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            written: HashSet::new(),
            summary: EmitSummary::default(),
        })
    }

    /// The output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates `root/relative`, which must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::DirectoryExists` if the directory exists, or
    /// `RenderError::Write` for any other I/O failure.
    pub fn create_dir(&mut self, relative: &Path) -> Result<PathBuf, RenderError> {
        let path = self.root.join(relative);
        match fs::create_dir(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "created directory");
                self.summary.directories += 1;
                Ok(path)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(RenderError::DirectoryExists { path })
            }
            Err(source) => Err(RenderError::Write { path, source }),
        }
    }

    /// Writes `content` to `root/relative`, replacing any file written
    /// earlier in this run under the same name.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Write` if the file cannot be written.
    pub fn write_file(&mut self, relative: &Path, content: &str) -> Result<(), RenderError> {
        let path = self.root.join(relative);
        fs::write(&path, content).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        if self.written.insert(path.clone()) {
            self.summary.files += 1;
        } else {
            warn!(path = %path.display(), "duplicate output file overwritten");
        }
        Ok(())
    }

    /// Writes `content` to `root/relative`, which must not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::OutputExists` if the file exists, or
    /// `RenderError::Write` for any other I/O failure.
    pub fn create_file(&mut self, relative: &Path, content: &str) -> Result<(), RenderError> {
        let path = self.root.join(relative);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(RenderError::OutputExists { path });
            }
            Err(source) => return Err(RenderError::Write { path, source }),
        };
        file.write_all(content.as_bytes())
            .map_err(|source| RenderError::Write {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        self.written.insert(path);
        self.summary.files += 1;
        Ok(())
    }

    /// Consumes the writer and returns what it produced.
    #[must_use]
    pub fn finish(self) -> EmitSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested/out");
        let writer = OutputWriter::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(writer.root(), root);
    }

    #[test]
    fn test_open_accepts_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(OutputWriter::open(dir.path()).is_ok());
    }

    #[test]
    fn test_create_dir_is_strict() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::open(dir.path()).unwrap();
        writer.create_dir(Path::new("github")).unwrap();
        let err = writer.create_dir(Path::new("github")).unwrap_err();
        assert!(matches!(err, RenderError::DirectoryExists { .. }));
    }

    #[test]
    fn test_create_dir_without_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::open(dir.path()).unwrap();
        let err = writer.create_dir(Path::new("a/b")).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
    }

    #[test]
    fn test_write_file_counts_unique_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::open(dir.path()).unwrap();
        writer.create_dir(Path::new("ns")).unwrap();
        writer.write_file(Path::new("ns/a.md"), "first").unwrap();
        writer.write_file(Path::new("ns/a.md"), "second").unwrap();
        writer.write_file(Path::new("ns/b.md"), "b").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("ns/a.md")).unwrap(),
            "second"
        );
        let summary = writer.finish();
        assert_eq!(summary, EmitSummary { directories: 1, files: 2 });
    }

    #[test]
    fn test_create_file_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = OutputWriter::open(dir.path()).unwrap();
        writer.create_file(Path::new("mono.md"), "x").unwrap();
        let err = writer.create_file(Path::new("mono.md"), "y").unwrap_err();
        assert!(matches!(err, RenderError::OutputExists { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("mono.md")).unwrap(), "x");
    }
}
