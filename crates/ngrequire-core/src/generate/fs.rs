//! Filesystem collaborator rooted at the project directory

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tracing::info;

/// What to do when a generated file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingFiles {
    #[default]
    Overwrite,
    /// Files present before the run are never written, including by the
    /// later rewrites of the generation units
    Keep,
}

/// Result of emitting one generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    Written,
    Kept,
}

/// Project directory that generated files are written into
///
/// All paths passed in are relative to the root. Writes create missing
/// parent directories. Clones share the record of kept files.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    existing: ExistingFiles,
    kept: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            existing: ExistingFiles::default(),
            kept: Arc::default(),
        }
    }

    pub fn with_existing(mut self, existing: ExistingFiles) -> Self {
        self.existing = existing;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub async fn exists(&self, relative: impl AsRef<Path>) -> bool {
        fs::try_exists(self.path(relative)).await.unwrap_or(false)
    }

    pub async fn read_to_string(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.path(relative);
        fs::read_to_string(&path).await.map_err(Error::io("read", &path))
    }

    /// Whether `relative` was left alone by an earlier [`Workspace::emit`]
    pub fn is_kept(&self, relative: impl AsRef<Path>) -> bool {
        self.kept
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(relative.as_ref())
    }

    pub async fn write(
        &self,
        relative: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(Error::io("create directory", parent))?;
        }
        fs::write(&path, contents.as_ref())
            .await
            .map_err(Error::io("write", &path))
    }

    /// Write a generated file, honoring the existing-file policy
    pub async fn emit(
        &self,
        relative: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> Result<Emitted> {
        let relative = relative.as_ref();
        if self.existing == ExistingFiles::Keep && self.exists(relative).await {
            info!(path = %relative.display(), "keeping existing file");
            self.kept
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(relative.to_path_buf());
            return Ok(Emitted::Kept);
        }
        self.write(relative, contents).await?;
        Ok(Emitted::Written)
    }

    /// Rewrite a file generated earlier in the run, unless it was kept
    pub async fn update(
        &self,
        relative: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> Result<Emitted> {
        let relative = relative.as_ref();
        if self.is_kept(relative) {
            info!(path = %relative.display(), "leaving kept file unchanged");
            return Ok(Emitted::Kept);
        }
        self.write(relative, contents).await?;
        Ok(Emitted::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());

        ws.write("a/b/c.txt", "hello").await.unwrap();
        assert!(ws.exists("a/b/c.txt").await);
        assert_eq!(ws.read_to_string("a/b/c.txt").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_read_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());

        let err = ws.read_to_string("missing.txt").await.unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[tokio::test]
    async fn test_emit_respects_keep_policy() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("kept.txt"), "mine").unwrap();

        let keep = Workspace::new(dir.path()).with_existing(ExistingFiles::Keep);
        assert_eq!(keep.emit("kept.txt", "generated").await.unwrap(), Emitted::Kept);
        assert_eq!(keep.emit("new.txt", "generated").await.unwrap(), Emitted::Written);
        assert_eq!(keep.read_to_string("kept.txt").await.unwrap(), "mine");

        let overwrite = Workspace::new(dir.path());
        overwrite.emit("kept.txt", "generated").await.unwrap();
        assert_eq!(overwrite.read_to_string("kept.txt").await.unwrap(), "generated");
    }

    #[tokio::test]
    async fn test_update_skips_files_kept_by_any_clone() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("kept.txt"), "mine").unwrap();
        let keep = Workspace::new(dir.path()).with_existing(ExistingFiles::Keep);
        let shared = keep.clone();

        keep.emit("kept.txt", "generated").await.unwrap();
        keep.emit("fresh.txt", "generated").await.unwrap();

        assert!(shared.is_kept("kept.txt"));
        assert_eq!(shared.update("kept.txt", "rewritten").await.unwrap(), Emitted::Kept);
        assert_eq!(shared.read_to_string("kept.txt").await.unwrap(), "mine");

        assert_eq!(shared.update("fresh.txt", "rewritten").await.unwrap(), Emitted::Written);
        assert_eq!(shared.read_to_string("fresh.txt").await.unwrap(), "rewritten");
    }
}
