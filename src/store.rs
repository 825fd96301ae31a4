// src/store.rs
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Backup,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "read"),
            Stage::Backup => write!(f, "back up"),
            Stage::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to {stage} {}: {source}", .path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Backup {} is missing or incomplete", .0.display())]
    BackupMissing(PathBuf),
}

impl StoreError {
    fn io(stage: Stage, path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            stage,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The on-disk state file and its sibling backup.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
    backup_suffix: String,
}

impl StateFile {
    pub fn new<P: Into<PathBuf>>(path: P, backup_suffix: &str) -> Self {
        Self {
            path: path.into(),
            backup_suffix: backup_suffix.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The original file name with the backup suffix appended.
    pub fn backup_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(&self.backup_suffix);
        self.path.with_file_name(name)
    }

    pub fn read(&self) -> Result<Vec<u8>, StoreError> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
            _ => StoreError::io(Stage::Read, &self.path, e),
        })
    }

    /// Copies the current file to the backup path and checks that the copy
    /// holds `original.len()` bytes.
    pub fn backup(&self, original: &[u8]) -> Result<PathBuf, StoreError> {
        let backup = self.backup_path();
        fs::copy(&self.path, &backup).map_err(|e| StoreError::io(Stage::Backup, &backup, e))?;

        match fs::metadata(&backup) {
            Ok(meta) if meta.is_file() && meta.len() == original.len() as u64 => {}
            _ => return Err(StoreError::BackupMissing(backup)),
        }

        info!("Backup created: {}", backup.display());
        Ok(backup)
    }

    /// Replaces the file with `contents` through a temp file in the same
    /// directory, keeping the original permissions. A symlinked path is
    /// resolved first so the link keeps pointing at the rewritten file.
    pub fn replace(&self, contents: &[u8]) -> Result<(), StoreError> {
        let write_err = |e: io::Error| StoreError::io(Stage::Write, &self.path, e);

        let target = fs::canonicalize(&self.path).map_err(write_err)?;
        let dir = target.parent().unwrap_or_else(|| Path::new("/"));
        let permissions = fs::metadata(&target).map_err(write_err)?.permissions();

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(contents).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        fs::set_permissions(tmp.path(), permissions).map_err(write_err)?;
        tmp.persist(&target).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Backs up the current file, then writes `contents` over it. The
    /// original is not touched unless the backup succeeded.
    pub fn write_with_backup(&self, original: &[u8], contents: &[u8]) -> Result<PathBuf, StoreError> {
        let backup = self.backup(original)?;
        self.replace(contents)?;
        Ok(backup)
    }
}
