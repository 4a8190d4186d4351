//! Filesystem abstraction the rotation is applied through.
//!
//! The rotation logic only ever lists a directory, renames one file and
//! removes a few others. Those operations sit behind [`Filesystem`] so the
//! planner can be exercised against [`MockFilesystem`] without touching disk.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("path error: {0}")]
    Path(String),
}

/// Filesystem operations needed to rotate archives.
pub trait Filesystem: Send + Sync {
    /// Regular files directly inside `dir` (not recursive), in no particular
    /// order. A missing directory yields an empty list.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError>;

    /// Move `from` to `to`, replacing `to` if it exists.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Remove a single file.
    fn remove(&self, path: &Path) -> Result<(), FsError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// Filesystem backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError> {
        let mut files = Vec::new();

        // `Path::new("")` is how a bare file name's parent is spelled.
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        if !dir.is_dir() {
            return Ok(files);
        }

        // Symlinks to regular files count as archives.
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().is_file() {
                files.push(entry.path());
            }
        }

        Ok(files)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            // Destination directory on another filesystem.
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                fs::copy(from, to)?;
                fs::remove_file(from)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// In-memory filesystem for tests.
///
/// Cloning creates a new handle to the same underlying data. Parent
/// directories of added files count as existing directories.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
    protected: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file directly (for test setup).
    pub fn add_file(&self, path: impl Into<PathBuf>, data: Vec<u8>) {
        self.files.write().unwrap().insert(path.into(), data);
    }

    /// Add an empty directory (for test setup).
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.dirs.write().unwrap().insert(path.into());
    }

    /// Make every later `remove` of `path` fail with permission denied.
    pub fn protect(&self, path: impl Into<PathBuf>) {
        self.protected.write().unwrap().insert(path.into());
    }

    /// Contents of a file, if present.
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Every file path, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.read().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Names of the files directly inside `dir`, sorted.
    pub fn file_names_in(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names
    }

    fn not_found(path: &Path) -> FsError {
        FsError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        ))
    }
}

impl Filesystem for MockFilesystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError> {
        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut files = self.files.write().unwrap();
        let data = files.remove(from).ok_or_else(|| Self::not_found(from))?;
        files.insert(to.to_path_buf(), data);
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        if self.protected.read().unwrap().contains(path) {
            return Err(FsError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            )));
        }
        self.files
            .write()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains(path)
            || self
                .files
                .read()
                .unwrap()
                .keys()
                .any(|p| p.ancestors().skip(1).any(|a| a == path))
    }
}
