//! Temporary directory helper
//!
//! The directory is removed when the guard is dropped, so tests can hand
//! its path to a database or a local blob bucket without leaking files.

use std::path::{Path, PathBuf};
use std::{fs, io};

/// Temporary directory that is automatically deleted when dropped
///
/// ```
/// # #[cfg(feature = "test-utils")]
/// # {
/// use linkpage_common::testing::TempDir;
///
/// let dir = TempDir::new("linkpage-doc").unwrap();
/// let db_path = dir.join("linkpage.db");
/// assert!(db_path.starts_with(dir.path()));
/// # }
/// ```
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create a new uniquely named directory under the system temp dir
    pub fn new(prefix: &str) -> io::Result<Self> {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Path to the directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of an entry inside the directory (not created)
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Create a subdirectory
    pub fn create_dir(&self, name: &str) -> io::Result<PathBuf> {
        let dir_path = self.path.join(name);
        fs::create_dir_all(&dir_path)?;
        Ok(dir_path)
    }

    /// Write a file with raw bytes and return its path
    pub fn write_file(&self, name: &str, contents: &[u8]) -> io::Result<PathBuf> {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, contents)?;
        Ok(file_path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
