//! services/summarizer/src/adapters/file_store.rs
//!
//! A `SessionStore` backed by a single small file, the terminal counterpart
//! of a browser's local storage entry.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use summarizer_core::{PortError, PortResult, SessionStore};

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_err(&self, action: &str, e: std::io::Error) -> PortError {
        PortError::Storage(format!("failed to {action} {}: {e}", self.path.display()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> PortResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.storage_err("read", e)),
        }
    }

    fn set(&self, session_id: &str) -> PortResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.storage_err("create directory for", e))?;
        }
        std::fs::write(&self.path, session_id).map_err(|e| self.storage_err("write", e))
    }

    fn clear(&self) -> PortResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_err("delete", e)),
        }
    }
}
