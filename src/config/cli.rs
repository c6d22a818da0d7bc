use crate::core::Storage;
use crate::utils::error::{FinderError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads reference tables from the local filesystem. Relative paths resolve against
/// `base_path`, absolute paths are used as-is.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.base_path.join(Path::new(path))
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve_path(path);
        fs::read(&full_path).map_err(|source| FinderError::MissingReferenceFile {
            path: full_path.display().to_string(),
            source,
        })
    }
}
