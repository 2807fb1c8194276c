use super::{decode, encode, CollectionBackend};
use crate::error::{Result, VaultError};
use crate::model::Coin;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A collection kept in a single JSON file.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> VaultError {
        VaultError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl CollectionBackend for FileBackend {
    fn load(&self) -> Result<Option<Vec<Coin>>> {
        if !self.path.exists() {
            log::debug!("No collection file at {}", self.path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        decode(&self.path, &content).map(Some)
    }

    fn save(&self, coins: &[Coin]) -> Result<()> {
        let content = encode(coins)?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| self.storage_error(e))?;
        }

        // Write next to the target, then swap it in
        let tmp_file = dir.join(format!(".coins-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(|e| self.storage_error(e))?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(self.storage_error(e));
        }

        log::debug!("Saved {} coins to {}", coins.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
