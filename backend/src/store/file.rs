use crate::store::{BackendError, CatalogStorage, Slot};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "channels.json";
pub const BACKUP_FILE: &str = "channels.json.bak";

/// Keeps the catalog in `channels.json` and its backup in `channels.json.bak`
/// inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, slot: Slot) -> PathBuf {
        match slot {
            Slot::Primary => self.dir.join(CATALOG_FILE),
            Slot::Backup => self.dir.join(BACKUP_FILE),
        }
    }
}

impl CatalogStorage for FileStorage {
    fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>, BackendError> {
        match fs::read(self.path(slot)) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, slot: Slot, body: &[u8]) -> Result<(), BackendError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(slot), body)?;
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<(), BackendError> {
        match fs::remove_file(self.path(slot)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn describe(&self) -> String {
        self.path(Slot::Primary).to_string_lossy().to_string()
    }
}
