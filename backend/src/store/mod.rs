//! # Catalog Store
//!
//! Durable storage of the `Catalog` document. The catalog is always read and
//! written whole; there are no partial updates.
//!
//! ## Write protocol
//!
//! 1.  The bytes currently in the primary slot (if any) are copied into the
//!     backup slot. Only the most recent backup is kept.
//! 2.  The new document replaces the primary slot.
//! 3.  If that write fails, the primary slot is restored from the backup slot
//!     (or cleared, when there was nothing to back up), so the store holds
//!     either the previous document or the new one, never a mix.
//!
//! ## Read protocol
//!
//! A missing primary document, or one that is not valid UTF-8 JSON, is replaced by
//! `Catalog::bootstrap()`, which is persisted through the write protocol. The
//! unparsable bytes therefore end up in the backup slot.
//!
//! Two backends implement the slots: `file::FileStorage` (a JSON file next to
//! its `.bak` copy) and `sqlite::SqliteStorage` (a two-row table). There is no
//! locking between writers: concurrent saves race and the last one wins.

pub mod file;
pub mod sqlite;

use common::model::catalog::Catalog;
use log::{info, warn};

/// The two document slots every backend provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Primary,
    Backup,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Backup => "backup",
        }
    }
}

/// Error raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("storage connection lock poisoned")]
    Poisoned,
}

/// Error returned by `CatalogStore` operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("catalog storage unavailable: {0}")]
    Unavailable(#[source] BackendError),

    #[error("failed to write catalog, previous version restored: {0}")]
    WriteFailed(#[source] BackendError),

    #[error("failed to write catalog ({write}) and to restore the previous version ({restore})")]
    RestoreFailed {
        write: BackendError,
        restore: BackendError,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Raw slot access implemented by each backend.
pub trait CatalogStorage: Send + Sync {
    /// Raw bytes of the slot, `None` when it has never been written. The
    /// bytes are not required to be valid UTF-8.
    fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>, BackendError>;

    fn write(&self, slot: Slot, body: &[u8]) -> Result<(), BackendError>;

    /// Removing an empty slot is not an error.
    fn remove(&self, slot: Slot) -> Result<(), BackendError>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}

/// Loads and saves the catalog on top of a `CatalogStorage`.
pub struct CatalogStore {
    storage: Box<dyn CatalogStorage>,
}

impl CatalogStore {
    pub fn new(storage: impl CatalogStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Reads the catalog, bootstrapping a default one when the stored
    /// document is missing or cannot be parsed.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        match self
            .storage
            .read(Slot::Primary)
            .map_err(StoreError::Unavailable)?
        {
            Some(body) => match serde_json::from_slice::<Catalog>(&body) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => warn!(
                    "Catalog at {} is corrupt ({}); replacing it with the default catalog",
                    self.storage.describe(),
                    e
                ),
            },
            None => info!(
                "No catalog found at {}; creating the default catalog",
                self.storage.describe()
            ),
        }

        let catalog = Catalog::bootstrap();
        self.save(&catalog)?;
        Ok(catalog)
    }

    /// Replaces the stored catalog, backing up the previous document first.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(catalog)?;

        let previous = self
            .storage
            .read(Slot::Primary)
            .map_err(StoreError::Unavailable)?;
        if let Some(previous) = &previous {
            self.storage
                .write(Slot::Backup, previous)
                .map_err(StoreError::Unavailable)?;
        }

        let write = match self.storage.write(Slot::Primary, &body) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        warn!(
            "Failed to write catalog to {}: {}; restoring previous version",
            self.storage.describe(),
            write
        );

        let restored = if previous.is_some() {
            self.restore_from_backup()
        } else {
            self.storage.remove(Slot::Primary)
        };

        match restored {
            Ok(()) => Err(StoreError::WriteFailed(write)),
            Err(restore) => {
                warn!(
                    "Failed to restore catalog at {}: {}",
                    self.storage.describe(),
                    restore
                );
                Err(StoreError::RestoreFailed { write, restore })
            }
        }
    }

    fn restore_from_backup(&self) -> Result<(), BackendError> {
        match self.storage.read(Slot::Backup)? {
            Some(backup) => self.storage.write(Slot::Primary, &backup),
            None => self.storage.remove(Slot::Primary),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use common::model::banner::Banner;
    use common::model::catalog::Category;
    use common::model::channel::Channel;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory slots. `fail_primary_writes` makes the next primary writes
    /// store half of the document and then fail, like an interrupted write.
    #[derive(Default)]
    pub(crate) struct MemoryStorage {
        pub(crate) slots: Mutex<HashMap<Slot, Vec<u8>>>,
        pub(crate) fail_primary_writes: Mutex<usize>,
        pub(crate) fail_all_writes: Mutex<bool>,
    }

    impl CatalogStorage for MemoryStorage {
        fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>, BackendError> {
            Ok(self.slots.lock().unwrap().get(&slot).cloned())
        }

        fn write(&self, slot: Slot, body: &[u8]) -> Result<(), BackendError> {
            if *self.fail_all_writes.lock().unwrap() {
                return Err(std::io::Error::other("disk full").into());
            }
            let mut failures = self.fail_primary_writes.lock().unwrap();
            if slot == Slot::Primary && *failures > 0 {
                *failures -= 1;
                let half = body[..body.len() / 2].to_vec();
                self.slots.lock().unwrap().insert(slot, half);
                return Err(std::io::Error::other("write interrupted").into());
            }
            self.slots.lock().unwrap().insert(slot, body.to_vec());
            Ok(())
        }

        fn remove(&self, slot: Slot) -> Result<(), BackendError> {
            self.slots.lock().unwrap().remove(&slot);
            Ok(())
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    /// Lets a test keep a handle on the storage it gives to the store.
    impl CatalogStorage for std::sync::Arc<MemoryStorage> {
        fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>, BackendError> {
            self.as_ref().read(slot)
        }

        fn write(&self, slot: Slot, body: &[u8]) -> Result<(), BackendError> {
            self.as_ref().write(slot, body)
        }

        fn remove(&self, slot: Slot) -> Result<(), BackendError> {
            self.as_ref().remove(slot)
        }

        fn describe(&self) -> String {
            self.as_ref().describe()
        }
    }

    pub(crate) fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::bootstrap();
        catalog.categories.insert(
            "medicina".to_string(),
            Category::new("Medicina", "Canais para quem sonha com medicina"),
        );
        catalog.featured_channels.push(Channel {
            id: "UCfisica".to_string(),
            name: "Física Total".to_string(),
            subject: "Física".to_string(),
            category: "vestibular".to_string(),
            thumbnail: "https://yt3.example/fisica.jpg".to_string(),
            featured: true,
        });
        catalog.banners.cover = Some(Banner::linked(
            "https://img.example/cover.png",
            "https://studyflix.example",
        ));
        catalog
    }

    fn store_with_handle() -> (CatalogStore, std::sync::Arc<MemoryStorage>) {
        let storage = std::sync::Arc::new(MemoryStorage::default());
        (CatalogStore::new(storage.clone()), storage)
    }

    #[test]
    fn load_bootstraps_and_persists_default_catalog() {
        let (store, storage) = store_with_handle();

        let catalog = store.load().unwrap();
        assert_eq!(catalog, Catalog::bootstrap());

        let persisted = storage.read(Slot::Primary).unwrap().unwrap();
        assert_eq!(serde_json::from_slice::<Catalog>(&persisted).unwrap(), catalog);
        assert!(storage.read(Slot::Backup).unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (store, _) = store_with_handle();
        store.load().unwrap();

        let catalog = sample_catalog();
        store.save(&catalog).unwrap();
        assert_eq!(store.load().unwrap(), catalog);
    }

    #[test]
    fn save_keeps_only_the_previous_document_as_backup() {
        let (store, storage) = store_with_handle();
        let first = store.load().unwrap();
        let second = sample_catalog();
        let mut third = second.clone();
        third.featured_channels.clear();

        store.save(&second).unwrap();
        store.save(&third).unwrap();

        let backup = storage.read(Slot::Backup).unwrap().unwrap();
        let backup: Catalog = serde_json::from_slice(&backup).unwrap();
        assert_eq!(backup, second);
        assert_ne!(backup, first);
    }

    #[test]
    fn corrupt_document_is_replaced_and_kept_as_backup() {
        let (store, storage) = store_with_handle();
        storage
            .write(Slot::Primary, b"{\"featured_channels\": [ oops")
            .unwrap();

        let catalog = store.load().unwrap();
        assert_eq!(catalog, Catalog::bootstrap());
        assert_eq!(
            storage.read(Slot::Backup).unwrap().as_deref(),
            Some(&b"{\"featured_channels\": [ oops"[..])
        );
    }

    #[test]
    fn non_utf8_document_is_treated_as_corrupt() {
        let (store, storage) = store_with_handle();
        let garbage = [0xff, 0xfe, b'{', b'}'];
        storage.write(Slot::Primary, &garbage).unwrap();

        assert_eq!(store.load().unwrap(), Catalog::bootstrap());
        assert_eq!(
            storage.read(Slot::Backup).unwrap().as_deref(),
            Some(&garbage[..])
        );
    }

    #[test]
    fn interrupted_write_restores_previous_document() {
        let (store, storage) = store_with_handle();
        store.load().unwrap();
        let before = sample_catalog();
        store.save(&before).unwrap();

        *storage.fail_primary_writes.lock().unwrap() = 1;
        let mut after = before.clone();
        after.categories.clear();

        let err = store.save(&after).unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn interrupted_first_write_leaves_store_empty() {
        let (store, storage) = store_with_handle();
        *storage.fail_primary_writes.lock().unwrap() = 1;

        let err = store.save(&sample_catalog()).unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed(_)));
        assert!(storage.read(Slot::Primary).unwrap().is_none());
    }

    #[test]
    fn failing_backup_aborts_before_touching_primary() {
        let (store, storage) = store_with_handle();
        let original = store.load().unwrap();
        *storage.fail_all_writes.lock().unwrap() = true;

        let err = store.save(&sample_catalog()).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        *storage.fail_all_writes.lock().unwrap() = false;
        assert_eq!(store.load().unwrap(), original);
    }
}
