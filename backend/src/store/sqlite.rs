use crate::store::{BackendError, CatalogStorage, Slot};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keeps the catalog as a single document in an SQLite database.
///
/// The `catalog_documents` table holds at most two rows, one per slot. Bodies
/// are stored as raw bytes so a corrupt document survives into the backup row.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStorage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        Self::with_connection(conn, path)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, BackendError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, PathBuf::from(":memory:"))
    }

    fn with_connection(conn: Connection, path: PathBuf) -> Result<Self, BackendError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS catalog_documents (
                slot TEXT PRIMARY KEY,
                body BLOB NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }
}

impl CatalogStorage for SqliteStorage {
    fn read(&self, slot: Slot) -> Result<Option<Vec<u8>>, BackendError> {
        let conn = self.conn.lock().map_err(|_| BackendError::Poisoned)?;
        let result = conn.query_row(
            "SELECT body FROM catalog_documents WHERE slot = ?1",
            params![slot.as_str()],
            |row| row.get::<_, Vec<u8>>(0),
        );
        match result {
            Ok(body) => Ok(Some(body)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, slot: Slot, body: &[u8]) -> Result<(), BackendError> {
        let conn = self.conn.lock().map_err(|_| BackendError::Poisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO catalog_documents (slot, body) VALUES (?1, ?2)",
            params![slot.as_str(), body],
        )?;
        Ok(())
    }

    fn remove(&self, slot: Slot) -> Result<(), BackendError> {
        let conn = self.conn.lock().map_err(|_| BackendError::Poisoned)?;
        conn.execute(
            "DELETE FROM catalog_documents WHERE slot = ?1",
            params![slot.as_str()],
        )?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_catalog;
    use crate::store::CatalogStore;
    use common::model::catalog::Catalog;

    #[test]
    fn round_trips_through_database_file() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("studyflix.sqlite");

        let store = CatalogStore::new(SqliteStorage::open(&db).unwrap());
        assert_eq!(store.load().unwrap(), Catalog::bootstrap());
        store.save(&sample_catalog()).unwrap();
        drop(store);

        let reopened = CatalogStore::new(SqliteStorage::open(&db).unwrap());
        assert_eq!(reopened.load().unwrap(), sample_catalog());
    }

    #[test]
    fn backup_row_holds_previous_document() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("studyflix.sqlite");
        let storage = SqliteStorage::open(&db).unwrap();
        storage.write(Slot::Primary, b"{}").unwrap();
        let store = CatalogStore::new(storage);

        // `{}` is a valid, empty catalog.
        assert_eq!(store.load().unwrap(), Catalog::default());
        store.save(&sample_catalog()).unwrap();
        assert_eq!(store.load().unwrap(), sample_catalog());
        drop(store);

        let storage = SqliteStorage::open(&db).unwrap();
        assert_eq!(storage.read(Slot::Backup).unwrap().as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn corrupt_row_is_kept_as_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("studyflix.sqlite");
        let garbage = [0xff, 0xfe, b'{', b'}'];
        SqliteStorage::open(&db)
            .unwrap()
            .write(Slot::Primary, &garbage)
            .unwrap();

        let store = CatalogStore::new(SqliteStorage::open(&db).unwrap());
        assert_eq!(store.load().unwrap(), Catalog::bootstrap());
        drop(store);

        let storage = SqliteStorage::open(&db).unwrap();
        assert_eq!(storage.read(Slot::Backup).unwrap().as_deref(), Some(&garbage[..]));
    }

    #[test]
    fn slots_are_independent() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.write(Slot::Primary, b"a").unwrap();
        storage.write(Slot::Backup, b"b").unwrap();
        storage.write(Slot::Primary, b"c").unwrap();

        assert_eq!(storage.read(Slot::Primary).unwrap().as_deref(), Some(&b"c"[..]));
        assert_eq!(storage.read(Slot::Backup).unwrap().as_deref(), Some(&b"b"[..]));

        storage.remove(Slot::Primary).unwrap();
        assert!(storage.read(Slot::Primary).unwrap().is_none());
    }
}
