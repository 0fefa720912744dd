use std::path::{Path, PathBuf};

use redb::backends::InMemoryBackend;
use redb::{
    Database, ReadTransaction, ReadableTable, TableDefinition, TableError, TableHandle,
};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::names::{validate_bucket_name, validate_key};
use crate::traits::BucketStore;

/// One bucket is one redb table keyed by string with raw byte values.
fn bucket_table(name: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(name)
}

/// Handle to an opened embedded database.
///
/// Opened once by the composing process and shared by reference (usually
/// behind an `Arc`). Readers run concurrently on MVCC snapshots; writers
/// are serialized by the engine, so the handle itself holds no locks.
pub struct Store {
    db: Database,
    path: Option<PathBuf>,
}

impl Store {
    /// Open a file-backed store, creating the file if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let db = Database::create(path)?;
        info!(path = %path.display(), "opened store");
        Ok(Self {
            db,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a store that lives only in memory. Data is lost on drop.
    pub fn in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        debug!("opened in-memory store");
        Ok(Self { db, path: None })
    }

    /// Backing file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the store. Equivalent to dropping it, but logged.
    pub fn close(self) {
        match &self.path {
            Some(path) => info!(path = %path.display(), "closing store"),
            None => debug!("closing in-memory store"),
        }
        drop(self.db);
    }
}

/// Read one record inside an existing read transaction.
fn read_value(txn: &ReadTransaction, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
    let table = match txn.open_table(bucket_table(bucket)) {
        Ok(table) => table,
        Err(TableError::TableDoesNotExist(_)) => {
            return Err(StoreError::BucketNotFound(bucket.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let guard = table.get(key)?.ok_or_else(|| StoreError::KeyNotFound {
        bucket: bucket.to_string(),
        key: key.to_string(),
    })?;
    Ok(guard.value().to_vec())
}

/// Walk a whole bucket with a cursor inside an existing read transaction.
fn read_entries(txn: &ReadTransaction, bucket: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
    let table = match txn.open_table(bucket_table(bucket)) {
        Ok(table) => table,
        Err(TableError::TableDoesNotExist(_)) => {
            return Err(StoreError::BucketNotFound(bucket.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    let mut entries = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        entries.push((key.value().to_string(), value.value().to_vec()));
    }
    Ok(entries)
}

impl BucketStore for Store {
    fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        validate_bucket_name(bucket)?;
        validate_key(key)?;
        let txn = self.db.begin_read()?;
        let value = read_value(&txn, bucket, key)?;
        debug!(bucket, key, len = value.len(), "get");
        Ok(value)
    }

    fn entries(&self, bucket: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        validate_bucket_name(bucket)?;
        let txn = self.db.begin_read()?;
        let entries = read_entries(&txn, bucket)?;
        debug!(bucket, count = entries.len(), "entries");
        Ok(entries)
    }

    fn set(&self, bucket: &str, key: &str, value: &[u8]) -> StoreResult<()> {
        validate_bucket_name(bucket)?;
        validate_key(key)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(bucket_table(bucket))?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        debug!(bucket, key, len = value.len(), "set");
        Ok(())
    }

    fn delete(&self, bucket: &str, key: &str) -> StoreResult<()> {
        validate_bucket_name(bucket)?;
        validate_key(key)?;
        let txn = self.db.begin_write()?;
        // Opening a table in a write transaction creates it, so check first.
        let exists = txn.list_tables()?.any(|handle| handle.name() == bucket);
        if !exists {
            txn.abort()?;
            return Err(StoreError::BucketNotFound(bucket.to_string()));
        }
        let removed = txn
            .open_table(bucket_table(bucket))?
            .remove(key)?
            .is_some();
        txn.commit()?;
        debug!(bucket, key, removed, "delete");
        Ok(())
    }

    fn list_buckets(&self) -> StoreResult<Vec<String>> {
        let txn = self.db.begin_read()?;
        let names: Vec<String> = txn
            .list_tables()?
            .map(|handle| handle.name().to_string())
            .collect();
        debug!(count = names.len(), "list buckets");
        Ok(names)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}
