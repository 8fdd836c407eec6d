//! RocksDB storage implementation.

use crate::{
    column_families::all_column_families,
    errors::{Result, StorageError},
    traits::{deserialize_value, serialize_key, serialize_value, Batch, Storage},
};
use async_trait::async_trait;
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};
use std::{path::Path, sync::Arc};
use tempfile::TempDir;
use tracing::debug;

/// RocksDB storage implementation
pub struct RocksDbStorage {
    db: Arc<DB>,
    // Declared after `db` so the database closes before the directory goes.
    _temp_dir: Option<TempDir>,
}

impl RocksDbStorage {
    /// Open RocksDB database at the specified path
    ///
    /// Creates all required column families if they don't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Self::open_db(path.as_ref())?;
        Ok(Self {
            db: Arc::new(db),
            _temp_dir: None,
        })
    }

    /// Open a database in a fresh temporary directory that lives as long as
    /// the returned storage.
    ///
    /// This is public for use in other crates' test modules.
    pub fn open_test() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(StorageError::IoError)?;
        let db = Self::open_db(temp_dir.path())?;
        Ok(Self {
            db: Arc::new(db),
            _temp_dir: Some(temp_dir),
        })
    }

    fn open_db(path: &Path) -> Result<DB> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf(&opts, path, all_column_families())
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Opened RocksDB at {:?}", path);
        Ok(db)
    }

    fn cf_handle(&self, cf: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))
    }
}

#[async_trait]
impl Storage for RocksDbStorage {
    async fn get<K, V>(&self, cf: &str, key: &K) -> Result<Option<V>>
    where
        K: Serialize + Send + Sync,
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        let result = self
            .db
            .get_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match result {
            Some(bytes) => Ok(Some(deserialize_value(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put<K, V>(&self, cf: &str, key: &K, value: &V) -> Result<()>
    where
        K: Serialize + Send + Sync,
        V: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;
        let value_bytes = serialize_value(value)?;

        self.db
            .put_cf(cf_handle, &key_bytes, &value_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    async fn delete<K>(&self, cf: &str, key: &K) -> Result<()>
    where
        K: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        self.db
            .delete_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    async fn exists<K>(&self, cf: &str, key: &K) -> Result<bool>
    where
        K: Serialize + Send + Sync,
    {
        let cf_handle = self.cf_handle(cf)?;
        let key_bytes = serialize_key(key)?;

        let result = self
            .db
            .get_pinned_cf(cf_handle, &key_bytes)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn get_by_prefix<K, V>(&self, cf: &str, prefix: &K) -> Result<Vec<(Vec<u8>, V)>>
    where
        K: Serialize + Send + Sync,
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;
        let prefix_bytes = serialize_key(prefix)?;

        let mut results = Vec::new();
        // Seek to the prefix; no prefix extractor is configured.
        let iter = self.db.iterator_cf(
            cf_handle,
            IteratorMode::From(&prefix_bytes, Direction::Forward),
        );

        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;

            if !key.starts_with(&prefix_bytes) {
                break;
            }
            results.push((key.to_vec(), deserialize_value(&value)?));
        }

        Ok(results)
    }

    async fn scan_all<V>(&self, cf: &str) -> Result<Vec<(Vec<u8>, V)>>
    where
        V: DeserializeOwned,
    {
        let cf_handle = self.cf_handle(cf)?;

        let mut results = Vec::new();
        for item in self.db.iterator_cf(cf_handle, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StorageError::Database(e.to_string()))?;
            results.push((key.to_vec(), deserialize_value(&value)?));
        }

        Ok(results)
    }

    fn batch(&self) -> Box<dyn Batch> {
        Box::new(RocksDbBatch {
            db: Arc::clone(&self.db),
            write_batch: WriteBatch::default(),
        })
    }
}

/// RocksDB batch implementation
pub struct RocksDbBatch {
    db: Arc<DB>,
    write_batch: WriteBatch,
}

#[async_trait]
impl Batch for RocksDbBatch {
    fn put_raw(&mut self, cf: &str, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        let cf_handle = self
            .db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;
        self.write_batch.put_cf(cf_handle, &key, &value);
        Ok(())
    }

    fn delete_raw(&mut self, cf: &str, key: Vec<u8>) -> Result<()> {
        let cf_handle = self
            .db
            .cf_handle(cf)
            .ok_or_else(|| StorageError::InvalidColumnFamily(cf.to_string()))?;
        self.write_batch.delete_cf(cf_handle, &key);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let RocksDbBatch { db, write_batch } = *self;
        let ops = write_batch.len();
        db.write(write_batch)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!("Batch committed: {} operations", ops);
        Ok(())
    }

    fn rollback(self: Box<Self>) {
        debug!("Batch rolled back: {} operations discarded", self.write_batch.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{traits::BatchExt, CF_ACCOUNTS, CF_ROLES_BY_DOMAIN};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        id: Uuid,
        name: String,
        value: u64,
    }

    fn data(name: &str, value: u64) -> TestData {
        TestData {
            id: Uuid::new_v4(),
            name: name.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = data("test", 42);

        storage.put(CF_ACCOUNTS, &record.id, &record).await.unwrap();

        let result: Option<TestData> = storage.get(CF_ACCOUNTS, &record.id).await.unwrap();
        assert_eq!(result, Some(record));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let storage = RocksDbStorage::open_test().unwrap();
        let result: Option<TestData> = storage.get(CF_ACCOUNTS, &Uuid::new_v4()).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = data("test", 42);

        assert!(!storage.exists(CF_ACCOUNTS, &record.id).await.unwrap());
        storage.put(CF_ACCOUNTS, &record.id, &record).await.unwrap();
        assert!(storage.exists(CF_ACCOUNTS, &record.id).await.unwrap());

        storage.delete(CF_ACCOUNTS, &record.id).await.unwrap();
        assert!(!storage.exists(CF_ACCOUNTS, &record.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_column_family() {
        let storage = RocksDbStorage::open_test().unwrap();
        let result: Result<Option<TestData>> = storage.get("nope", &1u32).await;
        assert!(matches!(result, Err(StorageError::InvalidColumnFamily(_))));
    }

    #[tokio::test]
    async fn test_batch_commit() {
        let storage = RocksDbStorage::open_test().unwrap();
        let first = data("first", 1);
        let second = data("second", 2);

        let mut batch = storage.batch();
        batch.put(CF_ACCOUNTS, &first.id, &first).unwrap();
        batch.put(CF_ACCOUNTS, &second.id, &second).unwrap();
        batch.commit().await.unwrap();

        let r1: Option<TestData> = storage.get(CF_ACCOUNTS, &first.id).await.unwrap();
        let r2: Option<TestData> = storage.get(CF_ACCOUNTS, &second.id).await.unwrap();
        assert_eq!(r1, Some(first));
        assert_eq!(r2, Some(second));
    }

    #[tokio::test]
    async fn test_batch_rollback() {
        let storage = RocksDbStorage::open_test().unwrap();
        let record = data("test", 42);

        let mut batch = storage.batch();
        batch.put(CF_ACCOUNTS, &record.id, &record).unwrap();
        batch.rollback();

        let result: Option<TestData> = storage.get(CF_ACCOUNTS, &record.id).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_get_by_prefix() {
        let storage = RocksDbStorage::open_test().unwrap();

        storage.put(CF_ROLES_BY_DOMAIN, &(1u32, 10u32), &()).await.unwrap();
        storage.put(CF_ROLES_BY_DOMAIN, &(1u32, 11u32), &()).await.unwrap();
        storage.put(CF_ROLES_BY_DOMAIN, &(2u32, 12u32), &()).await.unwrap();

        let results: Vec<(Vec<u8>, ())> = storage
            .get_by_prefix(CF_ROLES_BY_DOMAIN, &1u32)
            .await
            .unwrap();
        assert_eq!(results.len(), 2);

        let all: Vec<(Vec<u8>, ())> = storage.scan_all(CF_ROLES_BY_DOMAIN).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
