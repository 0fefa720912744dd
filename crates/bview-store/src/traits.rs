use crate::error::StoreResult;
use crate::id::RecordId;

/// Bucket-scoped key-value access.
///
/// All implementations must satisfy these invariants:
/// - Each call runs in exactly one transaction of its own. No transaction
///   outlives the call, and none is shared between calls.
/// - Buckets are created by `set` only. Reads and deletes never create them.
/// - Values are opaque bytes. The store never interprets record contents.
/// - Returned values are owned copies, detached from engine memory.
pub trait BucketStore: Send + Sync {
    /// Read one record.
    ///
    /// Fails with `BucketNotFound` if the bucket does not exist and with
    /// `KeyNotFound` if the key is absent.
    fn get(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>>;

    /// Read every key/value pair of a bucket in key order.
    ///
    /// Fails with `BucketNotFound` if the bucket does not exist. An empty
    /// bucket yields an empty vec.
    fn entries(&self, bucket: &str) -> StoreResult<Vec<(String, Vec<u8>)>>;

    /// Insert or overwrite a record, creating the bucket if needed.
    ///
    /// The write commits atomically: on error nothing is visible.
    fn set(&self, bucket: &str, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove a record from an existing bucket.
    ///
    /// Fails with `BucketNotFound` if the bucket does not exist. Removing an
    /// absent key is not an error.
    fn delete(&self, bucket: &str, key: &str) -> StoreResult<()>;

    /// List all bucket names in store order.
    fn list_buckets(&self) -> StoreResult<Vec<String>>;

    /// Read every value of a bucket in key order.
    fn get_all(&self, bucket: &str) -> StoreResult<Vec<Vec<u8>>> {
        Ok(self
            .entries(bucket)?
            .into_iter()
            .map(|(_, value)| value)
            .collect())
    }

    /// Store a value under a freshly generated identifier and return it.
    fn insert(&self, bucket: &str, value: &[u8]) -> StoreResult<RecordId> {
        let id = RecordId::generate()?;
        self.set(bucket, &id.to_string(), value)?;
        Ok(id)
    }
}
