/// Errors from bucket store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named bucket does not exist.
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    /// The bucket exists but holds no record under this key.
    #[error("key not found: {key} in bucket {bucket}")]
    KeyNotFound { bucket: String, key: String },

    /// A bucket name or key was rejected before touching the store.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// The embedded engine failed to open, read, write or commit.
    #[error("storage error: {0}")]
    Storage(#[from] redb::Error),

    /// The OS randomness source could not be read.
    #[error("randomness source unavailable: {0}")]
    Randomness(String),
}

impl StoreError {
    /// Whether this error means a bucket or key is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BucketNotFound(_) | Self::KeyNotFound { .. })
    }
}

macro_rules! storage_error_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StoreError {
                fn from(err: $ty) -> Self {
                    Self::Storage(err.into())
                }
            }
        )*
    };
}

storage_error_from!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
