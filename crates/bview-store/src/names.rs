//! Bucket and key name validation.
//!
//! Both bucket names and record keys must be non-empty. Nothing else is
//! restricted: the engine accepts any UTF-8 string as a table name or key.

use crate::error::{StoreError, StoreResult};

/// Validate a bucket name, returning `Ok(())` if it can address a bucket.
///
/// # Examples
///
/// ```
/// use bview_store::names::validate_bucket_name;
///
/// assert!(validate_bucket_name("users").is_ok());
/// assert!(validate_bucket_name("").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "bucket name must not be empty".into(),
        });
    }
    Ok(())
}

/// Validate a record key. Same rule as bucket names.
pub fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidName {
            name: key.to_string(),
            reason: "key must not be empty".into(),
        });
    }
    Ok(())
}
