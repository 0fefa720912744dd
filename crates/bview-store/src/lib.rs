//! Bucket access layer for bview.
//!
//! This crate wraps an embedded `redb` database as a set of named buckets,
//! each a flat mapping from string keys to opaque byte values. It is the
//! transactional core that the HTTP front end consumes through the
//! [`BucketStore`] trait.
//!
//! # Components
//!
//! - [`Store`] -- handle to an opened database (file-backed or in-memory)
//! - [`BucketStore`] -- get / get_all / set / delete / list_buckets contract
//! - [`RecordId`] -- random UUID v4 keys for records inserted without one
//!
//! # Design Rules
//!
//! 1. Every operation runs in its own short transaction. Nothing batches.
//! 2. Buckets are created on first write and never on read or delete.
//! 3. Values are opaque. JSON is a presentation concern, not a store one.
//! 4. Reads see a consistent snapshot; writes are serialized by the engine.
//! 5. All engine errors are propagated, never silently ignored.

pub mod database;
pub mod error;
pub mod id;
pub mod names;
pub mod traits;

pub use database::Store;
pub use error::{StoreError, StoreResult};
pub use id::{new_identifier, RecordId};
pub use names::{validate_bucket_name, validate_key};
pub use traits::BucketStore;
