use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{StoreError, StoreResult};

/// Random record identifier in the UUID version-4 layout.
///
/// Drawn from the OS randomness source with no counter or timestamp
/// component, so values never depend on each other.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Generate a fresh identifier.
    ///
    /// Fails only if the OS randomness source cannot be read. There is no
    /// fallback: callers must abort the operation rather than store a record
    /// under a predictable key.
    pub fn generate() -> StoreResult<Self> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| StoreError::Randomness(e.to_string()))?;
        Ok(Self::from_random_bytes(bytes))
    }

    /// Build an identifier from 16 random bytes, forcing the version
    /// nibble to `4` and the variant bits to `10`.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0.hyphenated())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// Generate a new identifier in its canonical text form.
pub fn new_identifier() -> StoreResult<String> {
    RecordId::generate().map(|id| id.to_string())
}
