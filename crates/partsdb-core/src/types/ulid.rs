use crate::traits::{
    RawKey, SanitizeAuto, SanitizeCustom, StorageKey, ValidateAuto, ValidateCustom, Visitable,
};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use ulid::Ulid as WrappedUlid;

///
/// UlidError
///

#[derive(Debug, ThisError)]
pub enum UlidError {
    #[error("invalid ulid string")]
    InvalidString,
}

///
/// Ulid
///
/// Opaque unique identifier used as the primary key of every entity.
/// Lexicographic order matches creation order.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Deref,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Ulid(WrappedUlid);

impl Ulid {
    pub const STORED_SIZE: u32 = 16;

    #[must_use]
    pub const fn nil() -> Self {
        Self(WrappedUlid::nil())
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// generate
    /// Generate a ULID with the current timestamp and a random value.
    #[must_use]
    pub fn generate() -> Self {
        Self(WrappedUlid::new())
    }

    #[must_use]
    pub const fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        Self(WrappedUlid::from_parts(timestamp_ms, random))
    }

    /// from_bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedUlid::from_bytes(bytes))
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.to_bytes()
    }

    /// from_string
    /// Parse the canonical 26-character encoding.
    pub fn from_string(encoded: &str) -> Result<Self, UlidError> {
        let this = WrappedUlid::from_string(encoded).map_err(|_| UlidError::InvalidString)?;

        Ok(Self(this))
    }
}

impl Default for Ulid {
    fn default() -> Self {
        Self::nil()
    }
}

impl StorageKey for Ulid {
    fn to_raw(self) -> RawKey {
        self.to_bytes()
    }

    fn from_raw(raw: RawKey) -> Self {
        Self::from_bytes(raw)
    }
}

impl Visitable for Ulid {}
impl SanitizeAuto for Ulid {}
impl SanitizeCustom for Ulid {}
impl ValidateAuto for Ulid {}
impl ValidateCustom for Ulid {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_canonical_encoding() {
        let id = Ulid::generate();
        let parsed = Ulid::from_string(&id.to_string()).unwrap();

        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_invalid_encoding() {
        assert!(matches!(
            Ulid::from_string("not-a-ulid"),
            Err(UlidError::InvalidString)
        ));
    }

    #[test]
    fn raw_key_round_trip() {
        let id = Ulid::generate();
        assert_eq!(Ulid::from_raw(id.to_raw()), id);
    }

    #[test]
    fn nil_is_nil() {
        assert!(Ulid::nil().is_nil());
        assert!(!Ulid::generate().is_nil());
    }
}
