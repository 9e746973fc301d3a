//! Core runtime for PartsDB: entity traits, typed identities, the store
//! registry, executors, visitors, and the ergonomics exported via the
//! `prelude`.

pub mod db;
pub mod error;
pub mod obs;
pub mod sanitize;
pub mod serialize;
pub mod traits;
pub mod types;
pub mod validate;
pub mod visitor;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, stores, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        traits::{DomainKind, EntityIdentity, EntityKind, EntityValue, Path},
        types::{Id, Ulid},
    };
}
