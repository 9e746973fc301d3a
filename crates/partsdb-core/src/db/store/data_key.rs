use crate::{
    traits::{EntityKind, RawKey, StorageKey},
    types::Ulid,
};
use std::fmt::{self, Display};

///
/// DataKey
///
/// Storage address of one row: entity path plus raw key material.
/// Raw key material is always 16 bytes, so display borrows the ULID
/// encoding regardless of the declared key type.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct DataKey {
    path: &'static str,
    key: RawKey,
}

impl DataKey {
    #[must_use]
    pub fn new<E: EntityKind>(key: E::Key) -> Self {
        Self {
            path: E::PATH,
            key: key.to_raw(),
        }
    }

    /// Construct from pre-resolved parts (relation checks address
    /// target rows without the target type in scope).
    #[must_use]
    pub const fn from_parts(path: &'static str, key: RawKey) -> Self {
        Self { path, key }
    }

    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Recover the typed key. Callers must know the owning entity.
    #[must_use]
    pub fn key<E: EntityKind>(&self) -> E::Key {
        E::Key::from_raw(self.key)
    }
}

impl Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.path, Ulid::from_bytes(self.key))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_fixtures::Widget, traits::Path};

    #[test]
    fn typed_key_round_trip() {
        let key = Ulid::generate();
        let dk = DataKey::new::<Widget>(key);

        assert_eq!(dk.path(), Widget::PATH);
        assert_eq!(dk.key::<Widget>(), key);
    }

    #[test]
    fn display_includes_path_and_key() {
        let key = Ulid::from_parts(1, 2);
        let dk = DataKey::new::<Widget>(key);

        assert_eq!(dk.to_string(), format!("{}({key})", Widget::PATH));
    }
}
