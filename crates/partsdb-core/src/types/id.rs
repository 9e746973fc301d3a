use crate::traits::{
    EntityKey, SanitizeAuto, SanitizeCustom, ValidateAuto, ValidateCustom, Visitable,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

///
/// Id
///
/// Typed primary-key wrapper for entity identities.
/// Carries entity context without changing the underlying key type.
/// Serializes identically to `E::Key`.
///

#[repr(transparent)]
pub struct Id<E: EntityKey> {
    key: E::Key,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Id<E>
where
    E: EntityKey,
{
    /// Construct a typed identity from the raw key value.
    #[must_use]
    pub const fn from_key(key: E::Key) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying key.
    #[must_use]
    pub const fn key(&self) -> E::Key {
        self.key
    }

    /// Consume this identity and return the raw key.
    #[must_use]
    pub const fn into_key(self) -> E::Key {
        self.key
    }
}

#[allow(clippy::expl_impl_clone_on_copy)]
impl<E> Clone for Id<E>
where
    E: EntityKey,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Id<E> where E: EntityKey {}

impl<E> fmt::Debug for Id<E>
where
    E: EntityKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.key).finish()
    }
}

impl<E> fmt::Display for Id<E>
where
    E: EntityKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<E> Eq for Id<E> where E: EntityKey {}

impl<E> PartialEq for Id<E>
where
    E: EntityKey,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E> Hash for Id<E>
where
    E: EntityKey,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<E> Ord for Id<E>
where
    E: EntityKey,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl<E> PartialOrd for Id<E>
where
    E: EntityKey,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Serialize for Id<E>
where
    E: EntityKey,
    E::Key: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.key.serialize(serializer)
    }
}

impl<'de, E> Deserialize<'de> for Id<E>
where
    E: EntityKey,
    E::Key: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = E::Key::deserialize(deserializer)?;

        Ok(Self::from_key(key))
    }
}

impl<E> Visitable for Id<E> where E: EntityKey {}
impl<E> SanitizeAuto for Id<E> where E: EntityKey {}
impl<E> SanitizeCustom for Id<E> where E: EntityKey {}
impl<E> ValidateAuto for Id<E> where E: EntityKey {}
impl<E> ValidateCustom for Id<E> where E: EntityKey {}
