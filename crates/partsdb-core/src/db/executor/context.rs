use crate::{
    db::{
        Db,
        store::{DataKey, DataStore, RawRow},
    },
    error::InternalError,
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// Context
///
/// Store access scoped to one entity's collection.
///

pub(crate) struct Context<'a, E: EntityKind> {
    pub db: &'a Db<E::Domain>,
    _marker: PhantomData<E>,
}

impl<'a, E> Context<'a, E>
where
    E: EntityKind,
{
    #[must_use]
    pub(crate) const fn new(db: &'a Db<E::Domain>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    // ------------------------------------------------------------------
    // Store access
    // ------------------------------------------------------------------

    pub(crate) fn with_store<R>(
        &self,
        f: impl FnOnce(&DataStore) -> R,
    ) -> Result<R, InternalError> {
        self.db.with_data(|reg| reg.with_store(E::PATH, f))
    }

    pub(crate) fn with_store_mut<R>(
        &self,
        f: impl FnOnce(&mut DataStore) -> R,
    ) -> Result<R, InternalError> {
        self.db.with_data(|reg| reg.with_store_mut(E::PATH, f))
    }

    // ------------------------------------------------------------------
    // Row reads
    // ------------------------------------------------------------------

    pub(crate) fn read(&self, key: &DataKey) -> Result<RawRow, InternalError> {
        self.with_store(|s| {
            s.get(key)
                .ok_or_else(|| InternalError::store_not_found(key.to_string()))
        })?
    }
}
