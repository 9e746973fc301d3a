use crate::{
    db::{
        Db,
        executor::{Context, ExecutorError},
        response::Response,
        store::DataKey,
    },
    error::InternalError,
    obs::sink::{ExecKind, Span},
    traits::EntityKind,
    types::Id,
};
use std::marker::PhantomData;

///
/// DeleteExecutor
///

#[derive(Clone, Copy)]
pub struct DeleteExecutor<E: EntityKind> {
    db: Db<E::Domain>,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> DeleteExecutor<E> {
    #[must_use]
    pub const fn new(db: Db<E::Domain>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    /// Delete a single row by primary key.
    ///
    /// A missing row is not an error: the response is empty and the
    /// caller decides whether that is a soft success.
    pub fn one(self, key: E::Key) -> Result<Response<E>, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Delete);
        let ctx = Context::<E>::new(&self.db);

        let data_key = DataKey::new::<E>(key);

        // Decode before removal so a corrupt row surfaces without
        // half-applying the delete.
        let Some(row) = ctx.with_store(|store| store.get(&data_key))? else {
            return Ok(Response(Vec::new()));
        };

        let entity = row.try_decode::<E>().map_err(|err| {
            InternalError::from(ExecutorError::Corruption(format!(
                "failed to deserialize row: {data_key} ({err})"
            )))
        })?;

        ctx.with_store_mut(|store| store.remove(&data_key))?;
        span.set_rows(1);

        Ok(Response(vec![(Id::from_key(key), entity)]))
    }

    /// Delete a single row, erroring when it was missing.
    pub fn ensure_one(self, key: E::Key) -> Result<E, InternalError> {
        self.one(key)?
            .maybe_one()
            .map_err(InternalError::from)?
            .ok_or_else(|| {
                ExecutorError::KeyNotFound(DataKey::new::<E>(key)).into()
            })
    }
}
