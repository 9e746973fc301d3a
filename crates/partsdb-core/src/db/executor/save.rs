use crate::{
    db::{
        Db,
        executor::{Context, ExecutorError},
        store::{DataKey, RawRow},
    },
    error::InternalError,
    obs::sink::{ExecKind, Span},
    sanitize::sanitize,
    serialize::serialize,
    traits::EntityKind,
    validate::validate,
};
use std::marker::PhantomData;

///
/// SaveMode
///
/// - `Insert` errors if the key already exists.
/// - `Update` errors if the key does not exist.
/// - `Replace` writes unconditionally.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveMode {
    Insert,
    Replace,
    Update,
}

///
/// SaveExecutor
///

#[derive(Clone, Copy)]
pub struct SaveExecutor<E: EntityKind> {
    db: Db<E::Domain>,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> SaveExecutor<E> {
    // ======================================================================
    // Construction & configuration
    // ======================================================================

    #[must_use]
    pub const fn new(db: Db<E::Domain>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    // ======================================================================
    // Single-entity save operations
    // ======================================================================

    /// Insert a brand-new entity (errors if the key already exists).
    pub fn insert(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Insert, entity)
    }

    /// Update an existing entity (errors if it does not exist).
    pub fn update(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Update, entity)
    }

    /// Replace an entity, inserting if missing.
    pub fn replace(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Replace, entity)
    }

    // ======================================================================
    // Batch save operations (fail-fast, non-atomic)
    // ======================================================================

    pub fn insert_many(
        &self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, InternalError> {
        let iter = entities.into_iter();
        let mut out = Vec::with_capacity(iter.size_hint().0);

        // Batch semantics: fail-fast and non-atomic; partial successes remain.
        // Retry-safe only with caller idempotency and conflict handling.
        for entity in iter {
            out.push(self.insert(entity)?);
        }

        Ok(out)
    }

    pub fn replace_many(
        &self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, InternalError> {
        let iter = entities.into_iter();
        let mut out = Vec::with_capacity(iter.size_hint().0);

        // Batch semantics: fail-fast and non-atomic; partial successes remain.
        for entity in iter {
            out.push(self.replace(entity)?);
        }

        Ok(out)
    }

    // ======================================================================
    // Low-level execution
    // ======================================================================

    fn save_entity(&self, mode: SaveMode, mut entity: E) -> Result<E, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Save);
        let ctx = Context::<E>::new(&self.db);

        // Sanitize & validate before key extraction in case PK fields are normalized
        sanitize(&mut entity)?;
        validate(&entity)?;

        let data_key = DataKey::new::<E>(entity.key());
        let old = ctx.with_store(|store| store.get(&data_key))?;

        match (mode, old) {
            (SaveMode::Insert, Some(_)) => {
                return Err(ExecutorError::KeyExists(data_key).into());
            }
            (SaveMode::Update, None) => {
                return Err(ExecutorError::KeyNotFound(data_key).into());
            }
            _ => {}
        }

        let bytes = serialize(&entity)?;
        let row = RawRow::try_new(bytes)?;

        ctx.with_store_mut(|store| store.insert(data_key, row))?;
        span.set_rows(1);

        Ok(entity)
    }
}
