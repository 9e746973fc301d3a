pub mod executor;
pub mod relation;
pub mod response;
pub mod store;

use crate::{
    db::{
        executor::{DeleteExecutor, LoadExecutor, SaveExecutor},
        store::DataStoreRegistry,
    },
    error::InternalError,
    traits::{DomainKind, EntityKind},
};
use std::{marker::PhantomData, thread::LocalKey};

///
/// Db
///
/// A handle to the set of stores registered for a specific domain.
///
/// - `D` is the [`DomainKind`] (schema domain marker).
///
/// The `Db` acts as the entry point for querying, saving, and deleting
/// entities within a single domain's store registry.
///

pub struct Db<D: DomainKind> {
    data: &'static LocalKey<DataStoreRegistry>,
    _marker: PhantomData<D>,
}

impl<D: DomainKind> Db<D> {
    #[must_use]
    pub const fn new(data: &'static LocalKey<DataStoreRegistry>) -> Self {
        Self {
            data,
            _marker: PhantomData,
        }
    }

    /// Run a closure with read access to the data store registry.
    pub fn with_data<R>(&self, f: impl FnOnce(&DataStoreRegistry) -> R) -> R {
        self.data.with(|reg| f(reg))
    }
}

// Manual Copy + Clone implementations.
// Safe because Db only contains &'static LocalKey<_> handles,
// duplicating them does not duplicate the contents.
impl<D: DomainKind> Copy for Db<D> {}

impl<D: DomainKind> Clone for Db<D> {
    fn clone(&self) -> Self {
        *self
    }
}

///
/// DbSession
/// Database handle scoped to one request's worth of executor calls.
///

pub struct DbSession<D: DomainKind> {
    db: Db<D>,
}

impl<D: DomainKind> DbSession<D> {
    #[must_use]
    /// Create a new session scoped to the provided database.
    pub const fn new(db: Db<D>) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> Db<D> {
        self.db
    }

    //
    // Low-level executors
    //

    /// Get a [`LoadExecutor`] for building and executing queries that read entities.
    #[must_use]
    pub const fn load<E>(&self) -> LoadExecutor<E>
    where
        E: EntityKind<Domain = D>,
    {
        LoadExecutor::new(self.db)
    }

    /// Get a [`SaveExecutor`] for inserting or updating entities.
    ///
    /// Normally you will use the higher-level `insert/replace/update`
    /// shortcuts instead.
    #[must_use]
    pub const fn save<E>(&self) -> SaveExecutor<E>
    where
        E: EntityKind<Domain = D>,
    {
        SaveExecutor::new(self.db)
    }

    /// Get a [`DeleteExecutor`] for removing entities.
    #[must_use]
    pub const fn delete<E>(&self) -> DeleteExecutor<E>
    where
        E: EntityKind<Domain = D>,
    {
        DeleteExecutor::new(self.db)
    }

    //
    // High-level write helpers
    //

    pub fn insert<E>(&self, entity: E) -> Result<E, InternalError>
    where
        E: EntityKind<Domain = D>,
    {
        self.save::<E>().insert(entity)
    }

    pub fn replace<E>(&self, entity: E) -> Result<E, InternalError>
    where
        E: EntityKind<Domain = D>,
    {
        self.save::<E>().replace(entity)
    }

    pub fn update<E>(&self, entity: E) -> Result<E, InternalError>
    where
        E: EntityKind<Domain = D>,
    {
        self.save::<E>().update(entity)
    }
}
