use crate::{category::Category, item::Item};
use partsdb::core::db::store::{DataStore, DataStoreRegistry};
use partsdb::prelude::*;

///
/// CatalogDomain
///
/// Store namespace for the inventory catalog. One registry per thread:
/// execution is single-threaded per request, and hosting across threads
/// is the embedder's concern.
///

pub struct CatalogDomain;

impl Path for CatalogDomain {
    const PATH: &'static str = "catalog";
}

impl DomainKind for CatalogDomain {}

thread_local! {
    static CATALOG_DATA: DataStoreRegistry = {
        let mut reg = DataStoreRegistry::new();
        reg.register(Category::PATH, DataStore::new());
        reg.register(Item::PATH, DataStore::new());
        reg
    };
}

/// Handle to the catalog stores.
#[must_use]
pub fn db() -> Db<CatalogDomain> {
    Db::new(&CATALOG_DATA)
}

/// A session over the catalog stores.
#[must_use]
pub fn session() -> DbSession<CatalogDomain> {
    DbSession::new(db())
}
