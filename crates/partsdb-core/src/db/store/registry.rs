use crate::error::InternalError;
use std::{cell::RefCell, collections::BTreeMap};

///
/// StoreRegistry
///
/// Maps entity paths to their backing stores. Registration happens once
/// at domain initialization; paths are unique by construction (one store
/// per entity path), so a re-registration simply replaces the store.
///
/// Stores are wrapped in `RefCell`: execution is single-threaded per
/// request and executors never hold nested borrows of the same store.
///

pub struct StoreRegistry<S> {
    stores: BTreeMap<&'static str, RefCell<S>>,
}

impl<S> StoreRegistry<S> {
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            stores: BTreeMap::new(),
        }
    }

    /// Register the store backing `path`.
    pub fn register(&mut self, path: &'static str, store: S) {
        self.stores.insert(path, RefCell::new(store));
    }

    /// Run a closure with read access to the store for `path`.
    pub fn with_store<R>(
        &self,
        path: &'static str,
        f: impl FnOnce(&S) -> R,
    ) -> Result<R, InternalError> {
        let cell = self
            .stores
            .get(path)
            .ok_or_else(|| InternalError::unsupported_entity_path(path))?;

        Ok(f(&cell.borrow()))
    }

    /// Run a closure with write access to the store for `path`.
    pub fn with_store_mut<R>(
        &self,
        path: &'static str,
        f: impl FnOnce(&mut S) -> R,
    ) -> Result<R, InternalError> {
        let cell = self
            .stores
            .get(path)
            .ok_or_else(|| InternalError::unsupported_entity_path(path))?;

        Ok(f(&mut cell.borrow_mut()))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_is_rejected() {
        let reg: StoreRegistry<u32> = StoreRegistry::new();
        let err = reg.with_store("nope", |_| ()).unwrap_err();

        assert!(err.message.contains("unsupported entity path"));
    }

    #[test]
    fn registered_store_is_accessible() {
        let mut reg: StoreRegistry<u32> = StoreRegistry::new();
        reg.register("a", 1);

        reg.with_store_mut("a", |v| *v += 1).unwrap();
        assert_eq!(reg.with_store("a", |v| *v).unwrap(), 2);
    }
}
