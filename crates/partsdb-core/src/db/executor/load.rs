use crate::{
    db::{
        Db,
        executor::{Context, ExecutorError},
        response::Response,
        store::DataKey,
    },
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, Span, record},
    traits::EntityKind,
    types::Id,
};
use std::marker::PhantomData;

///
/// LoadExecutor
///

#[derive(Clone, Copy)]
pub struct LoadExecutor<E: EntityKind> {
    db: Db<E::Domain>,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> LoadExecutor<E> {
    #[must_use]
    pub const fn new(db: Db<E::Domain>) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    // ─────────────────────────────────────────────
    // PK-BASED HELPERS
    // ─────────────────────────────────────────────

    /// Load zero or one row by primary key.
    pub fn one(self, key: E::Key) -> Result<Response<E>, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Load);
        let ctx = Context::<E>::new(&self.db);

        let data_key = DataKey::new::<E>(key);
        let row = ctx.with_store(|store| store.get(&data_key))?;

        let rows = match row {
            Some(row) => vec![(Id::from_key(key), Self::decode(&data_key, &row)?)],
            None => Vec::new(),
        };

        span.set_rows(rows.len() as u64);
        Ok(Response(rows))
    }

    /// Load one row by primary key, erroring when it is missing.
    pub fn require(self, key: E::Key) -> Result<E, InternalError> {
        let response = self.one(key)?;

        response
            .maybe_one()
            .map_err(InternalError::from)?
            .ok_or_else(|| InternalError::store_not_found(DataKey::new::<E>(key).to_string()))
    }

    /// True when a row exists for the primary key.
    pub fn exists(self, key: E::Key) -> Result<bool, InternalError> {
        let ctx = Context::<E>::new(&self.db);
        let data_key = DataKey::new::<E>(key);

        ctx.with_store(|store| store.get(&data_key).is_some())
    }

    // ─────────────────────────────────────────────
    // SCANS
    // ─────────────────────────────────────────────

    /// Load every row, in key order.
    pub fn all(self) -> Result<Response<E>, InternalError> {
        self.filter(|_| true)
    }

    /// Load rows matching a predicate, in key order.
    pub fn filter(self, pred: impl Fn(&E) -> bool) -> Result<Response<E>, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Load);
        let ctx = Context::<E>::new(&self.db);

        let mut scanned: u64 = 0;
        let rows = ctx.with_store(|store| {
            let mut out = Vec::new();
            for (data_key, row) in store.iter() {
                scanned += 1;
                let entity = Self::decode(data_key, row)?;
                if pred(&entity) {
                    out.push((entity.id(), entity));
                }
            }

            Ok::<_, InternalError>(out)
        })??;

        record(MetricsEvent::RowsScanned {
            entity_path: E::PATH,
            rows_scanned: scanned,
        });
        span.set_rows(rows.len() as u64);

        Ok(Response(rows))
    }

    /// Count rows matching a predicate.
    pub fn count(self, pred: impl Fn(&E) -> bool) -> Result<u64, InternalError> {
        Ok(self.filter(pred)?.len() as u64)
    }

    // ─────────────────────────────────────────────
    // DECODE
    // ─────────────────────────────────────────────

    fn decode(data_key: &DataKey, row: &crate::db::store::RawRow) -> Result<E, InternalError> {
        row.try_decode::<E>().map_err(|err| {
            ExecutorError::Corruption(format!("failed to deserialize row: {data_key} ({err})"))
                .into()
        })
    }
}
