//! Process-local metrics state.
//!
//! Counters are plain saturating totals; windowing and export are the
//! embedder's concern.

use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// OpCounters
/// Whole-domain operation counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OpCounters {
    pub load_calls: u64,
    pub save_calls: u64,
    pub delete_calls: u64,

    pub rows_loaded: u64,
    pub rows_scanned: u64,
    pub rows_deleted: u64,

    pub relation_source_scans: u64,
    pub relation_delete_blocks: u64,

    pub images_staged: u64,
    pub images_deleted: u64,
    pub image_cleanup_failures: u64,

    pub admin_rejections: u64,
}

///
/// EntityCounters
/// Per-entity-path operation counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub load_calls: u64,
    pub save_calls: u64,
    pub delete_calls: u64,

    pub rows_loaded: u64,
    pub rows_scanned: u64,
    pub rows_deleted: u64,

    pub relation_source_scans: u64,
    pub relation_delete_blocks: u64,
}

///
/// MetricsState
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsState {
    pub ops: OpCounters,
    pub entities: BTreeMap<String, EntityCounters>,
}

thread_local! {
    static STATE: RefCell<MetricsState> = RefCell::new(MetricsState::default());
}

pub(crate) fn with_state<R>(f: impl FnOnce(&MetricsState) -> R) -> R {
    STATE.with(|cell| f(&cell.borrow()))
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut MetricsState) -> R) -> R {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

/// Snapshot the current metrics state.
#[must_use]
pub fn report() -> MetricsState {
    with_state(Clone::clone)
}

/// Reset all metrics state.
pub fn reset_all() {
    with_state_mut(|state| *state = MetricsState::default());
}
