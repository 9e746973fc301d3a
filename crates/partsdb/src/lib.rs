//! ## Crate layout
//! - `base`: builtin sanitizers and validators for schema rules.
//! - `core`: runtime data model, store registry, executors, visitors, and
//!   observability.
//! - `error`: the public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module mirrors the runtime surface used by domain code.

pub use partsdb_core as core;

pub mod base;
pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        db::{
            Db, DbSession,
            relation::{RelationDef, RelationSource},
            response::Response,
        },
        sanitize::sanitize,
        traits::{
            DomainKind, EntityIdentity, EntityKey, EntityKind, EntityValue, Path, SanitizeAuto,
            SanitizeCustom, Sanitizer as _, StorageKey as _, ValidateAuto, ValidateCustom,
            Validator as _, Visitable,
        },
        types::{Decimal, Id, Ulid},
        validate::validate,
        visitor::{
            FieldContext, Issues, VisitorContext, VisitorCore, VisitorMutCore, perform_visit,
            perform_visit_mut,
        },
    };
    pub use serde::{Deserialize, Serialize};
}
