use derive_more::Display;
use partsdb_core::{
    db::response::ResponseError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
    visitor::{Issues, ValidateError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.kind, ErrorKind::Conflict)
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::NotFound => ErrorKind::NotFound,
            ErrorClass::Conflict => ErrorKind::Conflict,
            _ => match err.origin {
                CoreErrorOrigin::Store => ErrorKind::Store,
                _ => ErrorKind::Internal,
            },
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        Self::new(
            ErrorKind::Validation(err.into_issues()),
            ErrorOrigin::Visitor,
            "validation failed",
        )
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and presentation boundaries.
///

#[remain::sorted]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Admin secret mismatch on a gated mutation.
    Authorization,

    /// A strong relation blocked the requested delete.
    Conflict,

    /// The caller cannot remediate this.
    Internal,

    /// Referenced id has no record.
    NotFound,

    /// Unexpected filesystem failure in image storage.
    Storage,

    /// Unexpected entity store failure.
    Store,

    /// One or more field rules failed; issues are keyed by field path.
    Validation(Issues),
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers and presentation boundaries.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Executor,
    Image,
    Serialize,
    Store,
    Visitor,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Store => Self::Store,
            CoreErrorOrigin::Visitor => Self::Visitor,
        }
    }
}

///
/// TESTS
///
