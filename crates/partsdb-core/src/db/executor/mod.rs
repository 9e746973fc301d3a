mod context;
mod delete;
mod load;
mod save;


pub use delete::DeleteExecutor;
pub use load::LoadExecutor;
pub use save::{SaveExecutor, SaveMode};

pub(crate) use context::Context;

use crate::{
    db::store::DataKey,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

///
/// ExecutorError
///

#[derive(Debug, ThisError)]
pub enum ExecutorError {
    #[error("key already exists: {0}")]
    KeyExists(DataKey),

    #[error("key not found: {0}")]
    KeyNotFound(DataKey),

    #[error("store corruption: {0}")]
    Corruption(String),
}

impl ExecutorError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::KeyExists(_) => ErrorClass::Conflict,
            Self::KeyNotFound(_) => ErrorClass::NotFound,
            Self::Corruption(_) => ErrorClass::Corruption,
        }
    }
}

impl From<ExecutorError> for InternalError {
    fn from(err: ExecutorError) -> Self {
        Self::new(err.class(), ErrorOrigin::Executor, err.to_string())
    }
}
