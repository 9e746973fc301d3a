use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    traits::EntityKind,
    types::Id,
};
use thiserror::Error as ThisError;

///
/// ResponseError
///

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("no rows returned: {path}")]
    NotFound { path: &'static str },

    #[error("expected one row, got {found}: {path}")]
    NotUnique { path: &'static str, found: usize },
}

impl From<ResponseError> for InternalError {
    fn from(err: ResponseError) -> Self {
        let class = match err {
            ResponseError::NotFound { .. } => ErrorClass::NotFound,
            ResponseError::NotUnique { .. } => ErrorClass::Internal,
        };

        Self::new(class, ErrorOrigin::Executor, err.to_string())
    }
}

///
/// Response
///
/// Ordered rows returned by one executor call.
///

#[derive(Debug)]
pub struct Response<E: EntityKind>(pub Vec<(Id<E>, E)>);

impl<E: EntityKind> Response<E> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the returned entities.
    pub fn entities(&self) -> impl Iterator<Item = &E> {
        self.0.iter().map(|(_, entity)| entity)
    }

    /// Consume the response, returning the entities in order.
    #[must_use]
    pub fn into_entities(self) -> Vec<E> {
        self.0.into_iter().map(|(_, entity)| entity).collect()
    }

    /// Exactly one row, or an error.
    pub fn require_one(self) -> Result<E, ResponseError> {
        let found = self.0.len();
        let mut rows = self.0;

        match found {
            1 => Ok(rows.remove(0).1),
            0 => Err(ResponseError::NotFound { path: E::PATH }),
            _ => Err(ResponseError::NotUnique {
                path: E::PATH,
                found,
            }),
        }
    }

    /// Zero or one row, or an error.
    pub fn maybe_one(self) -> Result<Option<E>, ResponseError> {
        let found = self.0.len();
        let mut rows = self.0;

        match found {
            0 => Ok(None),
            1 => Ok(Some(rows.remove(0).1)),
            _ => Err(ResponseError::NotUnique {
                path: E::PATH,
                found,
            }),
        }
    }
}
