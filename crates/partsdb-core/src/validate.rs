use crate::{traits::Visitable, visitor::ValidateError};

///
/// validate
/// Validate a visitable tree, collecting issues by path.
///
/// Validation is non-failing at the traversal level. All validation
/// issues are collected and returned to the caller, which may choose
/// how to interpret them.
///

pub fn validate(node: &dyn Visitable) -> Result<(), ValidateError> {
    crate::visitor::validate(node)
}
