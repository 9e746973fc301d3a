use crate::{traits::Visitable, visitor::SanitizeError};

///
/// sanitize
/// Run the sanitizer visitor over a mutable visitable tree.
///
/// Sanitization is total and non-failing. Any issues discovered during
/// sanitization are reported via the returned `SanitizeError`.
///

pub fn sanitize(node: &mut dyn Visitable) -> Result<(), SanitizeError> {
    crate::visitor::sanitize(node)
}
