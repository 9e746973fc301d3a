use crate::{
    traits::Visitable,
    visitor::{
        Issues, PathSegment, VisitorContext, VisitorMut, VisitorMutAdapter, perform_visit_mut,
    },
};
use thiserror::Error as ThisError;

///
/// SanitizeError
///

#[derive(Debug, ThisError)]
pub enum SanitizeError {
    #[error("sanitization failed")]
    SanitizeFailed(Issues),
}

///
/// sanitize
/// Run the sanitizer visitor over a mutable visitable tree.
///
/// Sanitization is total and non-failing at the traversal level. Any
/// issues discovered during sanitization are reported via the returned
/// `SanitizeError`.
///

pub fn sanitize(node: &mut dyn Visitable) -> Result<(), SanitizeError> {
    let visitor = SanitizeVisitor::new();
    let mut adapter = VisitorMutAdapter::new(visitor);

    perform_visit_mut(&mut adapter, node, PathSegment::Empty);

    let issues = match adapter.finish() {
        Ok(issues) => issues,
        Err(e) => match e {},
    };

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SanitizeError::SanitizeFailed(issues))
    }
}

///
/// SanitizeVisitor
/// Walks a tree and applies sanitization at each node.
///

#[derive(Debug, Default)]
pub struct SanitizeVisitor;

impl SanitizeVisitor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl VisitorMut<super::validate::Never> for SanitizeVisitor {
    fn enter_mut(
        &mut self,
        node: &mut dyn Visitable,
        ctx: &mut dyn VisitorContext,
    ) -> Result<(), super::validate::Never> {
        node.sanitize_self(ctx);
        node.sanitize_custom(ctx);

        Ok(())
    }

    fn exit_mut(&mut self, _: &mut dyn Visitable) -> Result<(), super::validate::Never> {
        Ok(())
    }
}
