use crate::{
    traits::Visitable,
    visitor::{Issues, PathSegment, Visitor, VisitorAdapter, VisitorContext, perform_visit},
};
use thiserror::Error as ThisError;

///
/// ValidateError
///

#[derive(Debug, ThisError)]
pub enum ValidateError {
    #[error("validation failed: {}", render_issues(.0))]
    ValidationFailed(Issues),
}

impl ValidateError {
    /// Issues keyed by field path, one message per failing rule.
    #[must_use]
    pub const fn issues(&self) -> &Issues {
        match self {
            Self::ValidationFailed(issues) => issues,
        }
    }

    #[must_use]
    pub fn into_issues(self) -> Issues {
        match self {
            Self::ValidationFailed(issues) => issues,
        }
    }
}

// Render "field: message; field: message" for error display.
fn render_issues(issues: &Issues) -> String {
    let mut parts = Vec::new();
    for (path, messages) in issues {
        for message in messages {
            parts.push(format!("{path}: {message}"));
        }
    }

    parts.join("; ")
}

///
/// validate
/// Validate a visitable tree, collecting issues by path.
///
/// Validation is non-failing at the traversal level. All validation
/// issues are collected and returned to the caller, which may choose
/// how to interpret them.
///

pub fn validate(node: &dyn Visitable) -> Result<(), ValidateError> {
    let visitor = ValidateVisitor::new();
    let mut adapter = VisitorAdapter::new(visitor);

    perform_visit(&mut adapter, node, PathSegment::Empty);

    let issues = match adapter.finish() {
        Ok(issues) => issues,
        Err(e) => match e {},
    };

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::ValidationFailed(issues))
    }
}

///
/// ValidateVisitor
///

#[derive(Debug, Default)]
pub struct ValidateVisitor;

impl ValidateVisitor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Validation itself never aborts traversal; the uninhabited error type
/// makes that explicit.
#[derive(Debug)]
pub enum Never {}

impl Visitor<Never> for ValidateVisitor {
    fn enter(&mut self, node: &dyn Visitable, ctx: &mut dyn VisitorContext) -> Result<(), Never> {
        node.validate_self(ctx);
        node.validate_custom(ctx);

        Ok(())
    }

    fn exit(&mut self, _: &dyn Visitable) -> Result<(), Never> {
        Ok(())
    }
}
