use partsdb_core::{traits::Validator, visitor::VisitorContext};

///
/// NotEmpty
///
/// Rejects strings that are empty after trimming.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NotEmpty;

impl Validator<str> for NotEmpty {
    fn validate(&self, s: &str, ctx: &mut dyn VisitorContext) {
        if s.trim().is_empty() {
            ctx.add_issue("must not be empty".to_string());
        }
    }
}

impl Validator<String> for NotEmpty {
    fn validate(&self, s: &String, ctx: &mut dyn VisitorContext) {
        Validator::<str>::validate(self, s, ctx);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use partsdb_core::visitor::{Issues, PathSegment};

    struct TestCtx(Issues);

    impl VisitorContext for TestCtx {
        fn add_issue(&mut self, message: String) {
            self.0.entry(String::new()).or_default().push(message);
        }

        fn add_issue_at(&mut self, _seg: PathSegment, message: String) {
            self.add_issue(message);
        }
    }

    #[test]
    fn rejects_blank_strings() {
        let mut ctx = TestCtx(Issues::new());
        Validator::<str>::validate(&NotEmpty, "   ", &mut ctx);

        assert_eq!(ctx.0.len(), 1);
    }

    #[test]
    fn accepts_content() {
        let mut ctx = TestCtx(Issues::new());
        Validator::<str>::validate(&NotEmpty, "cpu", &mut ctx);

        assert!(ctx.0.is_empty());
    }
}
