use num_traits::NumCast;
use partsdb_core::{traits::Validator, types::Decimal, visitor::VisitorContext};

fn cast_decimal<N: NumCast + Clone>(value: &N) -> Result<Decimal, String> {
    <Decimal as NumCast>::from(value.clone()).ok_or_else(|| {
        format!(
            "value of type {} cannot be represented as Decimal",
            core::any::type_name::<N>()
        )
    })
}

///
/// Range
///

#[derive(Clone, Copy, Debug)]
pub struct Range {
    min: Decimal,
    max: Decimal,
}

impl Range {
    pub fn new<N: NumCast + Clone>(min: N, max: N) -> Self {
        let min =
            cast_decimal(&min).unwrap_or_else(|e| panic!("Range::new failed to convert min: {e}"));
        let max =
            cast_decimal(&max).unwrap_or_else(|e| panic!("Range::new failed to convert max: {e}"));
        assert!(min <= max, "range requires min <= max");

        Self { min, max }
    }
}

impl<N: NumCast + Clone> Validator<N> for Range {
    fn validate(&self, n: &N, ctx: &mut dyn VisitorContext) {
        let v = match cast_decimal(n) {
            Ok(v) => v,
            Err(e) => {
                ctx.add_issue(e);
                return;
            }
        };

        if v < self.min || v > self.max {
            ctx.add_issue(format!(
                "{} must be between {} and {}",
                v, self.min, self.max
            ));
        }
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

    fn issues_for<N: NumCast + Clone>(validator: &Range, value: &N) -> Vec<String> {
        let mut ctx = TestCtx(Issues::new());
        validator.validate(value, &mut ctx);

        ctx.0.into_values().flatten().collect()
    }

    fn dec(v: &str) -> Decimal {
        v.parse().unwrap()
    }

    #[test]
    fn range_accepts_inclusive_bounds() {
        let r = Range::new(0, 10);
        assert!(issues_for(&r, &0).is_empty());
        assert!(issues_for(&r, &5).is_empty());
        assert!(issues_for(&r, &10).is_empty());

        let r2 = Range::new(dec("1.23"), dec("2.34"));
        assert!(issues_for(&r2, &dec("1.23")).is_empty());
        assert!(issues_for(&r2, &dec("2.34")).is_empty());
        assert!(issues_for(&r2, &dec("1.5")).is_empty());
    }

    #[test]
    fn range_rejects_out_of_bounds() {
        let r = Range::new(0, 10);
        assert_eq!(issues_for(&r, &-1).len(), 1);
        assert_eq!(issues_for(&r, &11).len(), 1);
        assert_eq!(issues_for(&r, &dec("-0.0001")).len(), 1);
    }

    #[test]
    fn range_min_equals_max() {
        let r = Range::new(5, 5);
        assert!(issues_for(&r, &5).is_empty());
        assert_eq!(issues_for(&r, &4).len(), 1);
        assert_eq!(issues_for(&r, &6).len(), 1);
    }

    #[test]
    #[should_panic(expected = "range requires min <= max")]
    fn range_invalid_constructor() {
        let _ = Range::new(10, 5);
    }
}
