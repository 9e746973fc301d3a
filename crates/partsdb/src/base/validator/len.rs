use partsdb_core::{
    traits::Validator,
    visitor::VisitorContext,
};
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;

///
/// HasLen
///
/// Length as the user perceives it: strings count characters,
/// collections count items.
///

#[allow(clippy::len_without_is_empty)]
pub trait HasLen {
    fn len(&self) -> usize;
}

impl HasLen for str {
    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl HasLen for String {
    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl<T> HasLen for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> HasLen for Vec<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T, S: BuildHasher> HasLen for HashSet<T, S> {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<K, V, S: BuildHasher> HasLen for HashMap<K, V, S> {
    fn len(&self) -> usize {
        Self::len(self)
    }
}

///
/// Min
///

#[derive(Clone, Copy, Debug)]
pub struct Min {
    target: usize,
}

impl Min {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Min {
    fn validate(&self, t: &T, ctx: &mut dyn VisitorContext) {
        let len = t.len();
        if len < self.target {
            ctx.add_issue(format!(
                "length ({len}) is lower than minimum of {}",
                self.target
            ));
        }
    }
}

///
/// Max
///

#[derive(Clone, Copy, Debug)]
pub struct Max {
    target: usize,
}

impl Max {
    #[must_use]
    pub const fn new(target: usize) -> Self {
        Self { target }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Max {
    fn validate(&self, t: &T, ctx: &mut dyn VisitorContext) {
        let len = t.len();
        if len > self.target {
            ctx.add_issue(format!(
                "length ({len}) is greater than maximum of {}",
                self.target
            ));
        }
    }
}

///
/// Range
///

#[derive(Clone, Copy, Debug)]
pub struct Range {
    min: usize,
    max: usize,
}

impl Range {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        assert!(min <= max, "range requires min <= max");

        Self { min, max }
    }
}

impl<T: HasLen + ?Sized> Validator<T> for Range {
    fn validate(&self, t: &T, ctx: &mut dyn VisitorContext) {
        let len = t.len();
        if len < self.min || len > self.max {
            ctx.add_issue(format!(
                "length ({len}) must be between {} and {} (inclusive)",
                self.min, self.max
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

    fn issues_for<T: ?Sized>(validator: &impl Validator<T>, value: &T) -> Vec<String> {
        let mut ctx = TestCtx(Issues::new());
        validator.validate(value, &mut ctx);

        ctx.0.into_values().flatten().collect()
    }

    #[test]
    fn range_accepts_in_bounds() {
        let r = Range::new(2, 5);
        assert!(issues_for(&r, "hey").is_empty());
    }

    #[test]
    fn range_rejects_out_of_bounds() {
        let r = Range::new(2, 5);
        assert_eq!(issues_for(&r, "hello world").len(), 1);
        assert_eq!(issues_for(&r, "x").len(), 1);
    }

    #[test]
    fn range_counts_characters_not_bytes() {
        let r = Range::new(1, 3);
        // three characters, nine bytes
        assert!(issues_for(&r, "äöü").is_empty());
    }

    #[test]
    fn min_and_max_bound_each_side() {
        assert!(issues_for(&Min::new(1), "a").is_empty());
        assert_eq!(issues_for(&Min::new(1), "").len(), 1);
        assert!(issues_for(&Max::new(2), "ab").is_empty());
        assert_eq!(issues_for(&Max::new(2), "abc").len(), 1);
    }

    #[test]
    #[should_panic(expected = "range requires min <= max")]
    fn range_invalid_constructor() {
        let _ = Range::new(5, 2);
    }
}
