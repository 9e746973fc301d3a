use crate::traits::{SanitizeAuto, SanitizeCustom, ValidateAuto, ValidateCustom, Visitable};
use derive_more::{Display, FromStr};
use num_traits::{FromPrimitive as NumFromPrimitive, NumCast, ToPrimitive as NumToPrimitive};
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};

///
/// Decimal
///
/// Fixed-point decimal for money-like fields. Wraps `rust_decimal`
/// so the schema type carries the numeric trait surface the
/// validators expect.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[repr(transparent)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    #[must_use]
    pub const fn inner(&self) -> &WrappedDecimal {
        &self.0
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(d: WrappedDecimal) -> Self {
        Self(d)
    }
}

impl NumCast for Decimal {
    fn from<T: NumToPrimitive>(n: T) -> Option<Self> {
        WrappedDecimal::from_f64(n.to_f64()?).map(Decimal)
    }
}

// all of these are needed if you want things to work
impl NumToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl Visitable for Decimal {}
impl SanitizeAuto for Decimal {}
impl SanitizeCustom for Decimal {}
impl ValidateAuto for Decimal {}
impl ValidateCustom for Decimal {}

///
/// TESTS
///
