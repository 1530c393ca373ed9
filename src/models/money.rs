//! Exact monetary amounts.
//!
//! Every amount inside the engine is an integer count of minor currency
//! units (cents). Decimal values only appear at the boundary, where
//! [`Money::from_decimal`] rejects negative and fractional-cent input.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of minor units in one major unit.
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// A non-negative amount of money in minor units.
///
/// # Example
///
/// ```
/// use benefits_engine::models::Money;
/// use rust_decimal::Decimal;
///
/// let limit = Money::from_decimal(Decimal::new(500_000, 2)).unwrap();
/// assert_eq!(limit.minor_units(), 500_000);
/// assert_eq!(limit.major_units(), 5_000);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// The zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates an amount from a count of minor units.
    pub const fn from_minor_units(minor_units: u64) -> Self {
        Money(minor_units)
    }

    /// Creates an amount from a signed count of minor units.
    ///
    /// Negative values are rejected rather than negated.
    pub fn try_from_minor_units(minor_units: i64) -> EngineResult<Self> {
        u64::try_from(minor_units)
            .map(Money)
            .map_err(|_| EngineError::invalid_input("amount", "amount cannot be negative"))
    }

    /// Converts a major-unit decimal (e.g. `5000.00`) into minor units.
    ///
    /// Fails with `InvalidInput` when the value is negative, carries a
    /// fraction of a minor unit, or does not fit the representable range.
    pub fn from_decimal(amount: Decimal) -> EngineResult<Self> {
        if amount.is_zero() {
            return Ok(Money::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(EngineError::invalid_input(
                "amount",
                format!("amount cannot be negative: {}", amount),
            ));
        }

        let minor = amount
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .ok_or_else(|| {
                EngineError::invalid_input("amount", format!("amount is too large: {}", amount))
            })?;

        if !minor.fract().is_zero() {
            return Err(EngineError::invalid_input(
                "amount",
                format!("amount has a fraction of a cent: {}", amount),
            ));
        }

        minor.to_u64().map(Money).ok_or_else(|| {
            EngineError::invalid_input("amount", format!("amount is too large: {}", amount))
        })
    }

    /// Returns the amount as a major-unit decimal with two places.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), 2)
    }

    /// Returns the raw count of minor units.
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Returns the whole major units (the part verbalized as "reais").
    pub const fn major_units(self) -> u64 {
        self.0 / MINOR_UNITS_PER_MAJOR
    }

    /// Returns the minor-unit remainder below one major unit.
    pub const fn cents(self) -> u64 {
        self.0 % MINOR_UNITS_PER_MAJOR
    }

    /// Returns true for the zero amount.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts, clamping at zero.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Multiplies by `numerator / denominator`, rounding down.
    ///
    /// The intermediate product is widened to 128 bits so no precision is
    /// lost. A zero denominator yields zero.
    pub fn scale_down(self, numerator: u64, denominator: u64) -> Money {
        if denominator == 0 {
            return Money::ZERO;
        }
        let scaled = u128::from(self.0) * u128::from(numerator) / u128::from(denominator);
        Money(u64::try_from(scaled).unwrap_or(u64::MAX))
    }

    /// Sums amounts with overflow checking.
    pub fn checked_sum<I>(amounts: I) -> EngineResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
            .ok_or_else(|| {
                EngineError::invalid_input("amount", "sum exceeds the representable range")
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_decimal_converts_major_units_to_cents() {
        assert_eq!(Money::from_decimal(dec("5000.00")).unwrap().minor_units(), 500_000);
        assert_eq!(Money::from_decimal(dec("12.5")).unwrap().minor_units(), 1_250);
        assert_eq!(Money::from_decimal(dec("0")).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_from_decimal_rejects_negative_amount() {
        let err = Money::from_decimal(dec("-0.01")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_from_decimal_accepts_negative_zero() {
        assert_eq!(Money::from_decimal(dec("-0.00")).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_from_decimal_rejects_fractional_cents() {
        let err = Money::from_decimal(dec("10.005")).unwrap_err();
        assert!(err.to_string().contains("fraction of a cent"));
    }

    #[test]
    fn test_from_decimal_accepts_trailing_zero_precision() {
        assert_eq!(
            Money::from_decimal(dec("10.5000")).unwrap().minor_units(),
            1_050
        );
    }

    #[test]
    fn test_try_from_minor_units_rejects_negative() {
        assert!(Money::try_from_minor_units(-1).is_err());
        assert_eq!(Money::try_from_minor_units(42).unwrap().minor_units(), 42);
    }

    #[test]
    fn test_major_units_and_cents_split() {
        let amount = Money::from_minor_units(123_456);
        assert_eq!(amount.major_units(), 1_234);
        assert_eq!(amount.cents(), 56);
    }

    #[test]
    fn test_to_decimal_has_two_places() {
        assert_eq!(Money::from_minor_units(150).to_decimal().to_string(), "1.50");
        assert_eq!(Money::from_minor_units(150).to_string(), "1.50");
    }

    #[test]
    fn test_scale_down_rounds_toward_zero() {
        // 300000 * 500000 / 650000 = 230769.23...
        let scaled = Money::from_minor_units(300_000).scale_down(500_000, 650_000);
        assert_eq!(scaled.minor_units(), 230_769);
    }

    #[test]
    fn test_scale_down_does_not_overflow_wide_products() {
        let amount = Money::from_minor_units(u64::MAX);
        assert_eq!(amount.scale_down(u64::MAX - 1, u64::MAX).minor_units(), u64::MAX - 1);
    }

    #[test]
    fn test_checked_sum_reports_overflow() {
        let result = Money::checked_sum([Money::from_minor_units(u64::MAX), Money::from_minor_units(1)]);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_serializes_as_integer_minor_units() {
        let json = serde_json::to_string(&Money::from_minor_units(2_500)).unwrap();
        assert_eq!(json, "2500");
        let parsed: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(parsed.minor_units(), 2_500);
    }

    #[test]
    fn test_deserialize_rejects_negative_integer() {
        assert!(serde_json::from_str::<Money>("-5").is_err());
    }
}
