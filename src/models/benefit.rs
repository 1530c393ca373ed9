//! Benefit categories and per-employee breakdowns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Money;
use crate::error::EngineResult;

/// One of the fixed fringe-benefit categories.
///
/// The set is closed; callers cannot add categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitCategory {
    /// Grocery allowance.
    Food,
    /// Prepared-meal allowance.
    Meal,
    /// Commuting allowance.
    Transport,
    /// Health and wellness allowance.
    Health,
    /// Culture and leisure allowance.
    Culture,
}

impl BenefitCategory {
    /// Every category, in canonical order.
    pub const ALL: [BenefitCategory; 5] = [
        BenefitCategory::Food,
        BenefitCategory::Meal,
        BenefitCategory::Transport,
        BenefitCategory::Health,
        BenefitCategory::Culture,
    ];

    /// Returns the snake_case name used in JSON and YAML.
    pub fn as_str(self) -> &'static str {
        match self {
            BenefitCategory::Food => "food",
            BenefitCategory::Meal => "meal",
            BenefitCategory::Transport => "transport",
            BenefitCategory::Health => "health",
            BenefitCategory::Culture => "culture",
        }
    }
}

impl fmt::Display for BenefitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The amount allocated to each benefit category for one employee.
///
/// # Example
///
/// ```
/// use benefits_engine::models::{BenefitBreakdown, BenefitCategory, Money};
///
/// let mut breakdown = BenefitBreakdown::ZERO;
/// breakdown.set(BenefitCategory::Meal, Money::from_minor_units(60_000));
/// breakdown.set(BenefitCategory::Transport, Money::from_minor_units(20_000));
///
/// assert_eq!(breakdown.total().unwrap().minor_units(), 80_000);
/// assert_eq!(breakdown.largest_category(), BenefitCategory::Meal);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenefitBreakdown {
    /// Grocery allowance.
    #[serde(default)]
    pub food: Money,
    /// Prepared-meal allowance.
    #[serde(default)]
    pub meal: Money,
    /// Commuting allowance.
    #[serde(default)]
    pub transport: Money,
    /// Health and wellness allowance.
    #[serde(default)]
    pub health: Money,
    /// Culture and leisure allowance.
    #[serde(default)]
    pub culture: Money,
}

impl BenefitBreakdown {
    /// A breakdown with every category at zero.
    pub const ZERO: BenefitBreakdown = BenefitBreakdown {
        food: Money::ZERO,
        meal: Money::ZERO,
        transport: Money::ZERO,
        health: Money::ZERO,
        culture: Money::ZERO,
    };

    /// Returns the amount for a category.
    pub fn get(&self, category: BenefitCategory) -> Money {
        match category {
            BenefitCategory::Food => self.food,
            BenefitCategory::Meal => self.meal,
            BenefitCategory::Transport => self.transport,
            BenefitCategory::Health => self.health,
            BenefitCategory::Culture => self.culture,
        }
    }

    /// Sets the amount for a category.
    pub fn set(&mut self, category: BenefitCategory, amount: Money) {
        let slot = match category {
            BenefitCategory::Food => &mut self.food,
            BenefitCategory::Meal => &mut self.meal,
            BenefitCategory::Transport => &mut self.transport,
            BenefitCategory::Health => &mut self.health,
            BenefitCategory::Culture => &mut self.culture,
        };
        *slot = amount;
    }

    /// Iterates over `(category, amount)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BenefitCategory, Money)> + '_ {
        BenefitCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Sums every category, failing on overflow.
    pub fn total(&self) -> EngineResult<Money> {
        Money::checked_sum(self.iter().map(|(_, amount)| amount))
    }

    /// Returns true when every category is zero.
    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, amount)| amount.is_zero())
    }

    /// Returns the category with the largest amount.
    ///
    /// Ties go to the category that comes first in [`BenefitCategory::ALL`].
    pub fn largest_category(&self) -> BenefitCategory {
        let mut largest = BenefitCategory::Food;
        for category in BenefitCategory::ALL {
            if self.get(category) > self.get(largest) {
                largest = category;
            }
        }
        largest
    }

    /// Categories ordered from largest to smallest amount, ties in canonical order.
    pub fn categories_by_amount(&self) -> [BenefitCategory; 5] {
        let mut ordered = BenefitCategory::ALL;
        ordered.sort_by(|a, b| self.get(*b).cmp(&self.get(*a)));
        ordered
    }

    /// Multiplies every category by `numerator / denominator`, rounding down.
    pub fn scale_down(&self, numerator: u64, denominator: u64) -> BenefitBreakdown {
        let mut scaled = BenefitBreakdown::ZERO;
        for (category, amount) in self.iter() {
            scaled.set(category, amount.scale_down(numerator, denominator));
        }
        scaled
    }

    /// Adds two breakdowns category by category, failing on overflow.
    pub fn checked_add(&self, other: &BenefitBreakdown) -> EngineResult<BenefitBreakdown> {
        let mut sum = BenefitBreakdown::ZERO;
        for category in BenefitCategory::ALL {
            sum.set(
                category,
                Money::checked_sum([self.get(category), other.get(category)])?,
            );
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(minor: u64) -> Money {
        Money::from_minor_units(minor)
    }

    fn sample() -> BenefitBreakdown {
        BenefitBreakdown {
            food: money(80_000),
            meal: money(120_000),
            transport: money(40_000),
            health: money(40_000),
            culture: money(20_000),
        }
    }

    #[test]
    fn test_total_sums_every_category() {
        assert_eq!(sample().total().unwrap(), money(300_000));
    }

    #[test]
    fn test_get_and_set_round_trip_each_category() {
        let mut breakdown = BenefitBreakdown::ZERO;
        for (i, category) in BenefitCategory::ALL.into_iter().enumerate() {
            breakdown.set(category, money(i as u64 + 1));
        }
        assert_eq!(breakdown.food, money(1));
        assert_eq!(breakdown.culture, money(5));
        assert_eq!(breakdown.get(BenefitCategory::Transport), money(3));
    }

    #[test]
    fn test_largest_category_prefers_first_on_tie() {
        let breakdown = BenefitBreakdown {
            transport: money(500),
            health: money(500),
            ..BenefitBreakdown::ZERO
        };
        assert_eq!(breakdown.largest_category(), BenefitCategory::Transport);
        assert_eq!(BenefitBreakdown::ZERO.largest_category(), BenefitCategory::Food);
    }

    #[test]
    fn test_categories_by_amount_is_stable_for_ties() {
        let ordered = sample().categories_by_amount();
        assert_eq!(
            ordered,
            [
                BenefitCategory::Meal,
                BenefitCategory::Food,
                BenefitCategory::Transport,
                BenefitCategory::Health,
                BenefitCategory::Culture,
            ]
        );
    }

    #[test]
    fn test_scale_down_never_raises_any_amount() {
        let original = sample();
        let scaled = original.scale_down(2, 3);
        for (category, amount) in scaled.iter() {
            assert!(amount <= original.get(category));
        }
        assert_eq!(scaled.meal, money(80_000));
    }

    #[test]
    fn test_is_zero() {
        assert!(BenefitBreakdown::ZERO.is_zero());
        assert!(!sample().is_zero());
    }

    #[test]
    fn test_deserialize_defaults_missing_categories_to_zero() {
        let breakdown: BenefitBreakdown = serde_json::from_str(r#"{"meal": 2500}"#).unwrap();
        assert_eq!(breakdown.meal, money(2_500));
        assert_eq!(breakdown.food, Money::ZERO);
    }

    #[test]
    fn test_deserialize_rejects_unknown_category() {
        let result = serde_json::from_str::<BenefitBreakdown>(r#"{"gym": 100}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&BenefitCategory::Transport).unwrap(),
            "\"transport\""
        );
        let parsed: BenefitCategory = serde_json::from_str("\"culture\"").unwrap();
        assert_eq!(parsed, BenefitCategory::Culture);
    }
}
