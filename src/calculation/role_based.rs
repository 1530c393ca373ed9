//! Role-based distribution.
//!
//! Every employee receives the template registered for their role. When the
//! templates together exceed the client's limit, [`scale_to_limit`] reduces
//! every amount by the same ratio so the total lands exactly on the limit.

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, BenefitBreakdown, BenefitCategory, DistributionType, Employee, Money,
    RoleProfile,
};

use super::strategy::{AllocationStrategy, StrategyOutcome};

/// Warning code for an employee whose role has no template.
pub const ROLE_TEMPLATE_MISSING: &str = "ROLE_TEMPLATE_MISSING";

/// Hands out role templates from a [`RoleProfile`].
#[derive(Debug, Clone, Copy)]
pub struct RoleBasedStrategy<'a> {
    profile: &'a RoleProfile,
}

impl<'a> RoleBasedStrategy<'a> {
    /// Creates a strategy reading templates from `profile`.
    pub fn new(profile: &'a RoleProfile) -> Self {
        Self { profile }
    }
}

impl AllocationStrategy for RoleBasedStrategy<'_> {
    fn distribution(&self) -> DistributionType {
        DistributionType::Role
    }

    fn breakdown_for(&self, employee: &Employee) -> StrategyOutcome {
        match self.profile.template_for(&employee.role) {
            Some(template) => StrategyOutcome {
                breakdown: *template,
                warning: None,
                rule_id: "role_template",
                rule_name: "Role Template",
                reasoning: format!("Template for role '{}' applied", employee.role),
            },
            None => StrategyOutcome {
                breakdown: BenefitBreakdown::ZERO,
                warning: Some(AuditWarning::new(
                    ROLE_TEMPLATE_MISSING,
                    format!(
                        "No template registered for role '{}'; employee '{}' receives no benefits",
                        employee.role, employee.name
                    ),
                    "medium",
                )),
                rule_id: "role_template",
                rule_name: "Role Template",
                reasoning: format!(
                    "No template for role '{}' - all categories set to zero",
                    employee.role
                ),
            },
        }
    }

    fn scales_to_limit(&self) -> bool {
        true
    }
}

/// Where part of the rounding remainder was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainderPlacement {
    /// Position of the employee in the roster.
    pub index: usize,
    /// The category that received the amount.
    pub category: BenefitCategory,
    /// The amount added.
    pub amount: Money,
}

/// The breakdowns after proportional scaling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaledAllocation {
    /// Scaled breakdowns, one per input breakdown, same order.
    pub breakdowns: Vec<BenefitBreakdown>,
    /// Sum after rounding every amount down, before the remainder.
    pub floor_total: Money,
    /// `limit - floor_total`, placed back through `placements`.
    pub remainder: Money,
    /// Where the remainder went.
    pub placements: Vec<RemainderPlacement>,
}

impl ScaledAllocation {
    /// Records the scaling decision in the audit trace.
    pub fn audit_step(&self, step_number: u32, unscaled_total: Money, limit: Money) -> AuditStep {
        let placements: Vec<serde_json::Value> = self
            .placements
            .iter()
            .map(|p| {
                serde_json::json!({
                    "employee_index": p.index,
                    "category": p.category,
                    "amount": p.amount,
                })
            })
            .collect();

        AuditStep {
            step_number,
            rule_id: "proportional_scaling".to_string(),
            rule_name: "Proportional Scaling".to_string(),
            input: serde_json::json!({
                "unscaled_total": unscaled_total,
                "global_limit": limit,
            }),
            output: serde_json::json!({
                "floor_total": self.floor_total,
                "remainder": self.remainder,
                "placements": placements,
            }),
            reasoning: format!(
                "Templates total {} exceeds limit {} - every amount scaled by {}/{} and rounded down, remainder of {} placed on the first employee's largest category",
                unscaled_total, limit, limit.minor_units(), unscaled_total.minor_units(), self.remainder
            ),
        }
    }
}

/// Scales breakdowns so their combined total equals `limit` exactly.
///
/// Every amount is multiplied by `limit / unscaled_total` and rounded down.
/// The rounding remainder goes to the largest category of the first
/// employee; if that category would rise above its unscaled value the rest
/// moves on to the next largest category, then to the next employee. No
/// amount ever ends above its unscaled value.
///
/// When `unscaled_total <= limit` the breakdowns are returned unchanged.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::scale_to_limit;
/// use benefits_engine::models::{BenefitBreakdown, Money};
///
/// let template = |meal| BenefitBreakdown { meal: Money::from_minor_units(meal), ..BenefitBreakdown::ZERO };
/// let scaled = scale_to_limit(
///     &[template(300), template(400)],
///     Money::from_minor_units(700),
///     Money::from_minor_units(500),
/// ).unwrap();
///
/// let total: u64 = scaled.breakdowns.iter().map(|b| b.meal.minor_units()).sum();
/// assert_eq!(total, 500);
/// ```
pub fn scale_to_limit(
    unscaled: &[BenefitBreakdown],
    unscaled_total: Money,
    limit: Money,
) -> EngineResult<ScaledAllocation> {
    if unscaled_total <= limit {
        return Ok(ScaledAllocation {
            breakdowns: unscaled.to_vec(),
            floor_total: unscaled_total,
            remainder: Money::ZERO,
            placements: Vec::new(),
        });
    }

    let numerator = limit.minor_units();
    let denominator = unscaled_total.minor_units();

    let mut breakdowns: Vec<BenefitBreakdown> = unscaled
        .iter()
        .map(|breakdown| breakdown.scale_down(numerator, denominator))
        .collect();

    let floor_totals = breakdowns
        .iter()
        .map(BenefitBreakdown::total)
        .collect::<EngineResult<Vec<Money>>>()?;
    let floor_total = Money::checked_sum(floor_totals)?;
    let remainder = limit.saturating_sub(floor_total);

    let mut left = remainder.minor_units();
    let mut placements = Vec::new();

    'employees: for (index, (scaled, original)) in
        breakdowns.iter_mut().zip(unscaled.iter()).enumerate()
    {
        for category in original.categories_by_amount() {
            if left == 0 {
                break 'employees;
            }
            let current = scaled.get(category).minor_units();
            let capacity = original.get(category).minor_units() - current;
            let take = capacity.min(left);
            if take > 0 {
                scaled.set(category, Money::from_minor_units(current + take));
                placements.push(RemainderPlacement {
                    index,
                    category,
                    amount: Money::from_minor_units(take),
                });
                left -= take;
            }
        }
    }

    Ok(ScaledAllocation {
        breakdowns,
        floor_total,
        remainder,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientId;
    use proptest::prelude::*;

    fn money(minor: u64) -> Money {
        Money::from_minor_units(minor)
    }

    fn junior_template() -> BenefitBreakdown {
        BenefitBreakdown {
            food: money(80_000),
            meal: money(120_000),
            transport: money(40_000),
            health: money(40_000),
            culture: money(20_000),
        }
    }

    fn senior_template() -> BenefitBreakdown {
        BenefitBreakdown {
            food: money(90_000),
            meal: money(140_000),
            transport: money(50_000),
            health: money(45_000),
            culture: money(25_000),
        }
    }

    fn total(breakdowns: &[BenefitBreakdown]) -> Money {
        Money::checked_sum(breakdowns.iter().map(|b| b.total().unwrap())).unwrap()
    }

    #[test]
    fn test_template_applied_for_known_role() {
        let profile = RoleProfile::new().with_template("junior", junior_template());
        let strategy = RoleBasedStrategy::new(&profile);
        let employee = Employee::new(ClientId::new(), "Ana", "Junior", None).unwrap();

        let outcome = strategy.breakdown_for(&employee);
        assert_eq!(outcome.breakdown, junior_template());
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn test_missing_template_yields_zero_and_warning() {
        let profile = RoleProfile::new();
        let strategy = RoleBasedStrategy::new(&profile);
        let employee = Employee::new(ClientId::new(), "Ana", "intern", None).unwrap();

        let outcome = strategy.breakdown_for(&employee);
        assert!(outcome.breakdown.is_zero());
        let warning = outcome.warning.unwrap();
        assert_eq!(warning.code, ROLE_TEMPLATE_MISSING);
        assert!(warning.message.contains("intern"));
    }

    #[test]
    fn test_no_scaling_when_within_limit() {
        let unscaled = [junior_template()];
        let scaled = scale_to_limit(&unscaled, money(300_000), money(500_000)).unwrap();
        assert_eq!(scaled.breakdowns, unscaled.to_vec());
        assert_eq!(scaled.remainder, Money::ZERO);
        assert!(scaled.placements.is_empty());
    }

    #[test]
    fn test_junior_senior_scenario_lands_exactly_on_limit() {
        let unscaled = [junior_template(), senior_template()];
        let scaled = scale_to_limit(&unscaled, money(650_000), money(500_000)).unwrap();

        assert_eq!(scaled.floor_total, money(499_995));
        assert_eq!(scaled.remainder, money(5));
        assert_eq!(total(&scaled.breakdowns), money(500_000));

        // Whole remainder absorbed by the junior's meal category.
        assert_eq!(
            scaled.placements,
            vec![RemainderPlacement {
                index: 0,
                category: BenefitCategory::Meal,
                amount: money(5),
            }]
        );
        assert_eq!(scaled.breakdowns[0].meal, money(92_312));
        assert_eq!(scaled.breakdowns[1].meal, money(107_692));
    }

    #[test]
    fn test_remainder_spills_when_first_category_is_saturated() {
        // Each 1-cent amount floors to zero at a 2/3 ratio.
        let tiny = BenefitBreakdown {
            food: money(1),
            meal: money(1),
            transport: money(1),
            ..BenefitBreakdown::ZERO
        };
        let unscaled = [tiny];
        let scaled = scale_to_limit(&unscaled, money(3), money(2)).unwrap();

        assert_eq!(total(&scaled.breakdowns), money(2));
        assert_eq!(scaled.breakdowns[0].food, money(1));
        assert_eq!(scaled.breakdowns[0].meal, money(1));
        assert_eq!(scaled.breakdowns[0].transport, Money::ZERO);
        assert_eq!(scaled.placements.len(), 2);
    }

    #[test]
    fn test_remainder_skips_employee_without_template() {
        let unscaled = [
            BenefitBreakdown::ZERO,
            BenefitBreakdown {
                health: money(10),
                culture: money(5),
                ..BenefitBreakdown::ZERO
            },
        ];
        let scaled = scale_to_limit(&unscaled, money(15), money(7)).unwrap();

        assert!(scaled.breakdowns[0].is_zero());
        assert_eq!(total(&scaled.breakdowns), money(7));
        assert!(scaled.placements.iter().all(|p| p.index == 1));
    }

    #[test]
    fn test_zero_limit_zeroes_everything() {
        let unscaled = [junior_template(), senior_template()];
        let scaled = scale_to_limit(&unscaled, money(650_000), Money::ZERO).unwrap();
        assert!(scaled.breakdowns.iter().all(BenefitBreakdown::is_zero));
    }

    #[test]
    fn test_scaling_audit_step_reports_remainder() {
        let unscaled = [junior_template(), senior_template()];
        let scaled = scale_to_limit(&unscaled, money(650_000), money(500_000)).unwrap();
        let step = scaled.audit_step(4, money(650_000), money(500_000));

        assert_eq!(step.rule_id, "proportional_scaling");
        assert_eq!(step.output["remainder"], 5);
        assert_eq!(step.output["placements"][0]["category"], "meal");
        assert!(step.reasoning.contains("500000/650000"));
    }

    fn arb_breakdown() -> impl Strategy<Value = BenefitBreakdown> {
        proptest::array::uniform5(0u64..1_000_000).prop_map(|[food, meal, transport, health, culture]| {
            BenefitBreakdown {
                food: money(food),
                meal: money(meal),
                transport: money(transport),
                health: money(health),
                culture: money(culture),
            }
        })
    }

    proptest! {
        #[test]
        fn prop_scaled_total_equals_limit_and_never_raises(
            unscaled in proptest::collection::vec(arb_breakdown(), 1..20),
            limit_ratio in 0u64..1_000,
        ) {
            let unscaled_total = total(&unscaled);
            let limit = unscaled_total.scale_down(limit_ratio, 1_000);
            let scaled = scale_to_limit(&unscaled, unscaled_total, limit).unwrap();

            if unscaled_total > limit {
                prop_assert_eq!(total(&scaled.breakdowns), limit);
            }
            for (after, before) in scaled.breakdowns.iter().zip(unscaled.iter()) {
                for category in BenefitCategory::ALL {
                    prop_assert!(after.get(category) <= before.get(category));
                }
            }
        }
    }
}
