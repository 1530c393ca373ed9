//! The capability shared by every distribution strategy.

use crate::models::{
    AuditStep, AuditWarning, BenefitBreakdown, DistributionType, Employee, RoleProfile,
};

use super::manual::ManualStrategy;
use super::role_based::RoleBasedStrategy;

/// What a strategy decided for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOutcome {
    /// The breakdown before any limit scaling.
    pub breakdown: BenefitBreakdown,
    /// A non-fatal condition to surface to the user.
    pub warning: Option<AuditWarning>,
    /// Identifier of the rule that produced the breakdown.
    pub rule_id: &'static str,
    /// Human-readable name of that rule.
    pub rule_name: &'static str,
    /// Explanation recorded in the audit trace.
    pub reasoning: String,
}

impl StrategyOutcome {
    /// Converts the outcome into an audit step for `employee`.
    pub fn audit_step(&self, step_number: u32, employee: &Employee) -> AuditStep {
        // An overflowing total is recorded as null and flagged.
        let total = self.breakdown.total().ok().map(|total| total.minor_units());

        AuditStep {
            step_number,
            rule_id: self.rule_id.to_string(),
            rule_name: self.rule_name.to_string(),
            input: serde_json::json!({
                "employee_id": employee.id,
                "role": employee.role,
            }),
            output: serde_json::json!({
                "breakdown": self.breakdown,
                "total": total,
                "total_overflow": total.is_none(),
                "warning": self.warning.as_ref().map(|w| w.code.clone()),
            }),
            reasoning: self.reasoning.clone(),
        }
    }
}

/// Computes the breakdown for a single employee.
///
/// Strategies that hand out amounts the caller did not choose (role
/// templates) ask the engine to scale the combined result down to the
/// client's limit; strategies that carry caller-entered amounts are only
/// validated against it.
pub trait AllocationStrategy: Send + Sync {
    /// The distribution type this strategy implements.
    fn distribution(&self) -> DistributionType;

    /// Decides the unscaled breakdown for one employee.
    fn breakdown_for(&self, employee: &Employee) -> StrategyOutcome;

    /// Whether the engine should scale the combined result down to the limit.
    fn scales_to_limit(&self) -> bool {
        false
    }
}

/// Builds the strategy for a distribution type.
///
/// # Example
///
/// ```
/// use benefits_engine::calculation::strategy_for;
/// use benefits_engine::models::{DistributionType, RoleProfile};
///
/// let profile = RoleProfile::new();
/// let strategy = strategy_for(DistributionType::Role, &profile);
/// assert!(strategy.scales_to_limit());
/// ```
pub fn strategy_for(
    distribution: DistributionType,
    role_profile: &RoleProfile,
) -> Box<dyn AllocationStrategy + '_> {
    match distribution {
        DistributionType::Role => Box::new(RoleBasedStrategy::new(role_profile)),
        DistributionType::Manual => Box::new(ManualStrategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientId, Money};

    #[test]
    fn test_strategy_for_matches_distribution_type() {
        let profile = RoleProfile::new();
        assert_eq!(
            strategy_for(DistributionType::Role, &profile).distribution(),
            DistributionType::Role
        );
        let manual = strategy_for(DistributionType::Manual, &profile);
        assert_eq!(manual.distribution(), DistributionType::Manual);
        assert!(!manual.scales_to_limit());
    }

    #[test]
    fn test_audit_step_records_employee_and_total() {
        let employee = Employee::new(ClientId::new(), "Ana", "junior", None).unwrap();
        let outcome = StrategyOutcome {
            breakdown: BenefitBreakdown {
                food: Money::from_minor_units(1_000),
                health: Money::from_minor_units(500),
                ..BenefitBreakdown::ZERO
            },
            warning: None,
            rule_id: "role_template",
            rule_name: "Role Template",
            reasoning: "template applied".to_string(),
        };

        let step = outcome.audit_step(3, &employee);
        assert_eq!(step.step_number, 3);
        assert_eq!(step.rule_id, "role_template");
        assert_eq!(step.input["role"], "junior");
        assert_eq!(step.output["total"], 1_500);
        assert_eq!(step.output["total_overflow"], false);
        assert!(step.output["warning"].is_null());
    }

    #[test]
    fn test_audit_step_flags_overflowing_total() {
        let employee = Employee::new(ClientId::new(), "Ana", "any", None).unwrap();
        let outcome = StrategyOutcome {
            breakdown: BenefitBreakdown {
                food: Money::from_minor_units(u64::MAX),
                meal: Money::from_minor_units(1),
                ..BenefitBreakdown::ZERO
            },
            warning: None,
            rule_id: "manual_entry",
            rule_name: "Manual Entry",
            reasoning: "entered".to_string(),
        };

        let step = outcome.audit_step(1, &employee);
        assert!(step.output["total"].is_null());
        assert_eq!(step.output["total_overflow"], true);
    }
}
