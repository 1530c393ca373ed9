//! Manual distribution: amounts entered per employee.

use crate::models::{AuditWarning, BenefitBreakdown, DistributionType, Employee};

use super::strategy::{AllocationStrategy, StrategyOutcome};

/// Warning code for an employee with no manual entry.
pub const MANUAL_BREAKDOWN_MISSING: &str = "MANUAL_BREAKDOWN_MISSING";

/// Uses each employee's manual breakdown unchanged.
///
/// The engine never scales these figures; an over-limit total is only
/// flagged on the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualStrategy;

impl AllocationStrategy for ManualStrategy {
    fn distribution(&self) -> DistributionType {
        DistributionType::Manual
    }

    fn breakdown_for(&self, employee: &Employee) -> StrategyOutcome {
        match employee.manual_breakdown {
            Some(breakdown) => StrategyOutcome {
                breakdown,
                warning: None,
                rule_id: "manual_entry",
                rule_name: "Manual Entry",
                reasoning: "Amounts entered manually for this employee".to_string(),
            },
            None => StrategyOutcome {
                breakdown: BenefitBreakdown::ZERO,
                warning: Some(AuditWarning::new(
                    MANUAL_BREAKDOWN_MISSING,
                    format!(
                        "No manual amounts entered for employee '{}'; all categories are zero",
                        employee.name
                    ),
                    "low",
                )),
                rule_id: "manual_entry",
                rule_name: "Manual Entry",
                reasoning: "No manual amounts entered - all categories set to zero".to_string(),
            },
        }
    }
}
