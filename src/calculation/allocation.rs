//! Allocation of a client's global limit across its employees.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationResult, AuditStep, AuditTrace, AuditWarning, BenefitBreakdown, Client, Employee,
    EmployeeAllocation, Money,
};

use super::role_based::scale_to_limit;
use super::strategy::AllocationStrategy;

/// Warning code for a total above the client's limit.
pub const LIMIT_EXCEEDED: &str = "LIMIT_EXCEEDED";

/// Distributes `client.global_limit` across `employees` using `strategy`.
///
/// The result holds one breakdown per employee, in input order, and reports
/// whether the total fits the limit. Strategies that scale (role-based) are
/// brought down to the limit exactly; others (manual) are left untouched and
/// flagged with `within_limit = false` when they overshoot.
///
/// The function is pure: the same inputs always produce an identical result,
/// including where rounding remainders are placed.
///
/// # Errors
///
/// Returns `InvalidInput` when an employee belongs to another client, when an
/// employee id appears twice, or when a sum exceeds the representable range.
///
/// # Examples
///
/// ```
/// use benefits_engine::calculation::{allocate, RoleBasedStrategy};
/// use benefits_engine::models::{BenefitBreakdown, Client, Employee, Money, RoleProfile};
///
/// let client = Client::new("Acme", Money::from_minor_units(100_000)).unwrap();
/// let profile = RoleProfile::new().with_template(
///     "analyst",
///     BenefitBreakdown { meal: Money::from_minor_units(80_000), ..BenefitBreakdown::ZERO },
/// );
/// let employees = vec![
///     Employee::new(client.id, "Ana", "analyst", None).unwrap(),
///     Employee::new(client.id, "Bruno", "analyst", None).unwrap(),
/// ];
///
/// let result = allocate(&client, &employees, &RoleBasedStrategy::new(&profile)).unwrap();
/// assert!(result.within_limit);
/// assert!(result.scaling_applied);
/// assert_eq!(result.total_allocated, Money::from_minor_units(100_000));
/// ```
pub fn allocate(
    client: &Client,
    employees: &[Employee],
    strategy: &dyn AllocationStrategy,
) -> EngineResult<AllocationResult> {
    validate_roster(client, employees)?;

    let distribution = strategy.distribution();
    let limit = client.global_limit;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let mut breakdowns: Vec<BenefitBreakdown> = Vec::with_capacity(employees.len());
    for employee in employees {
        let outcome = strategy.breakdown_for(employee);
        steps.push(outcome.audit_step(step_number, employee));
        step_number += 1;

        if let Some(warning) = outcome.warning {
            warn!(
                client_id = %client.id,
                employee_id = %employee.id,
                code = %warning.code,
                "{}",
                warning.message
            );
            warnings.push(warning);
        }
        breakdowns.push(outcome.breakdown);
    }

    let unscaled_total = sum_breakdowns(&breakdowns)?;

    let mut scaling_applied = false;
    if strategy.scales_to_limit() && unscaled_total > limit {
        let scaled = scale_to_limit(&breakdowns, unscaled_total, limit)?;
        steps.push(scaled.audit_step(step_number, unscaled_total, limit));
        step_number += 1;
        debug!(
            client_id = %client.id,
            unscaled_total = unscaled_total.minor_units(),
            global_limit = limit.minor_units(),
            remainder = scaled.remainder.minor_units(),
            "Scaled role templates down to the limit"
        );
        breakdowns = scaled.breakdowns;
        scaling_applied = true;
    }

    let mut category_totals = BenefitBreakdown::ZERO;
    let mut allocations = Vec::with_capacity(employees.len());
    for (employee, breakdown) in employees.iter().zip(breakdowns) {
        category_totals = category_totals.checked_add(&breakdown)?;
        allocations.push(EmployeeAllocation {
            employee_id: employee.id,
            total: breakdown.total()?,
            breakdown,
        });
    }

    let total_allocated = Money::checked_sum(allocations.iter().map(|a| a.total))?;
    let within_limit = total_allocated <= limit;
    let over_allocated = total_allocated.saturating_sub(limit);

    steps.push(AuditStep {
        step_number,
        rule_id: "limit_check".to_string(),
        rule_name: "Global Limit Check".to_string(),
        input: serde_json::json!({
            "total_allocated": total_allocated,
            "global_limit": limit,
        }),
        output: serde_json::json!({
            "within_limit": within_limit,
            "over_allocated": over_allocated,
        }),
        reasoning: if within_limit {
            format!("{} allocated of {} limit", total_allocated, limit)
        } else {
            format!(
                "{} allocated exceeds {} limit by {}",
                total_allocated, limit, over_allocated
            )
        },
    });

    if !within_limit {
        warn!(
            client_id = %client.id,
            total_allocated = total_allocated.minor_units(),
            global_limit = limit.minor_units(),
            over_allocated = over_allocated.minor_units(),
            "Allocation exceeds the global limit"
        );
        warnings.push(AuditWarning::new(
            LIMIT_EXCEEDED,
            format!(
                "Allocated {} exceeds the monthly limit of {} by {}",
                total_allocated, limit, over_allocated
            ),
            "high",
        ));
    }

    debug!(
        client_id = %client.id,
        distribution = distribution.as_str(),
        employees = employees.len(),
        total_allocated = total_allocated.minor_units(),
        within_limit,
        "Allocation computed"
    );

    Ok(AllocationResult {
        distribution,
        global_limit: limit,
        breakdowns: allocations,
        category_totals,
        total_allocated,
        within_limit,
        over_allocated,
        scaling_applied,
        audit_trace: AuditTrace { steps, warnings },
    })
}

fn validate_roster(client: &Client, employees: &[Employee]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(employees.len());
    for employee in employees {
        if employee.client_id != client.id {
            return Err(EngineError::invalid_input(
                "client_id",
                format!(
                    "employee {} belongs to client {}, not {}",
                    employee.id, employee.client_id, client.id
                ),
            ));
        }
        if !seen.insert(employee.id) {
            return Err(EngineError::invalid_input(
                "employee_id",
                format!("employee {} appears more than once", employee.id),
            ));
        }
    }
    Ok(())
}

fn sum_breakdowns(breakdowns: &[BenefitBreakdown]) -> EngineResult<Money> {
    let totals = breakdowns
        .iter()
        .map(BenefitBreakdown::total)
        .collect::<EngineResult<Vec<Money>>>()?;
    Money::checked_sum(totals)
}
