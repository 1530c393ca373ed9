//! Allocation result models.
//!
//! This module contains the [`AllocationResult`] type and its associated
//! structures that capture all outputs of an allocation run: the breakdown
//! assigned to each employee, the totals checked against the client's
//! ceiling, and an audit trace of every decision taken.
//!
//! A result holds no timestamps or random identifiers, so two runs over the
//! same inputs compare equal.

use serde::{Deserialize, Serialize};

use super::{BenefitBreakdown, EmployeeId, Money};

/// The strategy used to distribute a client's limit.
///
/// # Example
///
/// ```
/// use benefits_engine::models::DistributionType;
///
/// let parsed: DistributionType = serde_json::from_str("\"manual\"").unwrap();
/// assert_eq!(parsed, DistributionType::Manual);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionType {
    /// Every employee receives the template of their role, scaled to the limit.
    #[default]
    Role,
    /// Every employee receives the amounts entered for them by hand.
    Manual,
}

impl DistributionType {
    /// Returns the snake_case name used in JSON and YAML.
    pub fn as_str(self) -> &'static str {
        match self {
            DistributionType::Role => "role",
            DistributionType::Manual => "manual",
        }
    }
}

/// The benefits allocated to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAllocation {
    /// The employee this allocation belongs to.
    pub employee_id: EmployeeId,
    /// The allocated amount per category.
    pub breakdown: BenefitBreakdown,
    /// Sum of every category in `breakdown`.
    pub total: Money,
}

/// A single step in the audit trace recording an allocation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during allocation.
///
/// Warnings indicate conditions that don't prevent allocation
/// but should be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for an allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of allocation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during allocation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of distributing a client's limit.
///
/// # Example
///
/// ```
/// use benefits_engine::models::{AllocationResult, DistributionType, Money};
///
/// let result = AllocationResult::empty(DistributionType::Role, Money::from_minor_units(1_000));
/// assert!(result.within_limit);
/// assert_eq!(result.remaining(), Money::from_minor_units(1_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The strategy that produced this result.
    pub distribution: DistributionType,
    /// The client's ceiling at the time of allocation.
    pub global_limit: Money,
    /// One entry per employee, in roster order.
    pub breakdowns: Vec<EmployeeAllocation>,
    /// Per-category sums across every employee.
    pub category_totals: BenefitBreakdown,
    /// Exact sum of every allocated amount.
    pub total_allocated: Money,
    /// True iff `total_allocated <= global_limit`.
    pub within_limit: bool,
    /// How far `total_allocated` exceeds the limit (zero when within it).
    pub over_allocated: Money,
    /// True when role templates were scaled down to fit the limit.
    pub scaling_applied: bool,
    /// Complete audit trace of allocation decisions.
    pub audit_trace: AuditTrace,
}

impl AllocationResult {
    /// The result for a client with no employees.
    pub fn empty(distribution: DistributionType, global_limit: Money) -> Self {
        AllocationResult {
            distribution,
            global_limit,
            breakdowns: Vec::new(),
            category_totals: BenefitBreakdown::ZERO,
            total_allocated: Money::ZERO,
            within_limit: true,
            over_allocated: Money::ZERO,
            scaling_applied: false,
            audit_trace: AuditTrace::default(),
        }
    }

    /// Returns the breakdown allocated to an employee.
    pub fn breakdown_for(&self, employee_id: EmployeeId) -> Option<&BenefitBreakdown> {
        self.breakdowns
            .iter()
            .find(|allocation| allocation.employee_id == employee_id)
            .map(|allocation| &allocation.breakdown)
    }

    /// Portion of the limit that is still unallocated.
    pub fn remaining(&self) -> Money {
        self.global_limit.saturating_sub(self.total_allocated)
    }

    /// Returns true when the allocation breaks the client's ceiling.
    pub fn limit_exceeded(&self) -> bool {
        !self.within_limit
    }
}
