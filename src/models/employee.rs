//! Employee model and related types.
//!
//! An employee belongs to exactly one client. Its `benefits` are written by
//! the allocation engine only; callers supply a role and, for manual
//! distribution, a manual breakdown.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::client::required_text;
use super::{BenefitBreakdown, ClientId};
use crate::error::EngineResult;

/// Unique identifier of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        EmployeeId(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        EmployeeId(id)
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Represents an employee receiving benefits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The client that owns this employee.
    pub client_id: ClientId,
    /// The employee's name.
    pub name: String,
    /// The job role, used to look up a role template.
    pub role: String,
    /// Amounts entered by hand, used by manual distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_breakdown: Option<BenefitBreakdown>,
    /// The benefits last assigned by the allocation engine.
    #[serde(default)]
    pub(crate) benefits: BenefitBreakdown,
}

impl Employee {
    /// Creates an employee with a fresh identifier and no assigned benefits.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefits_engine::models::{ClientId, Employee};
    ///
    /// let employee = Employee::new(ClientId::new(), "Ana", "Junior", None).unwrap();
    /// assert_eq!(employee.role, "Junior");
    /// assert!(employee.benefits().is_zero());
    /// ```
    pub fn new(
        client_id: ClientId,
        name: impl Into<String>,
        role: impl Into<String>,
        manual_breakdown: Option<BenefitBreakdown>,
    ) -> EngineResult<Self> {
        Ok(Employee {
            id: EmployeeId::new(),
            client_id,
            name: required_text("name", name.into())?,
            role: required_text("role", role.into())?,
            manual_breakdown,
            benefits: BenefitBreakdown::ZERO,
        })
    }

    /// Returns the benefits last assigned by the allocation engine.
    pub fn benefits(&self) -> &BenefitBreakdown {
        &self.benefits
    }

    pub(crate) fn assign_benefits(&mut self, benefits: BenefitBreakdown) {
        self.benefits = benefits;
    }
}
