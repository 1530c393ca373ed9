//! The mutation boundary for one client.
//!
//! [`ClientLedger`] owns a client's limit, roster and role templates. Every
//! mutating operation re-runs [`allocate`] before returning, so
//! [`ClientLedger::current_allocation`] is never stale. A mutation whose
//! recomputation fails is undone.

use tracing::info;

use crate::calculation::{allocate, strategy_for};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationResult, BenefitBreakdown, Client, DistributionType, Employee, EmployeeId, Money,
    RoleProfile,
};

/// One client's roster, limit and last allocation.
///
/// # Example
///
/// ```
/// use benefits_engine::ledger::ClientLedger;
/// use benefits_engine::models::{
///     BenefitBreakdown, Client, DistributionType, Money, RoleProfile,
/// };
///
/// let client = Client::new("Acme", Money::from_minor_units(500_000)).unwrap();
/// let profile = RoleProfile::new().with_template(
///     "junior",
///     BenefitBreakdown { meal: Money::from_minor_units(100_000), ..BenefitBreakdown::ZERO },
/// );
/// let mut ledger = ClientLedger::new(client, DistributionType::Role, profile).unwrap();
///
/// let id = ledger.add_employee("Ana", "junior", None).unwrap();
/// let allocation = ledger.current_allocation();
/// assert_eq!(allocation.breakdown_for(id).unwrap().meal, Money::from_minor_units(100_000));
/// ```
#[derive(Debug, Clone)]
pub struct ClientLedger {
    client: Client,
    distribution: DistributionType,
    role_profile: RoleProfile,
    roster: Vec<Employee>,
    current: AllocationResult,
}

impl ClientLedger {
    /// Creates a ledger with an empty roster and computes its first allocation.
    pub fn new(
        client: Client,
        distribution: DistributionType,
        role_profile: RoleProfile,
    ) -> EngineResult<Self> {
        let current = AllocationResult::empty(distribution, client.global_limit);
        let mut ledger = Self {
            client,
            distribution,
            role_profile,
            roster: Vec::new(),
            current,
        };
        ledger.recompute()?;
        Ok(ledger)
    }

    /// The client this ledger belongs to.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The active distribution strategy.
    pub fn distribution(&self) -> DistributionType {
        self.distribution
    }

    /// The role templates used by role-based distribution.
    pub fn role_profile(&self) -> &RoleProfile {
        &self.role_profile
    }

    /// Employees in insertion order.
    pub fn employees(&self) -> &[Employee] {
        &self.roster
    }

    /// Looks up an employee.
    pub fn employee(&self, id: EmployeeId) -> EngineResult<&Employee> {
        self.roster
            .iter()
            .find(|employee| employee.id == id)
            .ok_or_else(|| EngineError::not_found("employee", id))
    }

    /// The last computed allocation, without recomputing.
    pub fn current_allocation(&self) -> &AllocationResult {
        &self.current
    }

    /// Replaces the client's monthly limit.
    pub fn set_global_limit(&mut self, amount: Money) -> EngineResult<&AllocationResult> {
        let previous = std::mem::replace(&mut self.client.global_limit, amount);
        if let Err(err) = self.recompute() {
            self.client.global_limit = previous;
            return Err(err);
        }
        info!(
            client_id = %self.client.id,
            previous = previous.minor_units(),
            global_limit = amount.minor_units(),
            "Global limit updated"
        );
        Ok(&self.current)
    }

    /// Renames the client.
    pub fn rename(&mut self, name: &str) -> EngineResult<()> {
        let renamed = Client::new(name, self.client.global_limit)?;
        self.client.name = renamed.name;
        Ok(())
    }

    /// Appends an employee to the roster and returns their new id.
    pub fn add_employee(
        &mut self,
        name: &str,
        role: &str,
        manual_breakdown: Option<BenefitBreakdown>,
    ) -> EngineResult<EmployeeId> {
        let employee = Employee::new(self.client.id, name, role, manual_breakdown)?;
        let id = employee.id;
        self.roster.push(employee);

        if let Err(err) = self.recompute() {
            self.roster.pop();
            return Err(err);
        }
        info!(
            client_id = %self.client.id,
            employee_id = %id,
            role = %role.trim(),
            roster_size = self.roster.len(),
            "Employee added"
        );
        Ok(id)
    }

    /// Removes an employee.
    pub fn remove_employee(&mut self, id: EmployeeId) -> EngineResult<&AllocationResult> {
        let index = self.position(id)?;
        let removed = self.roster.remove(index);

        if let Err(err) = self.recompute() {
            self.roster.insert(index, removed);
            return Err(err);
        }
        info!(client_id = %self.client.id, employee_id = %id, "Employee removed");
        Ok(&self.current)
    }

    /// Moves an employee to another role.
    pub fn change_role(&mut self, id: EmployeeId, role: &str) -> EngineResult<&AllocationResult> {
        self.update_employee(id, Some(role), None)
    }

    /// Replaces (or clears) an employee's manual breakdown.
    pub fn update_manual_breakdown(
        &mut self,
        id: EmployeeId,
        breakdown: Option<BenefitBreakdown>,
    ) -> EngineResult<&AllocationResult> {
        self.update_employee(id, None, Some(breakdown))
    }

    /// Changes an employee's role and manual breakdown together.
    ///
    /// `None` leaves a field as it is; `Some(None)` clears the manual
    /// breakdown. Both fields are applied before a single recomputation and
    /// both are restored if it fails.
    pub fn update_employee(
        &mut self,
        id: EmployeeId,
        role: Option<&str>,
        manual_breakdown: Option<Option<BenefitBreakdown>>,
    ) -> EngineResult<&AllocationResult> {
        let index = self.position(id)?;
        let role = role.map(str::trim);
        if role.is_some_and(str::is_empty) {
            return Err(EngineError::invalid_input("role", "must not be blank"));
        }

        let employee = &mut self.roster[index];
        let previous_role = role.map(|role| std::mem::replace(&mut employee.role, role.to_string()));
        let previous_manual = manual_breakdown
            .map(|breakdown| std::mem::replace(&mut employee.manual_breakdown, breakdown));

        if let Err(err) = self.recompute() {
            let employee = &mut self.roster[index];
            if let Some(previous) = previous_role {
                employee.role = previous;
            }
            if let Some(previous) = previous_manual {
                employee.manual_breakdown = previous;
            }
            return Err(err);
        }
        info!(
            client_id = %self.client.id,
            employee_id = %id,
            role_changed = role.is_some(),
            manual_changed = manual_breakdown.is_some(),
            "Employee updated"
        );
        Ok(&self.current)
    }

    /// Switches between role-based and manual distribution.
    pub fn set_distribution(
        &mut self,
        distribution: DistributionType,
    ) -> EngineResult<&AllocationResult> {
        let previous = std::mem::replace(&mut self.distribution, distribution);
        if let Err(err) = self.recompute() {
            self.distribution = previous;
            return Err(err);
        }
        info!(
            client_id = %self.client.id,
            distribution = distribution.as_str(),
            "Distribution type changed"
        );
        Ok(&self.current)
    }

    /// Registers or replaces the template for a role.
    pub fn set_role_template(
        &mut self,
        role: &str,
        template: BenefitBreakdown,
    ) -> EngineResult<&AllocationResult> {
        if role.trim().is_empty() {
            return Err(EngineError::invalid_input("role", "must not be blank"));
        }

        let previous = self.role_profile.clone();
        self.role_profile.insert(role, template);
        if let Err(err) = self.recompute() {
            self.role_profile = previous;
            return Err(err);
        }
        info!(client_id = %self.client.id, role = %role.trim(), "Role template updated");
        Ok(&self.current)
    }

    fn position(&self, id: EmployeeId) -> EngineResult<usize> {
        self.roster
            .iter()
            .position(|employee| employee.id == id)
            .ok_or_else(|| EngineError::not_found("employee", id))
    }

    fn recompute(&mut self) -> EngineResult<()> {
        let strategy = strategy_for(self.distribution, &self.role_profile);
        let result = allocate(&self.client, &self.roster, strategy.as_ref())?;

        for employee in &mut self.roster {
            let benefits = result
                .breakdown_for(employee.id)
                .copied()
                .unwrap_or(BenefitBreakdown::ZERO);
            employee.assign_benefits(benefits);
        }
        self.current = result;
        Ok(())
    }
}
