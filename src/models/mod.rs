//! Core data models for the benefits allocation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation_result;
mod benefit;
mod client;
mod employee;
mod money;
mod role_profile;

pub use allocation_result::{
    AllocationResult, AuditStep, AuditTrace, AuditWarning, DistributionType, EmployeeAllocation,
};
pub use benefit::{BenefitBreakdown, BenefitCategory};
pub use client::{Client, ClientId};
pub use employee::{Employee, EmployeeId};
pub use money::{MINOR_UNITS_PER_MAJOR, Money};
pub use role_profile::{RoleProfile, normalize_role};
