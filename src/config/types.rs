//! Configuration types for benefit programs.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::calculation::CurrencyNames;
use crate::error::EngineResult;
use crate::models::{BenefitBreakdown, DistributionType, Money, RoleProfile};

/// Metadata about the benefit program, from `program.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramMetadata {
    /// The human-readable name of the program.
    pub name: String,
    /// The version of the program configuration.
    pub version: String,
    /// Names used when writing amounts out in words.
    #[serde(default)]
    pub currency: CurrencyNames,
    /// Distribution type given to newly registered clients.
    #[serde(default)]
    pub default_distribution: DistributionType,
}

/// A role template as written in YAML, in major units.
///
/// Missing categories default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateAmounts {
    /// Grocery allowance.
    #[serde(default)]
    pub food: Decimal,
    /// Prepared-meal allowance.
    #[serde(default)]
    pub meal: Decimal,
    /// Commuting allowance.
    #[serde(default)]
    pub transport: Decimal,
    /// Health and wellness allowance.
    #[serde(default)]
    pub health: Decimal,
    /// Culture and leisure allowance.
    #[serde(default)]
    pub culture: Decimal,
}

impl TemplateAmounts {
    /// Converts to minor units, rejecting negative or fractional-cent values.
    pub fn to_breakdown(&self) -> EngineResult<BenefitBreakdown> {
        Ok(BenefitBreakdown {
            food: Money::from_decimal(self.food)?,
            meal: Money::from_decimal(self.meal)?,
            transport: Money::from_decimal(self.transport)?,
            health: Money::from_decimal(self.health)?,
            culture: Money::from_decimal(self.culture)?,
        })
    }
}

/// A template file from the `templates/` directory.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSetFile {
    /// The date from which these templates apply.
    pub effective_date: NaiveDate,
    /// Map of role name to template amounts.
    pub roles: BTreeMap<String, TemplateAmounts>,
}

/// Role templates effective from a date, converted to minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// The date from which these templates apply.
    pub effective_date: NaiveDate,
    /// The templates themselves.
    pub profile: RoleProfile,
}

/// The complete program configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Program metadata.
    metadata: ProgramMetadata,
    /// Template sets by effective date (sorted oldest first).
    template_sets: Vec<TemplateSet>,
}

impl ProgramConfig {
    /// Creates a new ProgramConfig from its component parts.
    pub fn new(metadata: ProgramMetadata, template_sets: Vec<TemplateSet>) -> Self {
        let mut sorted = template_sets;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            template_sets: sorted,
        }
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        &self.metadata
    }

    /// Returns all template sets, oldest first.
    pub fn template_sets(&self) -> &[TemplateSet] {
        &self.template_sets
    }
}
