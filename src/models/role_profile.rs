//! Role templates used by role-based distribution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::BenefitBreakdown;

/// Maps job roles to the breakdown every employee in that role receives.
///
/// Role names are matched case-insensitively and ignoring surrounding
/// whitespace, so "Senior " and "senior" share a template.
///
/// # Example
///
/// ```
/// use benefits_engine::models::{BenefitBreakdown, Money, RoleProfile};
///
/// let template = BenefitBreakdown {
///     meal: Money::from_minor_units(50_000),
///     ..BenefitBreakdown::ZERO
/// };
/// let profile = RoleProfile::new().with_template("Junior", template);
///
/// assert_eq!(profile.template_for(" junior"), Some(&template));
/// assert!(profile.template_for("senior").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, BenefitBreakdown>",
    into = "BTreeMap<String, BenefitBreakdown>"
)]
pub struct RoleProfile {
    templates: BTreeMap<String, BenefitBreakdown>,
}

impl RoleProfile {
    /// Creates an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RoleProfile::insert`].
    pub fn with_template(mut self, role: &str, template: BenefitBreakdown) -> Self {
        self.insert(role, template);
        self
    }

    /// Registers or replaces the template for a role, returning the previous one.
    pub fn insert(&mut self, role: &str, template: BenefitBreakdown) -> Option<BenefitBreakdown> {
        self.templates.insert(normalize_role(role), template)
    }

    /// Returns the template registered for a role.
    pub fn template_for(&self, role: &str) -> Option<&BenefitBreakdown> {
        self.templates.get(&normalize_role(role))
    }

    /// Iterates over `(role, template)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BenefitBreakdown)> {
        self.templates
            .iter()
            .map(|(role, template)| (role.as_str(), template))
    }

    /// Number of registered roles.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true when no role has a template.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, BenefitBreakdown)> for RoleProfile {
    fn from_iter<I: IntoIterator<Item = (&'a str, BenefitBreakdown)>>(iter: I) -> Self {
        let mut profile = RoleProfile::new();
        for (role, template) in iter {
            profile.insert(role, template);
        }
        profile
    }
}

impl From<BTreeMap<String, BenefitBreakdown>> for RoleProfile {
    fn from(templates: BTreeMap<String, BenefitBreakdown>) -> Self {
        templates
            .iter()
            .map(|(role, template)| (role.as_str(), *template))
            .collect()
    }
}

impl From<RoleProfile> for BTreeMap<String, BenefitBreakdown> {
    fn from(profile: RoleProfile) -> Self {
        profile.templates
    }
}

/// Canonical form of a role name for template lookup.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}
