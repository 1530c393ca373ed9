//! Request types for the benefits allocation API.
//!
//! Amounts arrive as decimals in major units (`"5000.00"` or `5000`) and are
//! converted to minor units here, before anything reaches the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{BenefitBreakdown, DistributionType, Money};

/// Request body for `POST /clients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterClientRequest {
    /// Display name of the client.
    pub name: String,
    /// Monthly limit in major units.
    pub global_limit: Decimal,
    /// Distribution type; the program default when omitted.
    #[serde(default)]
    pub distribution: Option<DistributionType>,
}

/// Request body for `PUT /clients/:client_id/limit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLimitRequest {
    /// New monthly limit in major units.
    pub global_limit: Decimal,
}

/// Request body for `PUT /clients/:client_id/distribution`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDistributionRequest {
    /// The distribution type to switch to.
    pub distribution: DistributionType,
}

/// Per-category amounts in major units. Omitted categories are zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenefitAmountsRequest {
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

impl TryFrom<BenefitAmountsRequest> for BenefitBreakdown {
    type Error = crate::error::EngineError;

    fn try_from(req: BenefitAmountsRequest) -> EngineResult<Self> {
        Ok(BenefitBreakdown {
            food: Money::from_decimal(req.food)?,
            meal: Money::from_decimal(req.meal)?,
            transport: Money::from_decimal(req.transport)?,
            health: Money::from_decimal(req.health)?,
            culture: Money::from_decimal(req.culture)?,
        })
    }
}

/// Request body for `POST /clients/:client_id/employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    /// Employee name.
    pub name: String,
    /// Job role, matched case-insensitively against the role templates.
    pub role: String,
    /// Manual breakdown, used under manual distribution.
    #[serde(default)]
    pub benefits: Option<BenefitAmountsRequest>,
}

/// Request body for `PUT /clients/:client_id/employees/:employee_id`.
///
/// Only the fields present are changed. `"benefits": null` clears the
/// manual breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// New job role.
    #[serde(default)]
    pub role: Option<String>,
    /// New manual breakdown; `Some(None)` when sent as null.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub benefits: Option<Option<BenefitAmountsRequest>>,
}

/// Keeps an explicit null apart from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string for `GET /words`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsQuery {
    /// The amount in major units.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_register_request_with_string_amount() {
        let json = r#"{"name": "Acme", "global_limit": "5000.00"}"#;
        let request: RegisterClientRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Acme");
        assert_eq!(
            Money::from_decimal(request.global_limit).unwrap(),
            Money::from_minor_units(500_000)
        );
        assert!(request.distribution.is_none());
    }

    #[test]
    fn test_deserialize_register_request_with_distribution() {
        let json = r#"{"name": "Acme", "global_limit": 10, "distribution": "manual"}"#;
        let request: RegisterClientRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.distribution, Some(DistributionType::Manual));
    }

    #[test]
    fn test_benefit_amounts_conversion() {
        let json = r#"{"meal": "1200.00", "culture": "0.50"}"#;
        let request: BenefitAmountsRequest = serde_json::from_str(json).unwrap();
        let breakdown = BenefitBreakdown::try_from(request).unwrap();
        assert_eq!(breakdown.meal, Money::from_minor_units(120_000));
        assert_eq!(breakdown.culture, Money::from_minor_units(50));
        assert!(breakdown.food.is_zero());
    }

    #[test]
    fn test_benefit_amounts_reject_fractional_cents() {
        let json = r#"{"food": "10.005"}"#;
        let request: BenefitAmountsRequest = serde_json::from_str(json).unwrap();
        assert!(BenefitBreakdown::try_from(request).is_err());
    }

    #[test]
    fn test_benefit_amounts_reject_unknown_category() {
        let result = serde_json::from_str::<BenefitAmountsRequest>(r#"{"gym": "10"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_employee_request_fields_are_optional() {
        let request: UpdateEmployeeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.role.is_none());
        assert!(request.benefits.is_none());
    }

    #[test]
    fn test_update_employee_request_null_benefits_clears() {
        let request: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"benefits": null}"#).unwrap();
        assert!(matches!(request.benefits, Some(None)));

        let request: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"benefits": {"meal": "12.50"}}"#).unwrap();
        let amounts = request.benefits.flatten().unwrap();
        assert_eq!(amounts.meal, Decimal::new(1250, 2));
    }
}
