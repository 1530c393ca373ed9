//! Client (company) model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;
use crate::error::{EngineError, EngineResult};

/// Unique identifier of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        ClientId(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        ClientId(id)
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A company whose employees receive benefits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier for the client.
    pub id: ClientId,
    /// The company name.
    pub name: String,
    /// Monthly ceiling across all of the client's employees.
    pub global_limit: Money,
}

impl Client {
    /// Creates a client with a fresh identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use benefits_engine::models::{Client, Money};
    ///
    /// let client = Client::new("Acme", Money::from_minor_units(500_000)).unwrap();
    /// assert_eq!(client.name, "Acme");
    /// assert!(Client::new("   ", Money::ZERO).is_err());
    /// ```
    pub fn new(name: impl Into<String>, global_limit: Money) -> EngineResult<Self> {
        Ok(Client {
            id: ClientId::new(),
            name: required_text("name", name.into())?,
            global_limit,
        })
    }
}

/// Trims a required text field, rejecting blank values.
pub(crate) fn required_text(field: &str, value: String) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_trims_name() {
        let client = Client::new("  Acme Ltda  ", Money::from_minor_units(100)).unwrap();
        assert_eq!(client.name, "Acme Ltda");
        assert_eq!(client.global_limit.minor_units(), 100);
    }

    #[test]
    fn test_new_client_rejects_blank_name() {
        let err = Client::new("", Money::ZERO).unwrap_err();
        assert_eq!(err, EngineError::invalid_input("name", "must not be blank"));
    }

    #[test]
    fn test_client_ids_are_unique() {
        assert_ne!(ClientId::new(), ClientId::new());
    }

    #[test]
    fn test_client_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&ClientId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
