//! Shared registry of every client's ledger.
//!
//! Each ledger sits behind its own async mutex, so mutations on one client
//! run one at a time while different clients proceed in parallel. The map
//! itself is behind a read-write lock that is only held long enough to
//! clone a ledger handle.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Client, ClientId, DistributionType, Money, RoleProfile};

use super::ClientLedger;

/// Shared handle to one client's ledger.
pub type LedgerHandle = Arc<Mutex<ClientLedger>>;

/// All registered clients, keyed by id.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    ledgers: RwLock<HashMap<ClientId, LedgerHandle>>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client with an empty roster.
    pub async fn register(
        &self,
        name: &str,
        global_limit: Money,
        distribution: DistributionType,
        role_profile: RoleProfile,
    ) -> EngineResult<Client> {
        let client = Client::new(name, global_limit)?;
        let ledger = ClientLedger::new(client.clone(), distribution, role_profile)?;

        self.ledgers
            .write()
            .await
            .insert(client.id, Arc::new(Mutex::new(ledger)));

        info!(
            client_id = %client.id,
            global_limit = global_limit.minor_units(),
            distribution = distribution.as_str(),
            "Client registered"
        );
        Ok(client)
    }

    /// Returns the ledger of a client.
    pub async fn ledger(&self, id: ClientId) -> EngineResult<LedgerHandle> {
        self.ledgers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("client", id))
    }

    /// Removes a client together with all of its employees.
    pub async fn remove(&self, id: ClientId) -> EngineResult<()> {
        let removed = self.ledgers.write().await.remove(&id);
        match removed {
            Some(ledger) => {
                let employees = ledger.lock().await.employees().len();
                info!(client_id = %id, employees, "Client removed");
                Ok(())
            }
            None => Err(EngineError::not_found("client", id)),
        }
    }

    /// Every registered client, ordered by name then id.
    pub async fn list(&self) -> Vec<Client> {
        let handles: Vec<LedgerHandle> = self.ledgers.read().await.values().cloned().collect();

        let mut clients = Vec::with_capacity(handles.len());
        for handle in handles {
            clients.push(handle.lock().await.client().clone());
        }
        clients.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        clients
    }

    /// Number of registered clients.
    pub async fn len(&self) -> usize {
        self.ledgers.read().await.len()
    }

    /// Returns true when no client is registered.
    pub async fn is_empty(&self) -> bool {
        self.ledgers.read().await.is_empty()
    }
}
