//! Application state for the benefits allocation API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::ledger::ClientRegistry;

/// Shared application state.
///
/// Holds the loaded program configuration and the registry of every
/// client's ledger.
#[derive(Clone)]
pub struct AppState {
    /// The loaded program configuration.
    config: Arc<ConfigLoader>,
    /// Every registered client.
    registry: Arc<ClientRegistry>,
}

impl AppState {
    /// Creates a new application state with an empty registry.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ClientRegistry::new()),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the client registry.
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }
}
