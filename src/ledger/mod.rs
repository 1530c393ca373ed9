//! Stateful ownership of client rosters.
//!
//! [`ClientLedger`] is the single mutation boundary for one client;
//! [`ClientRegistry`] holds every client's ledger for callers that share
//! them across tasks.

mod client_ledger;
mod registry;

pub use client_ledger::ClientLedger;
pub use registry::{ClientRegistry, LedgerHandle};
