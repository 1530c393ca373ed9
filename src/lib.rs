//! Benefits allocation engine.
//!
//! This crate distributes a client company's monthly benefits limit across
//! its employees (by role template or by hand-entered amounts), keeps each
//! client's roster and allocation current through a ledger, and writes
//! monetary amounts out in Portuguese words.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
