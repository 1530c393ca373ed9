//! Calculation logic for the benefits allocation engine.
//!
//! This module contains the verbalizer that writes amounts out in
//! Portuguese, the two distribution strategies (role templates and manual
//! entry), proportional scaling of role templates to a client's limit, and
//! the allocation function that ties them together.

mod allocation;
mod manual;
mod role_based;
mod strategy;
mod verbalizer;

pub use allocation::{LIMIT_EXCEEDED, allocate};
pub use manual::{MANUAL_BREAKDOWN_MISSING, ManualStrategy};
pub use role_based::{
    ROLE_TEMPLATE_MISSING, RemainderPlacement, RoleBasedStrategy, ScaledAllocation,
    scale_to_limit,
};
pub use strategy::{AllocationStrategy, StrategyOutcome, strategy_for};
pub use verbalizer::{CurrencyNames, describe_amount, to_words, to_words_signed};
