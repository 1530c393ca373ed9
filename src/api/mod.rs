//! HTTP API module for the benefits allocation engine.
//!
//! This module exposes client registration, the per-client allocation
//! dashboard and the amount verbalizer as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AddEmployeeRequest, BenefitAmountsRequest, RegisterClientRequest, UpdateDistributionRequest,
    UpdateEmployeeRequest, UpdateLimitRequest, WordsQuery,
};
pub use response::{
    AllocationReport, ApiError, ApiErrorResponse, ClientSummary, EmployeeAdded, WordsResponse,
};
pub use state::AppState;
