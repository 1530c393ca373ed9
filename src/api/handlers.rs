//! HTTP request handlers for the benefits allocation API.
//!
//! Every client-scoped route carries the client id in its path, so the
//! handlers hold no notion of a "current" client.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CurrencyNames, describe_amount};
use crate::error::EngineError;
use crate::ledger::ClientLedger;
use crate::models::{BenefitBreakdown, ClientId, EmployeeId, Money, RoleProfile};

use super::request::{
    AddEmployeeRequest, BenefitAmountsRequest, RegisterClientRequest, UpdateDistributionRequest,
    UpdateEmployeeRequest, UpdateLimitRequest, WordsQuery,
};
use super::response::{
    AllocationReport, ApiError, ApiErrorResponse, ClientSummary, EmployeeAdded, WordsResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/clients", post(register_client).get(list_clients))
        .route("/clients/:client_id", delete(remove_client))
        .route("/clients/:client_id/allocation", get(get_allocation))
        .route("/clients/:client_id/limit", put(update_limit))
        .route("/clients/:client_id/distribution", put(update_distribution))
        .route("/clients/:client_id/roles/:role", put(set_role_template))
        .route("/clients/:client_id/employees", post(add_employee))
        .route(
            "/clients/:client_id/employees/:employee_id",
            put(update_employee).delete(remove_employee),
        )
        .route("/words", get(words))
        .with_state(state)
}

/// Handler for POST /clients.
async fn register_client(
    State(state): State<AppState>,
    payload: Result<Json<RegisterClientRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing client registration");

    let request = json_body(payload, correlation_id)?;
    let global_limit =
        Money::from_decimal(request.global_limit).map_err(|e| rejected(correlation_id, e))?;
    let distribution = request
        .distribution
        .unwrap_or_else(|| state.config().default_distribution());

    let today = Utc::now().date_naive();
    let profile = match state.config().role_profile_for(today) {
        Ok(profile) => profile,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "No role templates in force");
            RoleProfile::new()
        }
    };

    let client = state
        .registry()
        .register(&request.name, global_limit, distribution, profile)
        .await
        .map_err(|e| rejected(correlation_id, e))?;

    info!(correlation_id = %correlation_id, client_id = %client.id, "Client registration completed");
    Ok((
        StatusCode::CREATED,
        Json(ClientSummary::new(client, state.config().currency())),
    ))
}

/// Handler for GET /clients.
async fn list_clients(State(state): State<AppState>) -> Json<Vec<ClientSummary>> {
    let currency = state.config().currency();
    let clients = state.registry().list().await;
    Json(
        clients
            .into_iter()
            .map(|client| ClientSummary::new(client, currency))
            .collect(),
    )
}

/// Handler for DELETE /clients/:client_id.
async fn remove_client(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let client_id = path_params(path, correlation_id)?;

    state
        .registry()
        .remove(client_id)
        .await
        .map_err(|e| rejected(correlation_id, e))?;

    info!(correlation_id = %correlation_id, client_id = %client_id, "Client removal completed");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /clients/:client_id/allocation.
async fn get_allocation(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
) -> ApiResult<Json<AllocationReport>> {
    let correlation_id = Uuid::new_v4();
    let client_id = path_params(path, correlation_id)?;

    let handle = state
        .registry()
        .ledger(client_id)
        .await
        .map_err(|e| rejected(correlation_id, e))?;
    let ledger = handle.lock().await;

    Ok(Json(report(&ledger, state.config().currency())))
}

/// Handler for PUT /clients/:client_id/limit.
async fn update_limit(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
    payload: Result<Json<UpdateLimitRequest>, JsonRejection>,
) -> ApiResult<Json<AllocationReport>> {
    let correlation_id = Uuid::new_v4();
    let client_id = path_params(path, correlation_id)?;
    let request = json_body(payload, correlation_id)?;
    let global_limit =
        Money::from_decimal(request.global_limit).map_err(|e| rejected(correlation_id, e))?;

    mutate(&state, client_id, correlation_id, "limit", |ledger| {
        ledger.set_global_limit(global_limit).map(|_| ())
    })
    .await
}

/// Handler for PUT /clients/:client_id/distribution.
async fn update_distribution(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
    payload: Result<Json<UpdateDistributionRequest>, JsonRejection>,
) -> ApiResult<Json<AllocationReport>> {
    let correlation_id = Uuid::new_v4();
    let client_id = path_params(path, correlation_id)?;
    let request = json_body(payload, correlation_id)?;

    mutate(&state, client_id, correlation_id, "distribution", |ledger| {
        ledger.set_distribution(request.distribution).map(|_| ())
    })
    .await
}

/// Handler for PUT /clients/:client_id/roles/:role.
async fn set_role_template(
    State(state): State<AppState>,
    path: Result<Path<(ClientId, String)>, PathRejection>,
    payload: Result<Json<BenefitAmountsRequest>, JsonRejection>,
) -> ApiResult<Json<AllocationReport>> {
    let correlation_id = Uuid::new_v4();
    let (client_id, role) = path_params(path, correlation_id)?;
    let template = BenefitBreakdown::try_from(json_body(payload, correlation_id)?)
        .map_err(|e| rejected(correlation_id, e))?;

    mutate(&state, client_id, correlation_id, "role template", |ledger| {
        ledger.set_role_template(&role, template).map(|_| ())
    })
    .await
}

/// Handler for POST /clients/:client_id/employees.
async fn add_employee(
    State(state): State<AppState>,
    path: Result<Path<ClientId>, PathRejection>,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let client_id = path_params(path, correlation_id)?;
    let request = json_body(payload, correlation_id)?;
    let manual = request
        .benefits
        .map(BenefitBreakdown::try_from)
        .transpose()
        .map_err(|e| rejected(correlation_id, e))?;

    let handle = state
        .registry()
        .ledger(client_id)
        .await
        .map_err(|e| rejected(correlation_id, e))?;
    let mut ledger = handle.lock().await;

    let employee_id = ledger
        .add_employee(&request.name, &request.role, manual)
        .map_err(|e| rejected(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        client_id = %client_id,
        employee_id = %employee_id,
        total_allocated = ledger.current_allocation().total_allocated.minor_units(),
        "Employee addition completed"
    );
    Ok((
        StatusCode::CREATED,
        Json(EmployeeAdded {
            employee_id,
            report: report(&ledger, state.config().currency()),
        }),
    ))
}

/// Handler for PUT /clients/:client_id/employees/:employee_id.
///
/// Changes the role, the manual breakdown, or both.
async fn update_employee(
    State(state): State<AppState>,
    path: Result<Path<(ClientId, EmployeeId)>, PathRejection>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> ApiResult<Json<AllocationReport>> {
    let correlation_id = Uuid::new_v4();
    let (client_id, employee_id) = path_params(path, correlation_id)?;
    let request = json_body(payload, correlation_id)?;

    if request.role.is_none() && request.benefits.is_none() {
        return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
            "request must change the role or the benefits",
        )));
    }
    let manual = request
        .benefits
        .map(|benefits| benefits.map(BenefitBreakdown::try_from).transpose())
        .transpose()
        .map_err(|e| rejected(correlation_id, e))?;

    mutate(&state, client_id, correlation_id, "employee", |ledger| {
        ledger
            .update_employee(employee_id, request.role.as_deref(), manual)
            .map(|_| ())
    })
    .await
}

/// Handler for DELETE /clients/:client_id/employees/:employee_id.
async fn remove_employee(
    State(state): State<AppState>,
    path: Result<Path<(ClientId, EmployeeId)>, PathRejection>,
) -> ApiResult<Json<AllocationReport>> {
    let correlation_id = Uuid::new_v4();
    let (client_id, employee_id) = path_params(path, correlation_id)?;

    mutate(&state, client_id, correlation_id, "employee removal", |ledger| {
        ledger.remove_employee(employee_id).map(|_| ())
    })
    .await
}

/// Handler for GET /words.
async fn words(
    State(state): State<AppState>,
    query: Result<Query<WordsQuery>, QueryRejection>,
) -> ApiResult<Json<WordsResponse>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Query rejected");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;

    let amount = Money::from_decimal(query.amount).map_err(|e| rejected(correlation_id, e))?;
    Ok(Json(WordsResponse {
        amount,
        words: describe_amount(amount, state.config().currency()),
    }))
}

/// Runs one mutation against a client's ledger and renders the new report.
async fn mutate<F>(
    state: &AppState,
    client_id: ClientId,
    correlation_id: Uuid,
    what: &str,
    operation: F,
) -> ApiResult<Json<AllocationReport>>
where
    F: FnOnce(&mut ClientLedger) -> Result<(), EngineError>,
{
    let handle = state
        .registry()
        .ledger(client_id)
        .await
        .map_err(|e| rejected(correlation_id, e))?;
    let mut ledger = handle.lock().await;

    let start_time = Instant::now();
    operation(&mut *ledger).map_err(|e| rejected(correlation_id, e))?;

    let allocation = ledger.current_allocation();
    info!(
        correlation_id = %correlation_id,
        client_id = %client_id,
        update = what,
        total_allocated = allocation.total_allocated.minor_units(),
        within_limit = allocation.within_limit,
        duration_us = start_time.elapsed().as_micros(),
        "Update completed"
    );
    Ok(Json(report(&ledger, state.config().currency())))
}

fn report(ledger: &ClientLedger, currency: &CurrencyNames) -> AllocationReport {
    AllocationReport::new(
        ledger.client(),
        ledger.employees(),
        ledger.current_allocation(),
        currency,
    )
}

/// Logs an engine error and converts it to its HTTP form.
fn rejected(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    err.into()
}

/// Unwraps a JSON body, turning rejections into API errors.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>, correlation_id: Uuid) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message is only available through the body text
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::malformed_json("Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps path parameters, turning malformed ids into API errors.
fn path_params<T>(path: Result<Path<T>, PathRejection>, correlation_id: Uuid) -> ApiResult<T> {
    path.map(|Path(params)| params).map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection, "Path rejected");
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}
