// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use tirta_billing_api::{
    AmendTechniciansRequest, ApiError, ApproveWorkOrderRequest, AuditEventInfo, BillInfo,
    BillStatusHistoryInfo, CreateWorkOrderRequest, CsvPreviewResult, GenerateBillsRequest,
    GenerateBillsResponse, MeterInfo, RecordPenaltyRequest, RegisterMeterRequest,
    TariffGroupInfo, TariffGroupRequest, TransitionWorkOrderRequest, UpdateBillStatusRequest,
    WorkOrderInfo,
};
use tirta_billing_audit::{Actor, Cause};
use tirta_billing_persistence::Persistence;

/// Tirta Billing Server - HTTP server for the PDAM billing engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for billing state and audit events.
    persistence: Arc<Mutex<Persistence>>,
}

/// Actor and cause fields shared by every mutating request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorContext {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "operator", "gateway", "scheduler").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorContext {
    fn actor(&self) -> Actor {
        Actor::new(self.actor_id.clone(), self.actor_type.clone())
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// API request for creating or updating a tariff group.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TariffGroupApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The group name (unique, non-empty).
    name: String,
    /// Rate per m³ at or below the threshold, as a decimal string.
    rate_below_threshold: String,
    /// Rate per m³ above the threshold, as a decimal string.
    rate_above_threshold: String,
    /// Fixed monthly charge, as a decimal string.
    fixed_monthly_charge: String,
}

impl TariffGroupApiRequest {
    fn to_request(&self) -> TariffGroupRequest {
        TariffGroupRequest {
            name: self.name.clone(),
            rate_below_threshold: self.rate_below_threshold.clone(),
            rate_above_threshold: self.rate_above_threshold.clone(),
            fixed_monthly_charge: self.fixed_monthly_charge.clone(),
        }
    }
}

/// API request for deleting a tariff group.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DeleteTariffGroupApiRequest {
    #[serde(flatten)]
    context: ActorContext,
}

/// API request for registering a meter.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterMeterApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The physical meter number (unique).
    meter_number: String,
    /// The customer account number (unique).
    account_number: String,
    /// The tariff group the meter is billed under.
    tariff_group_id: i64,
}

/// API request for setting a meter's active flag.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetMeterActiveApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// Whether the meter participates in billing.
    is_active: bool,
}

/// API request for previewing a meter CSV upload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PreviewMeterCsvApiRequest {
    /// The raw CSV content.
    csv_content: String,
}

/// API request for running the generation batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct GenerateBillsApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The billing period, in `YYYY-MM` form.
    period: String,
    /// The meters to bill.
    meter_ids: Vec<i64>,
}

/// Query parameters for listing bills.
#[derive(Debug, Deserialize)]
struct ListBillsQuery {
    /// The billing period, in `YYYY-MM` form.
    period: String,
}

/// API request for applying a payment status transition.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateBillStatusApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The requested status.
    status: String,
    /// Payment method, recorded on settlement if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<String>,
    /// Free-form note appended to the bill.
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

/// API request for recording a late penalty.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RecordPenaltyApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The penalty amount, as a decimal string.
    amount: String,
}

/// API request for creating a work order.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateWorkOrderApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// Reference to the customer report or survey this order is for.
    source_ref: String,
    /// Assigned technician team (zero or more).
    technicians: Vec<String>,
    /// Linked cost estimate reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_estimate_ref: Option<String>,
}

/// API request for advancing a work order's status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TransitionWorkOrderApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The requested status.
    status: String,
    /// Free-form note appended to the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

/// API request for an admin approval decision.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ApproveWorkOrderApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The decision.
    approved: bool,
    /// Free-form note appended to the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

/// API request for replacing a work order's technician team.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AmendTechniciansApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    /// The new technician list.
    technicians: Vec<String>,
}

/// API response for delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeleteResponse {
    /// Success indicator.
    success: bool,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } | ApiError::InvalidCsvFormat { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tariff group handlers
// ============================================================================

/// Handler for POST `/tariff_groups`.
async fn handle_create_tariff_group(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TariffGroupApiRequest>,
) -> Result<Json<TariffGroupInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, name = %req.name, "Handling create_tariff_group request");

    let mut persistence = app_state.persistence.lock().await;
    let info: TariffGroupInfo = tirta_billing_api::create_tariff_group(
        &mut persistence,
        &req.to_request(),
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for GET `/tariff_groups`.
async fn handle_list_tariff_groups(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<TariffGroupInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let groups: Vec<TariffGroupInfo> = tirta_billing_api::list_tariff_groups(&mut persistence)?;
    drop(persistence);

    Ok(Json(groups))
}

/// Handler for PUT `/tariff_groups/{id}`.
async fn handle_update_tariff_group(
    AxumState(app_state): AxumState<AppState>,
    Path(tariff_group_id): Path<i64>,
    Json(req): Json<TariffGroupApiRequest>,
) -> Result<Json<TariffGroupInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, tariff_group_id, "Handling update_tariff_group request");

    let mut persistence = app_state.persistence.lock().await;
    let info: TariffGroupInfo = tirta_billing_api::update_tariff_group(
        &mut persistence,
        tariff_group_id,
        &req.to_request(),
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for DELETE `/tariff_groups/{id}`.
async fn handle_delete_tariff_group(
    AxumState(app_state): AxumState<AppState>,
    Path(tariff_group_id): Path<i64>,
    Json(req): Json<DeleteTariffGroupApiRequest>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %req.context.actor_id, tariff_group_id, "Handling delete_tariff_group request");

    let mut persistence = app_state.persistence.lock().await;
    tirta_billing_api::delete_tariff_group(
        &mut persistence,
        tariff_group_id,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(DeleteResponse { success: true }))
}

// ============================================================================
// Meter handlers
// ============================================================================

/// Handler for POST `/meters`.
async fn handle_register_meter(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterMeterApiRequest>,
) -> Result<Json<MeterInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, meter_number = %req.meter_number, "Handling register_meter request");

    let request: RegisterMeterRequest = RegisterMeterRequest {
        meter_number: req.meter_number.clone(),
        account_number: req.account_number.clone(),
        tariff_group_id: req.tariff_group_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let info: MeterInfo = tirta_billing_api::register_meter(
        &mut persistence,
        &request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for GET `/meters`.
async fn handle_list_meters(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<MeterInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let meters: Vec<MeterInfo> = tirta_billing_api::list_meters(&mut persistence)?;
    drop(persistence);

    Ok(Json(meters))
}

/// Handler for POST `/meters/{id}/active`.
async fn handle_set_meter_active(
    AxumState(app_state): AxumState<AppState>,
    Path(meter_id): Path<i64>,
    Json(req): Json<SetMeterActiveApiRequest>,
) -> Result<Json<MeterInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, meter_id, is_active = req.is_active, "Handling set_meter_active request");

    let mut persistence = app_state.persistence.lock().await;
    let info: MeterInfo = tirta_billing_api::set_meter_active(
        &mut persistence,
        meter_id,
        req.is_active,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(info))
}

/// Handler for POST `/meters/preview_csv`.
async fn handle_preview_meter_csv(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PreviewMeterCsvApiRequest>,
) -> Result<Json<CsvPreviewResult>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: CsvPreviewResult =
        tirta_billing_api::preview_meter_csv(&req.csv_content, &mut persistence)
            .map_err(ApiError::from)?;
    drop(persistence);

    Ok(Json(result))
}

// ============================================================================
// Billing handlers
// ============================================================================

/// Handler for POST `/bills/generate`.
///
/// The operator-triggered monthly generation batch.
async fn handle_generate_bills(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GenerateBillsApiRequest>,
) -> Result<Json<GenerateBillsResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        period = %req.period,
        meters = req.meter_ids.len(),
        "Handling generate_bills request"
    );

    let request: GenerateBillsRequest = GenerateBillsRequest {
        period: req.period.clone(),
        meter_ids: req.meter_ids.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GenerateBillsResponse = tirta_billing_api::generate_bills(
        &mut persistence,
        &request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/bills?period=YYYY-MM`.
async fn handle_list_bills(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListBillsQuery>,
) -> Result<Json<Vec<BillInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let bills: Vec<BillInfo> =
        tirta_billing_api::list_bills_for_period(&mut persistence, &query.period)?;
    drop(persistence);

    Ok(Json(bills))
}

/// Handler for POST `/bills/{id}/status`.
///
/// The manual payment confirmation surface; payment-provider callbacks
/// use the same endpoint.
async fn handle_update_bill_status(
    AxumState(app_state): AxumState<AppState>,
    Path(bill_id): Path<i64>,
    Json(req): Json<UpdateBillStatusApiRequest>,
) -> Result<Json<BillInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, bill_id, status = %req.status, "Handling update_bill_status request");

    let request: UpdateBillStatusRequest = UpdateBillStatusRequest {
        status: req.status.clone(),
        payment_method: req.payment_method.clone(),
        notes: req.notes.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let bill: BillInfo = tirta_billing_api::update_bill_status(
        &mut persistence,
        bill_id,
        request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(bill))
}

/// Handler for POST `/bills/{id}/penalty`.
async fn handle_record_penalty(
    AxumState(app_state): AxumState<AppState>,
    Path(bill_id): Path<i64>,
    Json(req): Json<RecordPenaltyApiRequest>,
) -> Result<Json<BillInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, bill_id, "Handling record_penalty request");

    let request: RecordPenaltyRequest = RecordPenaltyRequest {
        amount: req.amount.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let bill: BillInfo = tirta_billing_api::record_late_penalty(
        &mut persistence,
        bill_id,
        &request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(bill))
}

/// Handler for GET `/bills/{id}/history`.
async fn handle_bill_status_history(
    AxumState(app_state): AxumState<AppState>,
    Path(bill_id): Path<i64>,
) -> Result<Json<Vec<BillStatusHistoryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let history: Vec<BillStatusHistoryInfo> =
        tirta_billing_api::list_bill_status_history(&mut persistence, bill_id)?;
    drop(persistence);

    Ok(Json(history))
}

// ============================================================================
// Work order handlers
// ============================================================================

/// Handler for POST `/work_orders`.
async fn handle_create_work_order(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateWorkOrderApiRequest>,
) -> Result<Json<WorkOrderInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, source_ref = %req.source_ref, "Handling create_work_order request");

    let request: CreateWorkOrderRequest = CreateWorkOrderRequest {
        source_ref: req.source_ref.clone(),
        technicians: req.technicians.clone(),
        cost_estimate_ref: req.cost_estimate_ref.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let order: WorkOrderInfo = tirta_billing_api::create_work_order(
        &mut persistence,
        request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(order))
}

/// Handler for GET `/work_orders`.
async fn handle_list_work_orders(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<WorkOrderInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let orders: Vec<WorkOrderInfo> = tirta_billing_api::list_work_orders(&mut persistence)?;
    drop(persistence);

    Ok(Json(orders))
}

/// Handler for POST `/work_orders/{id}/status`.
async fn handle_transition_work_order(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order_id): Path<i64>,
    Json(req): Json<TransitionWorkOrderApiRequest>,
) -> Result<Json<WorkOrderInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, work_order_id, status = %req.status, "Handling transition_work_order request");

    let request: TransitionWorkOrderRequest = TransitionWorkOrderRequest {
        status: req.status.clone(),
        notes: req.notes.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let order: WorkOrderInfo = tirta_billing_api::transition_work_order(
        &mut persistence,
        work_order_id,
        request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(order))
}

/// Handler for POST `/work_orders/{id}/approval`.
async fn handle_approve_work_order(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order_id): Path<i64>,
    Json(req): Json<ApproveWorkOrderApiRequest>,
) -> Result<Json<WorkOrderInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, work_order_id, approved = req.approved, "Handling approve_work_order request");

    let request: ApproveWorkOrderRequest = ApproveWorkOrderRequest {
        approved: req.approved,
        notes: req.notes.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let order: WorkOrderInfo = tirta_billing_api::approve_work_order(
        &mut persistence,
        work_order_id,
        request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(order))
}

/// Handler for POST `/work_orders/{id}/technicians`.
async fn handle_amend_technicians(
    AxumState(app_state): AxumState<AppState>,
    Path(work_order_id): Path<i64>,
    Json(req): Json<AmendTechniciansApiRequest>,
) -> Result<Json<WorkOrderInfo>, HttpError> {
    info!(actor_id = %req.context.actor_id, work_order_id, "Handling amend_technicians request");

    let request: AmendTechniciansRequest = AmendTechniciansRequest {
        technicians: req.technicians.clone(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let order: WorkOrderInfo = tirta_billing_api::amend_technicians(
        &mut persistence,
        work_order_id,
        request,
        req.context.actor(),
        req.context.cause(),
    )?;
    drop(persistence);

    Ok(Json(order))
}

// ============================================================================
// Audit handlers
// ============================================================================

/// Handler for GET `/audit/timeline`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let timeline: Vec<AuditEventInfo> = tirta_billing_api::get_audit_timeline(&mut persistence)?;
    drop(persistence);

    Ok(Json(timeline))
}

/// Handler for GET `/audit/event/{event_id}`.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let event: AuditEventInfo = tirta_billing_api::get_audit_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(event))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tariff_groups", post(handle_create_tariff_group))
        .route("/tariff_groups", get(handle_list_tariff_groups))
        .route("/tariff_groups/{id}", put(handle_update_tariff_group))
        .route("/tariff_groups/{id}", delete(handle_delete_tariff_group))
        .route("/meters", post(handle_register_meter))
        .route("/meters", get(handle_list_meters))
        .route("/meters/preview_csv", post(handle_preview_meter_csv))
        .route("/meters/{id}/active", post(handle_set_meter_active))
        .route("/bills/generate", post(handle_generate_bills))
        .route("/bills", get(handle_list_bills))
        .route("/bills/{id}/status", post(handle_update_bill_status))
        .route("/bills/{id}/penalty", post(handle_record_penalty))
        .route("/bills/{id}/history", get(handle_bill_status_history))
        .route("/work_orders", post(handle_create_work_order))
        .route("/work_orders", get(handle_list_work_orders))
        .route("/work_orders/{id}/status", post(handle_transition_work_order))
        .route("/work_orders/{id}/approval", post(handle_approve_work_order))
        .route(
            "/work_orders/{id}/technicians",
            post(handle_amend_technicians),
        )
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tirta Billing Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
