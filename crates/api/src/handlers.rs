// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate DTOs into domain types, run the core engine,
//! persist results, and persist exactly one audit event per successful
//! mutation. Errors are translated explicitly; domain and persistence
//! errors never leak raw.

use crate::error::{ApiError, translate_core_error, translate_domain_error,
    translate_persistence_error};
use crate::request_response::{
    AmendTechniciansRequest, ApproveWorkOrderRequest, AuditEventInfo, BillInfo,
    BillStatusHistoryInfo, CreateWorkOrderRequest, GenerateBillsRequest, GenerateBillsResponse,
    GenerationFailureInfo, MeterInfo, RecordPenaltyRequest, RegisterMeterRequest,
    TariffGroupRequest, TariffGroupInfo, TransitionWorkOrderRequest, UpdateBillStatusRequest,
    WorkOrderInfo,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tirta_billing::{
    BatchOutcome, BillCommand, BillTransition, WorkOrderCommand, WorkOrderTransition, apply_bill,
    apply_work_order,
};
use tirta_billing_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tirta_billing_domain::{
    BillRecord, BillingPeriod, Meter, PaymentStatus, TariffGroup, WorkOrder, WorkOrderStatus,
};
use tirta_billing_persistence::Persistence;
use tracing::info;

/// Returns the current UTC time as an ISO 8601 string.
fn now_iso() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("failed to format timestamp: {e}"),
        })
}

/// Parses a decimal DTO field.
fn parse_decimal_field(value: &str, field: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{value}' is not a decimal number: {e}"),
    })
}

/// Parses a `YYYY-MM` period DTO field.
fn parse_period(value: &str) -> Result<BillingPeriod, ApiError> {
    value.parse().map_err(translate_domain_error)
}

fn tariff_info(tariff: &TariffGroup, tariff_group_id: i64) -> TariffGroupInfo {
    TariffGroupInfo {
        tariff_group_id,
        name: tariff.name().to_string(),
        rate_below_threshold: tariff.rate_below_threshold.to_string(),
        rate_above_threshold: tariff.rate_above_threshold.to_string(),
        fixed_monthly_charge: tariff.fixed_monthly_charge.to_string(),
    }
}

fn meter_info(meter: &Meter, meter_id: i64) -> MeterInfo {
    MeterInfo {
        meter_id,
        meter_number: meter.meter_number().to_string(),
        account_number: meter.account_number().to_string(),
        tariff_group_id: meter.tariff_group_id,
        is_active: meter.is_active,
        unbilled_consumption: meter.unbilled_consumption.to_string(),
        total_consumption: meter.total_consumption.to_string(),
    }
}

fn bill_info(bill: &BillRecord, bill_id: i64) -> BillInfo {
    BillInfo {
        bill_id,
        meter_id: bill.meter_id,
        period: bill.period.to_string(),
        consumption: bill.consumption.to_string(),
        base_charge: bill.base_charge.to_string(),
        fixed_charge: bill.fixed_charge.to_string(),
        total_charge: bill.total_charge.to_string(),
        late_penalty: bill.late_penalty.map(|p| p.to_string()),
        status: bill.status.as_str().to_string(),
        payment_date: bill.payment_date.clone(),
        payment_method: bill.payment_method.clone(),
        notes: bill.notes.clone(),
    }
}

fn work_order_info(order: &WorkOrder, work_order_id: i64) -> WorkOrderInfo {
    WorkOrderInfo {
        work_order_id,
        source_ref: order.source_ref().to_string(),
        technicians: order.technicians.clone(),
        status: order.status.as_str().to_string(),
        held_from: order.held_from.map(|s| s.as_str().to_string()),
        admin_approved: order.admin_approved,
        notes: order.notes.clone(),
        cost_estimate_ref: order.cost_estimate_ref.clone(),
        completion_evidence_ref: order.completion_evidence_ref.clone(),
    }
}

/// Builds the domain tariff group from a request, validating fields.
fn tariff_from_request(request: &TariffGroupRequest) -> Result<TariffGroup, ApiError> {
    let tariff: TariffGroup = TariffGroup::new(
        &request.name,
        parse_decimal_field(&request.rate_below_threshold, "rate_below_threshold")?,
        parse_decimal_field(&request.rate_above_threshold, "rate_above_threshold")?,
        parse_decimal_field(&request.fixed_monthly_charge, "fixed_monthly_charge")?,
    );
    tariff.validate().map_err(translate_domain_error)?;
    Ok(tariff)
}

// ============================================================================
// Tariff Groups
// ============================================================================

/// Creates a tariff group.
///
/// # Errors
///
/// Returns an error if validation fails, the name is already taken, or
/// persistence fails.
pub fn create_tariff_group(
    persistence: &mut Persistence,
    request: &TariffGroupRequest,
    actor: Actor,
    cause: Cause,
) -> Result<TariffGroupInfo, ApiError> {
    let tariff: TariffGroup = tariff_from_request(request)?;

    let tariff_group_id: i64 = persistence
        .create_tariff_group(&tariff)
        .map_err(|e| translate_persistence_error(&e))?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("CreateTariffGroup"),
            Some(format!("Created tariff group '{}'", tariff.name())),
        ),
        StateSnapshot::new(String::from("absent")),
        StateSnapshot::new(format!(
            "name={},below={},above={},fixed={}",
            tariff.name(),
            tariff.rate_below_threshold,
            tariff.rate_above_threshold,
            tariff.fixed_monthly_charge
        )),
        None,
        format!("tariff_group/{tariff_group_id}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(tariff_info(&tariff, tariff_group_id))
}

/// Updates a tariff group.
///
/// # Errors
///
/// Returns an error if the group does not exist or validation fails.
pub fn update_tariff_group(
    persistence: &mut Persistence,
    tariff_group_id: i64,
    request: &TariffGroupRequest,
    actor: Actor,
    cause: Cause,
) -> Result<TariffGroupInfo, ApiError> {
    let tariff: TariffGroup = tariff_from_request(request)?;

    let previous: TariffGroup = persistence
        .get_tariff_group(tariff_group_id)
        .map_err(|e| translate_persistence_error(&e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Tariff group"),
            message: format!("tariff group {tariff_group_id} does not exist"),
        })?;

    persistence
        .update_tariff_group(tariff_group_id, &tariff)
        .map_err(|e| translate_persistence_error(&e))?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("UpdateTariffGroup"),
            Some(format!("Updated tariff group '{}'", tariff.name())),
        ),
        StateSnapshot::new(format!(
            "name={},below={},above={},fixed={}",
            previous.name(),
            previous.rate_below_threshold,
            previous.rate_above_threshold,
            previous.fixed_monthly_charge
        )),
        StateSnapshot::new(format!(
            "name={},below={},above={},fixed={}",
            tariff.name(),
            tariff.rate_below_threshold,
            tariff.rate_above_threshold,
            tariff.fixed_monthly_charge
        )),
        None,
        format!("tariff_group/{tariff_group_id}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(tariff_info(&tariff, tariff_group_id))
}

/// Deletes a tariff group.
///
/// Whether the group is still referenced by active meters is a caller
/// precondition; a dangling reference is rejected by the database.
///
/// # Errors
///
/// Returns an error if the group does not exist or is still referenced.
pub fn delete_tariff_group(
    persistence: &mut Persistence,
    tariff_group_id: i64,
    actor: Actor,
    cause: Cause,
) -> Result<(), ApiError> {
    persistence
        .delete_tariff_group(tariff_group_id)
        .map_err(|e| translate_persistence_error(&e))?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("DeleteTariffGroup"),
            Some(format!("Deleted tariff group {tariff_group_id}")),
        ),
        StateSnapshot::new(String::from("present")),
        StateSnapshot::new(String::from("absent")),
        None,
        format!("tariff_group/{tariff_group_id}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(())
}

/// Lists all tariff groups.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_tariff_groups(
    persistence: &mut Persistence,
) -> Result<Vec<TariffGroupInfo>, ApiError> {
    let groups: Vec<TariffGroup> = persistence
        .list_tariff_groups()
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(groups
        .iter()
        .map(|g| tariff_info(g, g.tariff_group_id().unwrap_or_default()))
        .collect())
}

// ============================================================================
// Meters
// ============================================================================

/// Registers a meter.
///
/// # Errors
///
/// Returns an error if validation fails, an identifier is already taken,
/// or persistence fails.
pub fn register_meter(
    persistence: &mut Persistence,
    request: &RegisterMeterRequest,
    actor: Actor,
    cause: Cause,
) -> Result<MeterInfo, ApiError> {
    let meter: Meter = Meter::new(
        &request.meter_number,
        &request.account_number,
        request.tariff_group_id,
    );
    meter.validate().map_err(translate_domain_error)?;

    if persistence
        .get_tariff_group(request.tariff_group_id)
        .map_err(|e| translate_persistence_error(&e))?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Tariff group"),
            message: format!("tariff group {} does not exist", request.tariff_group_id),
        });
    }

    let meter_id: i64 = persistence
        .register_meter(&meter)
        .map_err(|e| translate_persistence_error(&e))?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("RegisterMeter"),
            Some(format!("Registered meter '{}'", meter.meter_number())),
        ),
        StateSnapshot::new(String::from("absent")),
        StateSnapshot::new(format!(
            "meter_number={},account={},tariff_group={}",
            meter.meter_number(),
            meter.account_number(),
            meter.tariff_group_id
        )),
        None,
        format!("meter/{meter_id}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(meter_info(&meter, meter_id))
}

/// Lists all meters.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_meters(persistence: &mut Persistence) -> Result<Vec<MeterInfo>, ApiError> {
    let meters: Vec<Meter> = persistence
        .list_meters()
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(meters
        .iter()
        .map(|m| meter_info(m, m.meter_id().unwrap_or_default()))
        .collect())
}

/// Sets a meter's active flag.
///
/// # Errors
///
/// Returns an error if the meter does not exist.
pub fn set_meter_active(
    persistence: &mut Persistence,
    meter_id: i64,
    is_active: bool,
    actor: Actor,
    cause: Cause,
) -> Result<MeterInfo, ApiError> {
    persistence
        .set_meter_active(meter_id, is_active)
        .map_err(|e| translate_persistence_error(&e))?;

    let meter: Meter = persistence
        .get_meter(meter_id)
        .map_err(|e| translate_persistence_error(&e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Meter"),
            message: format!("meter {meter_id} does not exist"),
        })?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("SetMeterActive"),
            Some(format!("active={is_active}")),
        ),
        StateSnapshot::new(format!("active={}", !is_active)),
        StateSnapshot::new(format!("active={is_active}")),
        None,
        format!("meter/{meter_id}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(meter_info(&meter, meter_id))
}

// ============================================================================
// Bill Generation
// ============================================================================

/// Runs the monthly generation batch.
///
/// The response reports `berhasil` (bills created) and `gagal`
/// (skipped + failed combined), with per-meter failure reasons alongside.
/// Malformed periods and empty meter lists are rejected before any
/// persistence.
///
/// # Errors
///
/// Returns an error only for invalid requests; per-meter problems are
/// reported in the response.
pub fn generate_bills(
    persistence: &mut Persistence,
    request: &GenerateBillsRequest,
    actor: Actor,
    cause: Cause,
) -> Result<GenerateBillsResponse, ApiError> {
    let period: BillingPeriod = parse_period(&request.period)?;

    let outcome: BatchOutcome =
        tirta_billing::generate_bills(persistence, period, &request.meter_ids)
            .map_err(translate_core_error)?;

    let failed: usize = outcome.failures.len();
    let pesan: String = format!(
        "{} bills generated, {} skipped (already billed), {} failed",
        outcome.succeeded, outcome.skipped, failed
    );
    info!(
        period = %period,
        succeeded = outcome.succeeded,
        skipped = outcome.skipped,
        failed,
        "bill generation batch finished"
    );

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from("GenerateBills"), Some(pesan.clone())),
        StateSnapshot::new(format!("requested={}", request.meter_ids.len())),
        StateSnapshot::new(format!(
            "succeeded={},skipped={},failed={}",
            outcome.succeeded, outcome.skipped, failed
        )),
        Some(period),
        format!("period/{period}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    let failures: Vec<GenerationFailureInfo> = outcome
        .failures
        .iter()
        .map(|f| GenerationFailureInfo {
            meter_id: f.meter_id,
            reason: f.reason.to_string(),
        })
        .collect();

    let berhasil: u32 = u32::try_from(outcome.succeeded).unwrap_or(u32::MAX);
    let gagal: u32 = u32::try_from(outcome.skipped + failed).unwrap_or(u32::MAX);

    Ok(GenerateBillsResponse {
        berhasil,
        gagal,
        pesan,
        failures,
    })
}

/// Lists all bills for a period.
///
/// # Errors
///
/// Returns an error if the period is malformed or the query fails.
pub fn list_bills_for_period(
    persistence: &mut Persistence,
    period: &str,
) -> Result<Vec<BillInfo>, ApiError> {
    let period: BillingPeriod = parse_period(period)?;
    let bills: Vec<BillRecord> = persistence
        .list_bills_for_period(period)
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(bills
        .iter()
        .map(|b| bill_info(b, b.bill_id().unwrap_or_default()))
        .collect())
}

// ============================================================================
// Payment Status
// ============================================================================

/// Loads a bill or reports it missing.
fn load_bill(
    persistence: &mut Persistence,
    bill_id: i64,
) -> Result<(BillRecord, String), ApiError> {
    persistence
        .get_bill(bill_id)
        .map_err(|e| translate_persistence_error(&e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Bill"),
            message: format!("bill {bill_id} does not exist"),
        })
}

/// Applies a payment status transition to a bill.
///
/// Both payment-provider callbacks and manual administrative settlement
/// go through here; operators confirming payment out-of-band should say
/// so in `notes`.
///
/// # Errors
///
/// Returns an error if the bill does not exist, the transition is not
/// permitted, or a concurrent request modified the bill first.
pub fn update_bill_status(
    persistence: &mut Persistence,
    bill_id: i64,
    request: UpdateBillStatusRequest,
    actor: Actor,
    cause: Cause,
) -> Result<BillInfo, ApiError> {
    let new_status: PaymentStatus = request
        .status
        .parse()
        .map_err(translate_domain_error)?;

    let (bill, updated_at) = load_bill(persistence, bill_id)?;
    let previous_status: PaymentStatus = bill.status;

    let now: String = now_iso()?;
    let transition: BillTransition = apply_bill(
        &bill,
        BillCommand::ApplyPaymentStatus {
            new_status,
            payment_method: request.payment_method,
            notes: request.notes,
        },
        &now,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .update_bill_status(bill_id, &transition.new_bill, &updated_at)
        .map_err(|e| translate_persistence_error(&e))?;

    let event_id: i64 = persistence
        .persist_audit_event(&transition.audit_event)
        .map_err(|e| translate_persistence_error(&e))?;
    persistence
        .insert_bill_status_history(
            bill_id,
            event_id,
            Some(previous_status.as_str()),
            new_status.as_str(),
            transition.new_bill.notes.as_deref(),
        )
        .map_err(|e| translate_persistence_error(&e))?;

    info!(bill_id, from = %previous_status, to = %new_status, "bill status transition applied");

    Ok(bill_info(&transition.new_bill, bill_id))
}

/// Records a late penalty on a bill.
///
/// The overdue decision belongs to an external scheduler; this only
/// validates and records the amount.
///
/// # Errors
///
/// Returns an error if the bill does not exist, the amount is invalid,
/// the bill is not pending, or a concurrent request modified it first.
pub fn record_late_penalty(
    persistence: &mut Persistence,
    bill_id: i64,
    request: &RecordPenaltyRequest,
    actor: Actor,
    cause: Cause,
) -> Result<BillInfo, ApiError> {
    let amount: Decimal = parse_decimal_field(&request.amount, "amount")?;
    let (bill, updated_at) = load_bill(persistence, bill_id)?;

    let now: String = now_iso()?;
    let transition: BillTransition = apply_bill(
        &bill,
        BillCommand::RecordLatePenalty { amount },
        &now,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .record_late_penalty(bill_id, amount, &updated_at)
        .map_err(|e| translate_persistence_error(&e))?;
    persistence
        .persist_audit_event(&transition.audit_event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(bill_info(&transition.new_bill, bill_id))
}

/// Lists a bill's status history, oldest first.
///
/// # Errors
///
/// Returns an error if the bill does not exist or the query fails.
pub fn list_bill_status_history(
    persistence: &mut Persistence,
    bill_id: i64,
) -> Result<Vec<BillStatusHistoryInfo>, ApiError> {
    load_bill(persistence, bill_id)?;
    let rows = persistence
        .list_bill_status_history(bill_id)
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(rows
        .into_iter()
        .map(|row| BillStatusHistoryInfo {
            previous_status: row.previous_status,
            new_status: row.new_status,
            transitioned_at: row.transitioned_at,
            audit_event_id: row.audit_event_id,
            notes: row.notes,
        })
        .collect())
}

// ============================================================================
// Work Orders
// ============================================================================

/// Loads a work order or reports it missing.
fn load_work_order(
    persistence: &mut Persistence,
    work_order_id: i64,
) -> Result<(WorkOrder, String), ApiError> {
    persistence
        .get_work_order(work_order_id)
        .map_err(|e| translate_persistence_error(&e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Work order"),
            message: format!("work order {work_order_id} does not exist"),
        })
}

/// Creates a work order in `Ditugaskan` status.
///
/// # Errors
///
/// Returns an error if validation or persistence fails.
pub fn create_work_order(
    persistence: &mut Persistence,
    request: CreateWorkOrderRequest,
    actor: Actor,
    cause: Cause,
) -> Result<WorkOrderInfo, ApiError> {
    let mut order: WorkOrder = WorkOrder::new(&request.source_ref, request.technicians)
        .map_err(translate_domain_error)?;
    order.cost_estimate_ref = request.cost_estimate_ref;

    let work_order_id: i64 = persistence
        .create_work_order(&order)
        .map_err(|e| translate_persistence_error(&e))?;

    let event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("CreateWorkOrder"),
            Some(format!("Created work order from '{}'", order.source_ref())),
        ),
        StateSnapshot::new(String::from("absent")),
        StateSnapshot::new(format!(
            "source={},status={},technicians={}",
            order.source_ref(),
            order.status,
            order.technicians.len()
        )),
        None,
        format!("work_order/{work_order_id}"),
    );
    persistence
        .persist_audit_event(&event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(work_order_info(&order, work_order_id))
}

/// Lists all work orders, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_work_orders(persistence: &mut Persistence) -> Result<Vec<WorkOrderInfo>, ApiError> {
    let orders: Vec<WorkOrder> = persistence
        .list_work_orders()
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(orders
        .iter()
        .map(|o| work_order_info(o, o.work_order_id().unwrap_or_default()))
        .collect())
}

/// Writes a work order transition back and records history + audit.
fn persist_work_order_transition(
    persistence: &mut Persistence,
    work_order_id: i64,
    transition: &WorkOrderTransition,
    previous_status: WorkOrderStatus,
    updated_at: &str,
) -> Result<(), ApiError> {
    persistence
        .update_work_order(work_order_id, &transition.new_order, updated_at)
        .map_err(|e| translate_persistence_error(&e))?;

    let event_id: i64 = persistence
        .persist_audit_event(&transition.audit_event)
        .map_err(|e| translate_persistence_error(&e))?;

    if transition.new_order.status != previous_status {
        persistence
            .insert_work_order_status_history(
                work_order_id,
                event_id,
                Some(previous_status.as_str()),
                transition.new_order.status.as_str(),
                transition.new_order.notes.as_deref(),
            )
            .map_err(|e| translate_persistence_error(&e))?;
    }
    Ok(())
}

/// Advances a work order's lifecycle status.
///
/// # Errors
///
/// Returns an error if the order does not exist, the transition is not
/// permitted, or a concurrent request modified the order first.
pub fn transition_work_order(
    persistence: &mut Persistence,
    work_order_id: i64,
    request: TransitionWorkOrderRequest,
    actor: Actor,
    cause: Cause,
) -> Result<WorkOrderInfo, ApiError> {
    let new_status: WorkOrderStatus = request
        .status
        .parse()
        .map_err(translate_domain_error)?;

    let (order, updated_at) = load_work_order(persistence, work_order_id)?;
    let previous_status: WorkOrderStatus = order.status;

    let transition: WorkOrderTransition = apply_work_order(
        &order,
        WorkOrderCommand::TransitionStatus {
            new_status,
            notes: request.notes,
        },
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    persist_work_order_transition(
        persistence,
        work_order_id,
        &transition,
        previous_status,
        &updated_at,
    )?;

    info!(
        work_order_id,
        from = %previous_status,
        to = %new_status,
        "work order transition applied"
    );

    Ok(work_order_info(&transition.new_order, work_order_id))
}

/// Records an admin approval decision for a work order under review.
///
/// Rejection returns the order to in-progress for rework; it never
/// cancels.
///
/// # Errors
///
/// Returns an error if the order does not exist, is not awaiting review,
/// or a concurrent request modified it first.
pub fn approve_work_order(
    persistence: &mut Persistence,
    work_order_id: i64,
    request: ApproveWorkOrderRequest,
    actor: Actor,
    cause: Cause,
) -> Result<WorkOrderInfo, ApiError> {
    let (order, updated_at) = load_work_order(persistence, work_order_id)?;
    let previous_status: WorkOrderStatus = order.status;

    let transition: WorkOrderTransition = apply_work_order(
        &order,
        WorkOrderCommand::Approve {
            approved: request.approved,
            notes: request.notes,
        },
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    persist_work_order_transition(
        persistence,
        work_order_id,
        &transition,
        previous_status,
        &updated_at,
    )?;

    Ok(work_order_info(&transition.new_order, work_order_id))
}

/// Replaces a work order's technician team.
///
/// # Errors
///
/// Returns an error if the order does not exist or its status locks the
/// assignment.
pub fn amend_technicians(
    persistence: &mut Persistence,
    work_order_id: i64,
    request: AmendTechniciansRequest,
    actor: Actor,
    cause: Cause,
) -> Result<WorkOrderInfo, ApiError> {
    let (order, _updated_at) = load_work_order(persistence, work_order_id)?;

    let transition: WorkOrderTransition = apply_work_order(
        &order,
        WorkOrderCommand::AmendTechnicians {
            technicians: request.technicians,
        },
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .replace_technicians(work_order_id, &transition.new_order.technicians)
        .map_err(|e| translate_persistence_error(&e))?;
    persistence
        .persist_audit_event(&transition.audit_event)
        .map_err(|e| translate_persistence_error(&e))?;

    Ok(work_order_info(&transition.new_order, work_order_id))
}

// ============================================================================
// Audit
// ============================================================================

fn audit_event_info(event_id: i64, event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
        period: event.period.map(|p| p.to_string()),
        subject: event.subject.clone(),
    }
}

/// Retrieves an audit event by id.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn get_audit_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<AuditEventInfo, ApiError> {
    let event: AuditEvent = persistence
        .get_audit_event(event_id)
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(audit_event_info(event_id, &event))
}

/// Retrieves the ordered audit timeline.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    let timeline: Vec<(i64, AuditEvent)> = persistence
        .get_audit_timeline()
        .map_err(|e| translate_persistence_error(&e))?;
    Ok(timeline
        .iter()
        .map(|(event_id, event)| audit_event_info(*event_id, event))
        .collect())
}
