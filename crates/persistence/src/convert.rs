// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversions between database rows and domain types.
//!
//! Decimal values and billing periods are stored as canonical strings; a
//! row that fails to parse back indicates data corruption and surfaces as
//! a `SerializationError` rather than panicking.

use crate::data_models::{BillRow, MeterRow, TariffGroupRow, WorkOrderRow};
use crate::error::PersistenceError;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tirta_billing_domain::{
    BillRecord, BillingPeriod, Meter, PaymentStatus, TariffGroup, WorkOrder, WorkOrderStatus,
};

/// Returns the current UTC time as an ISO 8601 string.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn now_iso() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored decimal string.
///
/// # Errors
///
/// Returns an error naming the column if the value does not parse.
pub fn parse_decimal(value: &str, column: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::SerializationError(format!("column '{column}' held '{value}': {e}"))
    })
}

/// Parses an optional stored decimal string.
///
/// # Errors
///
/// Returns an error naming the column if a present value does not parse.
pub fn parse_opt_decimal(
    value: Option<&str>,
    column: &str,
) -> Result<Option<Decimal>, PersistenceError> {
    value.map(|v| parse_decimal(v, column)).transpose()
}

/// Parses a stored `YYYY-MM` period string.
///
/// # Errors
///
/// Returns an error if the value does not parse.
pub fn parse_period(value: &str) -> Result<BillingPeriod, PersistenceError> {
    value
        .parse()
        .map_err(|e| PersistenceError::SerializationError(format!("stored period: {e}")))
}

/// Parses a stored payment status string.
///
/// # Errors
///
/// Returns an error if the value does not parse.
pub fn parse_payment_status(value: &str) -> Result<PaymentStatus, PersistenceError> {
    value
        .parse()
        .map_err(|e| PersistenceError::SerializationError(format!("stored payment status: {e}")))
}

/// Parses a stored work order status string.
///
/// # Errors
///
/// Returns an error if the value does not parse.
pub fn parse_work_order_status(value: &str) -> Result<WorkOrderStatus, PersistenceError> {
    value.parse().map_err(|e| {
        PersistenceError::SerializationError(format!("stored work order status: {e}"))
    })
}

/// Converts a tariff group row into the domain type.
///
/// # Errors
///
/// Returns an error if a stored decimal does not parse.
pub fn tariff_group_from_row(row: &TariffGroupRow) -> Result<TariffGroup, PersistenceError> {
    Ok(TariffGroup::with_id(
        row.tariff_group_id,
        &row.name,
        parse_decimal(&row.rate_below_threshold, "rate_below_threshold")?,
        parse_decimal(&row.rate_above_threshold, "rate_above_threshold")?,
        parse_decimal(&row.fixed_monthly_charge, "fixed_monthly_charge")?,
    ))
}

/// Converts a meter row into the domain type.
///
/// # Errors
///
/// Returns an error if a stored decimal does not parse.
pub fn meter_from_row(row: &MeterRow) -> Result<Meter, PersistenceError> {
    Ok(Meter::with_id(
        row.meter_id,
        &row.meter_number,
        &row.account_number,
        row.tariff_group_id,
        row.is_active != 0,
        parse_decimal(&row.unbilled_consumption, "unbilled_consumption")?,
        parse_decimal(&row.total_consumption, "total_consumption")?,
    ))
}

/// Converts a bill row into the domain type.
///
/// # Errors
///
/// Returns an error if a stored decimal, period, or status does not parse.
pub fn bill_from_row(row: &BillRow) -> Result<BillRecord, PersistenceError> {
    Ok(BillRecord::with_id(
        row.bill_id,
        row.meter_id,
        parse_period(&row.period)?,
        parse_decimal(&row.consumption, "consumption")?,
        parse_decimal(&row.base_charge, "base_charge")?,
        parse_decimal(&row.fixed_charge, "fixed_charge")?,
        parse_decimal(&row.total_charge, "total_charge")?,
        parse_opt_decimal(row.late_penalty.as_deref(), "late_penalty")?,
        parse_payment_status(&row.status)?,
        row.payment_date.clone(),
        row.payment_method.clone(),
        row.notes.clone(),
    ))
}

/// Converts a work order row plus its technician list into the domain type.
///
/// # Errors
///
/// Returns an error if a stored status does not parse.
pub fn work_order_from_row(
    row: &WorkOrderRow,
    technicians: Vec<String>,
) -> Result<WorkOrder, PersistenceError> {
    let held_from: Option<WorkOrderStatus> = row
        .held_from
        .as_deref()
        .map(parse_work_order_status)
        .transpose()?;

    Ok(WorkOrder::with_id(
        row.work_order_id,
        &row.source_ref,
        technicians,
        parse_work_order_status(&row.status)?,
        held_from,
        row.admin_approved.map(|v| v != 0),
        row.notes.clone(),
        row.cost_estimate_ref.clone(),
        row.completion_evidence_ref.clone(),
    ))
}
