// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serializable and Diesel row representations.
//!
//! Money and volume values cross the database boundary as canonical
//! decimal strings; ISO 8601 timestamps cross as text. Conversion back
//! into domain types happens in the query modules.

use crate::diesel_schema::{
    audit_events, bill_status_history, bills, meters, tariff_groups, work_order_status_history,
    work_order_technicians, work_orders,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct TariffGroupRow {
    pub tariff_group_id: i64,
    pub name: String,
    pub rate_below_threshold: String,
    pub rate_above_threshold: String,
    pub fixed_monthly_charge: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tariff_groups)]
pub struct NewTariffGroupRow {
    pub name: String,
    pub rate_below_threshold: String,
    pub rate_above_threshold: String,
    pub fixed_monthly_charge: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct MeterRow {
    pub meter_id: i64,
    pub meter_number: String,
    pub account_number: String,
    pub tariff_group_id: i64,
    pub is_active: i32,
    pub unbilled_consumption: String,
    pub total_consumption: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meters)]
pub struct NewMeterRow {
    pub meter_number: String,
    pub account_number: String,
    pub tariff_group_id: i64,
    pub is_active: i32,
    pub unbilled_consumption: String,
    pub total_consumption: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct BillRow {
    pub bill_id: i64,
    pub meter_id: i64,
    pub period: String,
    pub consumption: String,
    pub base_charge: String,
    pub fixed_charge: String,
    pub total_charge: String,
    pub late_penalty: Option<String>,
    pub status: String,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bills)]
pub struct NewBillRow {
    pub meter_id: i64,
    pub period: String,
    pub consumption: String,
    pub base_charge: String,
    pub fixed_charge: String,
    pub total_charge: String,
    pub late_penalty: Option<String>,
    pub status: String,
    pub payment_date: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bill_status_history)]
pub struct NewBillStatusHistoryRow {
    pub bill_id: i64,
    pub audit_event_id: i64,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub transitioned_at: String,
    pub notes: Option<String>,
}

/// One bill status history entry, as read back for the API.
#[derive(Debug, Clone, Queryable)]
pub struct BillStatusHistoryRow {
    pub history_id: i64,
    pub bill_id: i64,
    pub audit_event_id: i64,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub transitioned_at: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct WorkOrderRow {
    pub work_order_id: i64,
    pub source_ref: String,
    pub status: String,
    pub held_from: Option<String>,
    pub admin_approved: Option<i32>,
    pub notes: Option<String>,
    pub cost_estimate_ref: Option<String>,
    pub completion_evidence_ref: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = work_orders)]
pub struct NewWorkOrderRow {
    pub source_ref: String,
    pub status: String,
    pub held_from: Option<String>,
    pub admin_approved: Option<i32>,
    pub notes: Option<String>,
    pub cost_estimate_ref: Option<String>,
    pub completion_evidence_ref: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = work_order_technicians)]
pub struct NewWorkOrderTechnicianRow {
    pub work_order_id: i64,
    pub technician: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = work_order_status_history)]
pub struct NewWorkOrderStatusHistoryRow {
    pub work_order_id: i64,
    pub audit_event_id: i64,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub transitioned_at: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub period: Option<String>,
    pub subject: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub period: Option<String>,
    pub subject: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}
