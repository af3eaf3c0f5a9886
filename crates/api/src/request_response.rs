// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Money and volume values cross the API boundary as decimal strings so
//! no precision is lost in JSON number representations.

/// API request to create or update a tariff group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffGroupRequest {
    /// The group name (unique, non-empty).
    pub name: String,
    /// Rate per m³ at or below the threshold, as a decimal string.
    pub rate_below_threshold: String,
    /// Rate per m³ above the threshold, as a decimal string.
    pub rate_above_threshold: String,
    /// Fixed monthly charge, as a decimal string.
    pub fixed_monthly_charge: String,
}

/// Tariff group information for listings and write responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TariffGroupInfo {
    /// The canonical numeric identifier.
    pub tariff_group_id: i64,
    /// The group name.
    pub name: String,
    /// Rate per m³ at or below the threshold, as a decimal string.
    pub rate_below_threshold: String,
    /// Rate per m³ above the threshold, as a decimal string.
    pub rate_above_threshold: String,
    /// Fixed monthly charge, as a decimal string.
    pub fixed_monthly_charge: String,
}

/// API request to register a meter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMeterRequest {
    /// The physical meter number (unique).
    pub meter_number: String,
    /// The customer account number (unique).
    pub account_number: String,
    /// The tariff group the meter is billed under.
    pub tariff_group_id: i64,
}

/// Meter information for listings and write responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MeterInfo {
    /// The canonical numeric identifier.
    pub meter_id: i64,
    /// The physical meter number.
    pub meter_number: String,
    /// The customer account number.
    pub account_number: String,
    /// The tariff group the meter is billed under.
    pub tariff_group_id: i64,
    /// Whether the meter participates in billing.
    pub is_active: bool,
    /// Unbilled consumption in m³, as a decimal string.
    pub unbilled_consumption: String,
    /// Lifetime consumption in m³, as a decimal string.
    pub total_consumption: String,
}

/// API request to generate bills for a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateBillsRequest {
    /// The billing period, in `YYYY-MM` form.
    pub period: String,
    /// The meters to bill.
    pub meter_ids: Vec<i64>,
}

/// One per-meter failure in the operator-facing batch result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerationFailureInfo {
    /// The meter id that failed.
    pub meter_id: i64,
    /// A human-readable reason.
    pub reason: String,
}

/// The operator-facing batch result.
///
/// `gagal` combines skips and failures, matching the console's contract;
/// the failure list carries the per-meter reasons.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateBillsResponse {
    /// Bills created by this run.
    pub berhasil: u32,
    /// Meters not billed by this run (already billed + failed).
    pub gagal: u32,
    /// A human-readable summary.
    pub pesan: String,
    /// Per-meter failures.
    pub failures: Vec<GenerationFailureInfo>,
}

/// Bill information for listings and write responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BillInfo {
    /// The canonical numeric identifier.
    pub bill_id: i64,
    /// The meter this bill belongs to.
    pub meter_id: i64,
    /// The billing period, in `YYYY-MM` form.
    pub period: String,
    /// Consumption volume billed, as a decimal string.
    pub consumption: String,
    /// Tiered consumption charge, as a decimal string.
    pub base_charge: String,
    /// Fixed monthly charge, as a decimal string.
    pub fixed_charge: String,
    /// Total charge, as a decimal string.
    pub total_charge: String,
    /// Late penalty, as a decimal string, if recorded.
    pub late_penalty: Option<String>,
    /// Current payment status.
    pub status: String,
    /// Payment timestamp, if settled.
    pub payment_date: Option<String>,
    /// Payment method, if recorded.
    pub payment_method: Option<String>,
    /// Operator notes.
    pub notes: Option<String>,
}

/// API request to apply a payment status transition to a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBillStatusRequest {
    /// The requested status.
    pub status: String,
    /// Payment method, recorded on settlement if provided.
    pub payment_method: Option<String>,
    /// Free-form note appended to the bill.
    pub notes: Option<String>,
}

/// API request to record a late penalty on a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPenaltyRequest {
    /// The penalty amount, as a decimal string.
    pub amount: String,
}

/// One bill status history entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BillStatusHistoryInfo {
    /// The status before the transition, if any.
    pub previous_status: Option<String>,
    /// The status after the transition.
    pub new_status: String,
    /// When the transition was recorded.
    pub transitioned_at: String,
    /// The audit event recording the transition.
    pub audit_event_id: i64,
    /// Operator notes.
    pub notes: Option<String>,
}

/// API request to create a work order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWorkOrderRequest {
    /// Reference to the customer report or survey this order is for.
    pub source_ref: String,
    /// Assigned technician team (zero or more).
    pub technicians: Vec<String>,
    /// Linked cost estimate reference, if any.
    pub cost_estimate_ref: Option<String>,
}

/// Work order information for listings and write responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkOrderInfo {
    /// The canonical numeric identifier.
    pub work_order_id: i64,
    /// The source reference.
    pub source_ref: String,
    /// Assigned technician team.
    pub technicians: Vec<String>,
    /// Current lifecycle status.
    pub status: String,
    /// The status a held order resumes to, if held.
    pub held_from: Option<String>,
    /// Admin approval flag (unset until review).
    pub admin_approved: Option<bool>,
    /// Operator notes.
    pub notes: Option<String>,
    /// Linked cost estimate reference.
    pub cost_estimate_ref: Option<String>,
    /// Linked completion evidence reference.
    pub completion_evidence_ref: Option<String>,
}

/// API request to advance a work order's lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionWorkOrderRequest {
    /// The requested status.
    pub status: String,
    /// Free-form note appended to the order.
    pub notes: Option<String>,
}

/// API request to record an admin approval decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveWorkOrderRequest {
    /// The decision.
    pub approved: bool,
    /// Free-form note appended to the order.
    pub notes: Option<String>,
}

/// API request to replace a work order's technician team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendTechniciansRequest {
    /// The new technician list.
    pub technicians: Vec<String>,
}

/// Audit event information for timeline listings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event id.
    pub event_id: i64,
    /// The actor id.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause id.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Optional action details.
    pub details: Option<String>,
    /// The state before the transition.
    pub before: String,
    /// The state after the transition.
    pub after: String,
    /// The billing period in scope, if any.
    pub period: Option<String>,
    /// The subject entity.
    pub subject: String,
}
