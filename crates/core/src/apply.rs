// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command application for bills and work orders.
//!
//! Transitions are atomic: they either succeed completely, producing the
//! new entity plus exactly one audit event, or fail without side effects.
//! The caller supplies the current wall-clock time so the functions stay
//! pure and testable.

use crate::command::{BillCommand, WorkOrderCommand};
use crate::error::CoreError;
use tirta_billing_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tirta_billing_domain::{BillRecord, PaymentStatus, WorkOrder, WorkOrderStatus};

/// The result of a successful bill transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillTransition {
    /// The bill after the transition.
    pub new_bill: BillRecord,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful work order transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkOrderTransition {
    /// The work order after the transition.
    pub new_order: WorkOrder,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

fn bill_snapshot(bill: &BillRecord) -> StateSnapshot {
    StateSnapshot::new(format!(
        "meter={},period={},status={},total={},penalty={}",
        bill.meter_id,
        bill.period,
        bill.status,
        bill.total_charge,
        bill.late_penalty
            .map_or_else(|| String::from("none"), |p| p.to_string()),
    ))
}

fn bill_subject(bill: &BillRecord) -> String {
    bill.bill_id()
        .map_or_else(|| String::from("bill/new"), |id| format!("bill/{id}"))
}

fn order_snapshot(order: &WorkOrder) -> StateSnapshot {
    StateSnapshot::new(format!(
        "source={},status={},approved={},technicians={}",
        order.source_ref(),
        order.status,
        order
            .admin_approved
            .map_or_else(|| String::from("unset"), |a| a.to_string()),
        order.technicians.len(),
    ))
}

fn order_subject(order: &WorkOrder) -> String {
    order.work_order_id().map_or_else(
        || String::from("work_order/new"),
        |id| format!("work_order/{id}"),
    )
}

/// Applies a command to a bill, producing the new bill and audit event.
///
/// Only the transition to `Settlement` stamps the payment date (and the
/// payment method, if one was provided).
///
/// # Arguments
///
/// * `bill` - The current bill (immutable)
/// * `command` - The command to apply
/// * `now` - The current time as an ISO 8601 string
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the command violates the payment lifecycle rules.
pub fn apply_bill(
    bill: &BillRecord,
    command: BillCommand,
    now: &str,
    actor: Actor,
    cause: Cause,
) -> Result<BillTransition, CoreError> {
    match command {
        BillCommand::ApplyPaymentStatus {
            new_status,
            payment_method,
            notes,
        } => {
            bill.status.validate_transition(new_status)?;

            let before: StateSnapshot = bill_snapshot(bill);

            let mut new_bill: BillRecord = bill.clone();
            let previous_status: PaymentStatus = new_bill.status;
            new_bill.status = new_status;
            if new_status == PaymentStatus::Settlement {
                new_bill.payment_date = Some(now.to_string());
                if payment_method.is_some() {
                    new_bill.payment_method = payment_method;
                }
            }
            if notes.is_some() {
                new_bill.notes = notes;
            }

            let after: StateSnapshot = bill_snapshot(&new_bill);
            let action: Action = Action::new(
                String::from("ApplyPaymentStatus"),
                Some(format!("{previous_status} -> {new_status}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                Some(bill.period),
                bill_subject(bill),
            );

            Ok(BillTransition {
                new_bill,
                audit_event,
            })
        }
        BillCommand::RecordLatePenalty { amount } => {
            bill.validate_late_penalty(amount)?;

            let before: StateSnapshot = bill_snapshot(bill);

            let mut new_bill: BillRecord = bill.clone();
            new_bill.late_penalty = Some(amount);

            let after: StateSnapshot = bill_snapshot(&new_bill);
            let action: Action = Action::new(
                String::from("RecordLatePenalty"),
                Some(format!("penalty={amount}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                Some(bill.period),
                bill_subject(bill),
            );

            Ok(BillTransition {
                new_bill,
                audit_event,
            })
        }
    }
}

/// Applies a command to a work order, producing the new order and audit
/// event.
///
/// Holding an order records the status it was held from; resuming clears
/// it. Entering admin review resets the approval flag so every review
/// starts unset.
///
/// # Arguments
///
/// * `order` - The current work order (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the command violates the work order lifecycle
/// rules.
pub fn apply_work_order(
    order: &WorkOrder,
    command: WorkOrderCommand,
    actor: Actor,
    cause: Cause,
) -> Result<WorkOrderTransition, CoreError> {
    match command {
        WorkOrderCommand::TransitionStatus { new_status, notes } => {
            order.validate_transition(new_status)?;

            let before: StateSnapshot = order_snapshot(order);

            let mut new_order: WorkOrder = order.clone();
            let previous_status: WorkOrderStatus = new_order.status;
            if new_status == WorkOrderStatus::Ditunda {
                new_order.held_from = Some(previous_status);
            } else if previous_status == WorkOrderStatus::Ditunda {
                new_order.held_from = None;
            }
            if new_status == WorkOrderStatus::DitinjauAdmin {
                new_order.admin_approved = None;
            }
            new_order.status = new_status;
            if notes.is_some() {
                new_order.notes = notes;
            }

            let after: StateSnapshot = order_snapshot(&new_order);
            let action: Action = Action::new(
                String::from("TransitionWorkOrder"),
                Some(format!("{previous_status} -> {new_status}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                None,
                order_subject(order),
            );

            Ok(WorkOrderTransition {
                new_order,
                audit_event,
            })
        }
        WorkOrderCommand::Approve { approved, notes } => {
            order.validate_approval()?;

            let before: StateSnapshot = order_snapshot(order);

            let mut new_order: WorkOrder = order.clone();
            new_order.admin_approved = Some(approved);
            if !approved {
                // Rejection sends the order back for rework, not to
                // cancellation.
                new_order.status = WorkOrderStatus::SedangDikerjakan;
            }
            if notes.is_some() {
                new_order.notes = notes;
            }

            let after: StateSnapshot = order_snapshot(&new_order);
            let action: Action = Action::new(
                String::from("ApproveWorkOrder"),
                Some(format!("approved={approved}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                None,
                order_subject(order),
            );

            Ok(WorkOrderTransition {
                new_order,
                audit_event,
            })
        }
        WorkOrderCommand::AmendTechnicians { technicians } => {
            order.validate_technician_amendment()?;

            let before: StateSnapshot = order_snapshot(order);

            let mut new_order: WorkOrder = order.clone();
            new_order.technicians = technicians;

            let after: StateSnapshot = order_snapshot(&new_order);
            let action: Action = Action::new(
                String::from("AmendTechnicians"),
                Some(format!("technicians={}", new_order.technicians.len())),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                None,
                order_subject(order),
            );

            Ok(WorkOrderTransition {
                new_order,
                audit_event,
            })
        }
    }
}
