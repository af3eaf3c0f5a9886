// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{march_2025, test_actor, test_cause};
use crate::apply::{BillTransition, WorkOrderTransition, apply_bill, apply_work_order};
use crate::command::{BillCommand, WorkOrderCommand};
use crate::error::CoreError;
use rust_decimal_macros::dec;
use tirta_billing_domain::{
    BillRecord, DomainError, PaymentStatus, WorkOrder, WorkOrderStatus,
};

const NOW: &str = "2025-04-02T09:30:00Z";

fn pending_bill() -> BillRecord {
    BillRecord::with_id(
        42,
        1,
        march_2025(),
        dec!(15),
        dec!(55000),
        dec!(10000),
        dec!(65000),
        None,
        PaymentStatus::Pending,
        None,
        None,
        None,
    )
}

fn status_command(new_status: PaymentStatus) -> BillCommand {
    BillCommand::ApplyPaymentStatus {
        new_status,
        payment_method: None,
        notes: None,
    }
}

fn transition(bill: &BillRecord, command: BillCommand) -> Result<BillTransition, CoreError> {
    apply_bill(bill, command, NOW, test_actor(), test_cause())
}

#[test]
fn test_settlement_stamps_payment_date_and_method() {
    let bill: BillRecord = pending_bill();
    let command: BillCommand = BillCommand::ApplyPaymentStatus {
        new_status: PaymentStatus::Settlement,
        payment_method: Some(String::from("bank_transfer")),
        notes: None,
    };

    let result: BillTransition = transition(&bill, command).unwrap();

    assert_eq!(result.new_bill.status, PaymentStatus::Settlement);
    assert_eq!(result.new_bill.payment_date.as_deref(), Some(NOW));
    assert_eq!(
        result.new_bill.payment_method.as_deref(),
        Some("bank_transfer")
    );
}

#[test]
fn test_manual_settlement_records_out_of_band_note() {
    let bill: BillRecord = pending_bill();
    let command: BillCommand = BillCommand::ApplyPaymentStatus {
        new_status: PaymentStatus::Settlement,
        payment_method: Some(String::from("cash")),
        notes: Some(String::from("confirmed out-of-band at the front desk")),
    };

    let result: BillTransition = transition(&bill, command).unwrap();

    assert_eq!(result.new_bill.status, PaymentStatus::Settlement);
    assert_eq!(
        result.new_bill.notes.as_deref(),
        Some("confirmed out-of-band at the front desk")
    );
}

#[test]
fn test_non_settlement_transitions_do_not_stamp_payment_date() {
    for target in [
        PaymentStatus::Cancel,
        PaymentStatus::Expire,
        PaymentStatus::Fraud,
    ] {
        let bill: BillRecord = pending_bill();
        let result: BillTransition = transition(&bill, status_command(target)).unwrap();
        assert_eq!(result.new_bill.status, target);
        assert_eq!(result.new_bill.payment_date, None);
    }
}

#[test]
fn test_illegal_transition_is_rejected_and_input_is_untouched() {
    let bill: BillRecord = pending_bill();
    let result: Result<BillTransition, CoreError> =
        transition(&bill, status_command(PaymentStatus::Refund));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
    // apply_bill takes the bill by reference; the caller's copy is as read.
    assert_eq!(bill.status, PaymentStatus::Pending);
}

#[test]
fn test_refund_after_settlement_is_terminal() {
    let bill: BillRecord = pending_bill();
    let settled: BillRecord = transition(&bill, status_command(PaymentStatus::Settlement))
        .unwrap()
        .new_bill;
    let refunded: BillRecord = transition(&settled, status_command(PaymentStatus::Refund))
        .unwrap()
        .new_bill;

    for target in [
        PaymentStatus::Pending,
        PaymentStatus::Settlement,
        PaymentStatus::Cancel,
        PaymentStatus::Expire,
        PaymentStatus::Refund,
        PaymentStatus::Chargeback,
        PaymentStatus::Fraud,
    ] {
        assert!(
            transition(&refunded, status_command(target)).is_err(),
            "refund -> {target} was accepted"
        );
    }
}

#[test]
fn test_bill_transition_emits_audit_event() {
    let bill: BillRecord = pending_bill();
    let result: BillTransition =
        transition(&bill, status_command(PaymentStatus::Settlement)).unwrap();

    let event = result.audit_event;
    assert_eq!(event.action.name, "ApplyPaymentStatus");
    assert_eq!(event.action.details.as_deref(), Some("pending -> settlement"));
    assert_eq!(event.subject, "bill/42");
    assert_eq!(event.period, Some(march_2025()));
    assert!(event.before.data.contains("status=pending"));
    assert!(event.after.data.contains("status=settlement"));
}

#[test]
fn test_late_penalty_recorded_on_pending_bill() {
    let bill: BillRecord = pending_bill();
    let result: BillTransition =
        transition(&bill, BillCommand::RecordLatePenalty { amount: dec!(2500) }).unwrap();

    assert_eq!(result.new_bill.late_penalty, Some(dec!(2500)));
    // The penalty never folds into the computed total.
    assert_eq!(result.new_bill.total_charge, dec!(65000));
    assert_eq!(result.audit_event.action.name, "RecordLatePenalty");
}

#[test]
fn test_late_penalty_rejected_after_settlement() {
    let bill: BillRecord = pending_bill();
    let settled: BillRecord = transition(&bill, status_command(PaymentStatus::Settlement))
        .unwrap()
        .new_bill;

    let result: Result<BillTransition, CoreError> =
        transition(&settled, BillCommand::RecordLatePenalty { amount: dec!(2500) });
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::LatePenaltyNotApplicable { .. }
        ))
    ));
}

// Work order transitions

fn new_order() -> WorkOrder {
    WorkOrder::with_id(
        3,
        "report-7",
        vec![String::from("tech-1")],
        WorkOrderStatus::Ditugaskan,
        None,
        None,
        None,
        None,
        None,
    )
}

fn move_to(order: &WorkOrder, new_status: WorkOrderStatus) -> Result<WorkOrderTransition, CoreError> {
    apply_work_order(
        order,
        WorkOrderCommand::TransitionStatus {
            new_status,
            notes: None,
        },
        test_actor(),
        test_cause(),
    )
}

fn approve(order: &WorkOrder, approved: bool) -> Result<WorkOrderTransition, CoreError> {
    apply_work_order(
        order,
        WorkOrderCommand::Approve {
            approved,
            notes: None,
        },
        test_actor(),
        test_cause(),
    )
}

#[test]
fn test_full_lifecycle_with_approval() {
    let order: WorkOrder = new_order();
    let in_progress: WorkOrder = move_to(&order, WorkOrderStatus::SedangDikerjakan)
        .unwrap()
        .new_order;
    let under_review: WorkOrder = move_to(&in_progress, WorkOrderStatus::DitinjauAdmin)
        .unwrap()
        .new_order;
    assert_eq!(under_review.admin_approved, None);

    let approved: WorkOrder = approve(&under_review, true).unwrap().new_order;
    assert_eq!(approved.admin_approved, Some(true));
    assert_eq!(approved.status, WorkOrderStatus::DitinjauAdmin);

    let done: WorkOrder = move_to(&approved, WorkOrderStatus::Selesai).unwrap().new_order;
    assert_eq!(done.status, WorkOrderStatus::Selesai);
}

#[test]
fn test_completion_without_approval_is_rejected() {
    let order: WorkOrder = new_order();
    let in_progress: WorkOrder = move_to(&order, WorkOrderStatus::SedangDikerjakan)
        .unwrap()
        .new_order;
    let under_review: WorkOrder = move_to(&in_progress, WorkOrderStatus::DitinjauAdmin)
        .unwrap()
        .new_order;

    let result: Result<WorkOrderTransition, CoreError> =
        move_to(&under_review, WorkOrderStatus::Selesai);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ApprovalRequired { .. }))
    ));
}

#[test]
fn test_rejection_returns_order_to_rework() {
    let order: WorkOrder = new_order();
    let in_progress: WorkOrder = move_to(&order, WorkOrderStatus::SedangDikerjakan)
        .unwrap()
        .new_order;
    let under_review: WorkOrder = move_to(&in_progress, WorkOrderStatus::DitinjauAdmin)
        .unwrap()
        .new_order;

    let reworked: WorkOrder = approve(&under_review, false).unwrap().new_order;

    assert_eq!(reworked.status, WorkOrderStatus::SedangDikerjakan);
    assert_eq!(reworked.admin_approved, Some(false));
}

#[test]
fn test_re_review_after_rework_starts_with_unset_approval() {
    let order: WorkOrder = new_order();
    let in_progress: WorkOrder = move_to(&order, WorkOrderStatus::SedangDikerjakan)
        .unwrap()
        .new_order;
    let under_review: WorkOrder = move_to(&in_progress, WorkOrderStatus::DitinjauAdmin)
        .unwrap()
        .new_order;
    let reworked: WorkOrder = approve(&under_review, false).unwrap().new_order;

    let re_reviewed: WorkOrder = move_to(&reworked, WorkOrderStatus::DitinjauAdmin)
        .unwrap()
        .new_order;

    assert_eq!(re_reviewed.admin_approved, None);
}

#[test]
fn test_hold_records_prior_state_and_resume_clears_it() {
    let order: WorkOrder = new_order();
    let in_progress: WorkOrder = move_to(&order, WorkOrderStatus::SedangDikerjakan)
        .unwrap()
        .new_order;

    let held: WorkOrder = move_to(&in_progress, WorkOrderStatus::Ditunda).unwrap().new_order;
    assert_eq!(held.status, WorkOrderStatus::Ditunda);
    assert_eq!(held.held_from, Some(WorkOrderStatus::SedangDikerjakan));

    let resumed: WorkOrder = move_to(&held, WorkOrderStatus::SedangDikerjakan)
        .unwrap()
        .new_order;
    assert_eq!(resumed.status, WorkOrderStatus::SedangDikerjakan);
    assert_eq!(resumed.held_from, None);
}

#[test]
fn test_terminal_order_rejects_everything() {
    let order: WorkOrder = new_order();
    let cancelled: WorkOrder = move_to(&order, WorkOrderStatus::Dibatalkan).unwrap().new_order;

    assert!(move_to(&cancelled, WorkOrderStatus::SedangDikerjakan).is_err());
    assert!(approve(&cancelled, true).is_err());
    assert!(
        apply_work_order(
            &cancelled,
            WorkOrderCommand::AmendTechnicians {
                technicians: vec![String::from("tech-2")],
            },
            test_actor(),
            test_cause(),
        )
        .is_err()
    );
}

#[test]
fn test_amend_technicians_while_assigned() {
    let order: WorkOrder = new_order();
    let result: WorkOrderTransition = apply_work_order(
        &order,
        WorkOrderCommand::AmendTechnicians {
            technicians: vec![String::from("tech-2"), String::from("tech-3")],
        },
        test_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_order.technicians.len(), 2);
    assert_eq!(result.audit_event.action.name, "AmendTechnicians");
}

#[test]
fn test_work_order_transition_emits_audit_event() {
    let order: WorkOrder = new_order();
    let result: WorkOrderTransition =
        move_to(&order, WorkOrderStatus::SedangDikerjakan).unwrap();

    let event = result.audit_event;
    assert_eq!(event.action.name, "TransitionWorkOrder");
    assert_eq!(
        event.action.details.as_deref(),
        Some("ditugaskan -> sedang_dikerjakan")
    );
    assert_eq!(event.subject, "work_order/3");
    assert_eq!(event.period, None);
}
