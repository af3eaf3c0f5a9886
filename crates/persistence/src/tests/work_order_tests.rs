// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_persistence, test_audit_event};
use crate::{Persistence, PersistenceError};
use tirta_billing_domain::{WorkOrder, WorkOrderStatus};

fn seed_work_order(persistence: &mut Persistence) -> i64 {
    let order: WorkOrder = WorkOrder::new(
        "report-42",
        vec![String::from("tech-1"), String::from("tech-2")],
    )
    .unwrap();
    persistence.create_work_order(&order).unwrap()
}

#[test]
fn test_create_and_get_work_order() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);

    let (order, updated_at) = persistence.get_work_order(id).unwrap().unwrap();
    assert_eq!(order.work_order_id(), Some(id));
    assert_eq!(order.source_ref(), "report-42");
    assert_eq!(order.status, WorkOrderStatus::Ditugaskan);
    assert_eq!(order.technicians, vec!["tech-1", "tech-2"]);
    assert_eq!(order.admin_approved, None);
    assert!(!updated_at.is_empty());
}

#[test]
fn test_get_missing_work_order_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.get_work_order(99).unwrap().is_none());
}

#[test]
fn test_update_work_order_with_fresh_guard() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);

    let (mut order, updated_at) = persistence.get_work_order(id).unwrap().unwrap();
    order.status = WorkOrderStatus::SedangDikerjakan;
    persistence.update_work_order(id, &order, &updated_at).unwrap();

    let (stored, _) = persistence.get_work_order(id).unwrap().unwrap();
    assert_eq!(stored.status, WorkOrderStatus::SedangDikerjakan);
}

#[test]
fn test_update_work_order_with_stale_guard_is_a_concurrent_modification() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);

    let (mut order, _) = persistence.get_work_order(id).unwrap().unwrap();
    order.status = WorkOrderStatus::SedangDikerjakan;

    let result: Result<(), PersistenceError> =
        persistence.update_work_order(id, &order, "2000-01-01T00:00:00Z");

    assert_eq!(
        result,
        Err(PersistenceError::ConcurrentModification {
            entity: "work order",
            id,
        })
    );
    let (stored, _) = persistence.get_work_order(id).unwrap().unwrap();
    assert_eq!(stored.status, WorkOrderStatus::Ditugaskan);
}

#[test]
fn test_held_state_round_trips() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);

    let (mut order, updated_at) = persistence.get_work_order(id).unwrap().unwrap();
    order.status = WorkOrderStatus::Ditunda;
    order.held_from = Some(WorkOrderStatus::Ditugaskan);
    persistence.update_work_order(id, &order, &updated_at).unwrap();

    let (stored, _) = persistence.get_work_order(id).unwrap().unwrap();
    assert_eq!(stored.status, WorkOrderStatus::Ditunda);
    assert_eq!(stored.held_from, Some(WorkOrderStatus::Ditugaskan));
}

#[test]
fn test_approval_flag_round_trips_through_tri_state() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);

    for approved in [Some(true), Some(false), None] {
        let (mut order, updated_at) = persistence.get_work_order(id).unwrap().unwrap();
        order.admin_approved = approved;
        persistence.update_work_order(id, &order, &updated_at).unwrap();

        let (stored, _) = persistence.get_work_order(id).unwrap().unwrap();
        assert_eq!(stored.admin_approved, approved);
    }
}

#[test]
fn test_replace_technicians() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);

    persistence
        .replace_technicians(id, &[String::from("tech-9")])
        .unwrap();

    let (stored, _) = persistence.get_work_order(id).unwrap().unwrap();
    assert_eq!(stored.technicians, vec!["tech-9"]);
}

#[test]
fn test_work_order_status_history_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let id: i64 = seed_work_order(&mut persistence);
    let event_id: i64 = persistence.persist_audit_event(&test_audit_event()).unwrap();

    persistence
        .insert_work_order_status_history(
            id,
            event_id,
            Some("ditugaskan"),
            "sedang_dikerjakan",
            None,
        )
        .unwrap();

    // History rows are kept; reading them back goes through the audit
    // timeline in the API layer, so existence is checked via the event.
    let event = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(event.subject, "test/1");
}

#[test]
fn test_list_work_orders_newest_first() {
    let mut persistence: Persistence = create_test_persistence();
    let first: i64 = seed_work_order(&mut persistence);
    let second: i64 = {
        let order: WorkOrder = WorkOrder::new("report-43", Vec::new()).unwrap();
        persistence.create_work_order(&order).unwrap()
    };

    let orders: Vec<WorkOrder> = persistence.list_work_orders().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].work_order_id(), Some(second));
    assert_eq!(orders[1].work_order_id(), Some(first));
}
