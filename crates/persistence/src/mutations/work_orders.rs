// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Work order mutation operations.
//!
//! Work order updates carry the same optimistic `updated_at` guard as
//! bill updates: concurrent transition attempts on the same order are
//! serialized so both cannot succeed from the same prior state.

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewWorkOrderRow, NewWorkOrderStatusHistoryRow, NewWorkOrderTechnicianRow,
};
use crate::diesel_schema::{work_order_status_history, work_order_technicians, work_orders};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::WorkOrder;

backend_fn! {

/// Insert a work order together with its technician assignment and return
/// the generated id.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn insert_work_order(
    conn: &mut _,
    order: &WorkOrder,
    updated_at: &str,
) -> Result<i64, PersistenceError> {
    let row = NewWorkOrderRow {
        source_ref: order.source_ref().to_string(),
        status: order.status.as_str().to_string(),
        held_from: order.held_from.map(|s| s.as_str().to_string()),
        admin_approved: order.admin_approved.map(i32::from),
        notes: order.notes.clone(),
        cost_estimate_ref: order.cost_estimate_ref.clone(),
        completion_evidence_ref: order.completion_evidence_ref.clone(),
        updated_at: updated_at.to_string(),
    };

    diesel::insert_into(work_orders::table)
        .values(&row)
        .execute(conn)?;

    let work_order_id: i64 = conn.get_last_insert_rowid()?;

    let technician_rows: Vec<NewWorkOrderTechnicianRow> = order
        .technicians
        .iter()
        .map(|technician| NewWorkOrderTechnicianRow {
            work_order_id,
            technician: technician.clone(),
        })
        .collect();
    if !technician_rows.is_empty() {
        diesel::insert_into(work_order_technicians::table)
            .values(&technician_rows)
            .execute(conn)?;
    }

    Ok(work_order_id)
}

}

backend_fn! {

/// Update a work order's lifecycle fields.
///
/// # Errors
///
/// Returns `ConcurrentModification` if the row moved since it was read,
/// or `NotFound` if the order does not exist.
#[allow(clippy::too_many_arguments)]
pub fn update_work_order(
    conn: &mut _,
    work_order_id: i64,
    status: &str,
    held_from: Option<&str>,
    admin_approved: Option<i32>,
    notes: Option<&str>,
    expected_updated_at: &str,
    new_updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        work_orders::table
            .filter(work_orders::work_order_id.eq(work_order_id))
            .filter(work_orders::updated_at.eq(expected_updated_at)),
    )
    .set((
        work_orders::status.eq(status),
        work_orders::held_from.eq(held_from),
        work_orders::admin_approved.eq(admin_approved),
        work_orders::notes.eq(notes),
        work_orders::updated_at.eq(new_updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        let exists: bool = diesel::select(diesel::dsl::exists(
            work_orders::table.filter(work_orders::work_order_id.eq(work_order_id)),
        ))
        .get_result(conn)?;
        if exists {
            return Err(PersistenceError::ConcurrentModification {
                entity: "work order",
                id: work_order_id,
            });
        }
        return Err(PersistenceError::NotFound(format!(
            "work order {work_order_id}"
        )));
    }
    Ok(())
}

}

backend_fn! {

/// Replace a work order's technician assignment.
///
/// # Errors
///
/// Returns an error if a delete or insert fails.
pub fn replace_technicians(
    conn: &mut _,
    work_order_id: i64,
    technicians: &[String],
) -> Result<(), PersistenceError> {
    diesel::delete(
        work_order_technicians::table
            .filter(work_order_technicians::work_order_id.eq(work_order_id)),
    )
    .execute(conn)?;

    let technician_rows: Vec<NewWorkOrderTechnicianRow> = technicians
        .iter()
        .map(|technician| NewWorkOrderTechnicianRow {
            work_order_id,
            technician: technician.clone(),
        })
        .collect();
    if !technician_rows.is_empty() {
        diesel::insert_into(work_order_technicians::table)
            .values(&technician_rows)
            .execute(conn)?;
    }
    Ok(())
}

}

backend_fn! {

/// Insert a work order status history record.
///
/// # Errors
///
/// Returns an error if the database insert fails.
#[allow(clippy::too_many_arguments)]
pub fn insert_work_order_status_history(
    conn: &mut _,
    work_order_id: i64,
    audit_event_id: i64,
    previous_status: Option<&str>,
    new_status: &str,
    transitioned_at: &str,
    notes: Option<&str>,
) -> Result<(), PersistenceError> {
    let record = NewWorkOrderStatusHistoryRow {
        work_order_id,
        audit_event_id,
        previous_status: previous_status.map(ToString::to_string),
        new_status: new_status.to_string(),
        transitioned_at: transitioned_at.to_string(),
        notes: notes.map(ToString::to_string),
    };

    diesel::insert_into(work_order_status_history::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}

}
