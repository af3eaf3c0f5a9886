// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bill mutation operations.
//!
//! The bill insert is the check-then-insert collapse point: a unique-index
//! hit on `(meter_id, period)` surfaces as `DuplicateBill`, which the
//! generation batch converts into a skip. Status updates are guarded with
//! an optimistic `updated_at` filter so two concurrent transition requests
//! cannot both succeed from the same prior state.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewBillRow, NewBillStatusHistoryRow};
use crate::diesel_schema::{bill_status_history, bills};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::BillRecord;

backend_fn! {

/// Insert a bill and return its generated id.
///
/// # Errors
///
/// Returns `DuplicateBill` if a bill already exists for this
/// `(meter, period)` pair, or a database error if the insert fails.
pub fn insert_bill(
    conn: &mut _,
    bill: &BillRecord,
    updated_at: &str,
) -> Result<i64, PersistenceError> {
    let row = NewBillRow {
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
        updated_at: updated_at.to_string(),
    };

    let result: Result<usize, PersistenceError> = diesel::insert_into(bills::table)
        .values(&row)
        .execute(conn)
        .map_err(Into::into);

    match result {
        Ok(_) => conn.get_last_insert_rowid(),
        // The only unique index this insert can hit is (meter_id, period).
        Err(PersistenceError::UniqueViolation(_)) => Err(PersistenceError::DuplicateBill {
            meter_id: bill.meter_id,
            period: bill.period.to_string(),
        }),
        Err(e) => Err(e),
    }
}

}

backend_fn! {

/// Update a bill's payment fields after a status transition.
///
/// The update is filtered on the `updated_at` value read with the bill;
/// zero affected rows means a concurrent request modified the bill first.
///
/// # Errors
///
/// Returns `ConcurrentModification` if the row moved since it was read,
/// or `NotFound` if the bill does not exist at all.
#[allow(clippy::too_many_arguments)]
pub fn update_bill_status(
    conn: &mut _,
    bill_id: i64,
    status: &str,
    payment_date: Option<&str>,
    payment_method: Option<&str>,
    notes: Option<&str>,
    expected_updated_at: &str,
    new_updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        bills::table
            .filter(bills::bill_id.eq(bill_id))
            .filter(bills::updated_at.eq(expected_updated_at)),
    )
    .set((
        bills::status.eq(status),
        bills::payment_date.eq(payment_date),
        bills::payment_method.eq(payment_method),
        bills::notes.eq(notes),
        bills::updated_at.eq(new_updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        let exists: bool = diesel::select(diesel::dsl::exists(
            bills::table.filter(bills::bill_id.eq(bill_id)),
        ))
        .get_result(conn)?;
        if exists {
            return Err(PersistenceError::ConcurrentModification {
                entity: "bill",
                id: bill_id,
            });
        }
        return Err(PersistenceError::NotFound(format!("bill {bill_id}")));
    }
    Ok(())
}

}

backend_fn! {

/// Record a late penalty on a bill.
///
/// Guarded by the same optimistic `updated_at` filter as status updates.
///
/// # Errors
///
/// Returns `ConcurrentModification` if the row moved since it was read,
/// or `NotFound` if the bill does not exist.
pub fn record_late_penalty(
    conn: &mut _,
    bill_id: i64,
    late_penalty: &str,
    expected_updated_at: &str,
    new_updated_at: &str,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        bills::table
            .filter(bills::bill_id.eq(bill_id))
            .filter(bills::updated_at.eq(expected_updated_at)),
    )
    .set((
        bills::late_penalty.eq(late_penalty),
        bills::updated_at.eq(new_updated_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        let exists: bool = diesel::select(diesel::dsl::exists(
            bills::table.filter(bills::bill_id.eq(bill_id)),
        ))
        .get_result(conn)?;
        if exists {
            return Err(PersistenceError::ConcurrentModification {
                entity: "bill",
                id: bill_id,
            });
        }
        return Err(PersistenceError::NotFound(format!("bill {bill_id}")));
    }
    Ok(())
}

}

backend_fn! {

/// Insert a bill status history record.
///
/// # Errors
///
/// Returns an error if the database insert fails.
#[allow(clippy::too_many_arguments)]
pub fn insert_bill_status_history(
    conn: &mut _,
    bill_id: i64,
    audit_event_id: i64,
    previous_status: Option<&str>,
    new_status: &str,
    transitioned_at: &str,
    notes: Option<&str>,
) -> Result<(), PersistenceError> {
    let record = NewBillStatusHistoryRow {
        bill_id,
        audit_event_id,
        previous_status: previous_status.map(ToString::to_string),
        new_status: new_status.to_string(),
        transitioned_at: transitioned_at.to_string(),
        notes: notes.map(ToString::to_string),
    };

    diesel::insert_into(bill_status_history::table)
        .values(&record)
        .execute(conn)?;
    Ok(())
}

}
