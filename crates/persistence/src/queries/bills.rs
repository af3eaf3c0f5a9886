// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bill queries.
//!
//! `get_bill` returns the row's `updated_at` alongside the record; the
//! caller passes it back to the optimistic update so concurrent
//! transitions are detected.

use crate::convert::bill_from_row;
use crate::data_models::{BillRow, BillStatusHistoryRow};
use crate::diesel_schema::{bill_status_history, bills};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::{BillRecord, BillingPeriod};

backend_fn! {

/// Check whether a bill exists for `(meter_id, period)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn bill_exists(
    conn: &mut _,
    meter_id: i64,
    period: BillingPeriod,
) -> Result<bool, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        bills::table
            .filter(bills::meter_id.eq(meter_id))
            .filter(bills::period.eq(period.to_string())),
    ))
    .get_result(conn)?;
    Ok(exists)
}

}

backend_fn! {

/// Find a bill by id, together with its `updated_at` guard value.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_bill(
    conn: &mut _,
    bill_id: i64,
) -> Result<Option<(BillRecord, String)>, PersistenceError> {
    let row: Option<BillRow> = bills::table
        .filter(bills::bill_id.eq(bill_id))
        .first::<BillRow>(conn)
        .optional()?;

    row.map(|row| Ok((bill_from_row(&row)?, row.updated_at.clone())))
        .transpose()
}

}

backend_fn! {

/// List all bills for a period, ordered by meter id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_bills_for_period(
    conn: &mut _,
    period: BillingPeriod,
) -> Result<Vec<BillRecord>, PersistenceError> {
    let rows: Vec<BillRow> = bills::table
        .filter(bills::period.eq(period.to_string()))
        .order(bills::meter_id.asc())
        .load::<BillRow>(conn)?;

    rows.iter().map(bill_from_row).collect()
}

}

backend_fn! {

/// List a bill's status history, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_bill_status_history(
    conn: &mut _,
    bill_id: i64,
) -> Result<Vec<BillStatusHistoryRow>, PersistenceError> {
    let rows: Vec<BillStatusHistoryRow> = bill_status_history::table
        .filter(bill_status_history::bill_id.eq(bill_id))
        .order(bill_status_history::history_id.asc())
        .load::<BillStatusHistoryRow>(conn)?;
    Ok(rows)
}

}
