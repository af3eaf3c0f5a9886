// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Work order queries.

use crate::convert::work_order_from_row;
use crate::data_models::WorkOrderRow;
use crate::diesel_schema::{work_order_technicians, work_orders};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::WorkOrder;

backend_fn! {

/// Find a work order by id, together with its `updated_at` guard value.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_work_order(
    conn: &mut _,
    work_order_id: i64,
) -> Result<Option<(WorkOrder, String)>, PersistenceError> {
    let row: Option<WorkOrderRow> = work_orders::table
        .filter(work_orders::work_order_id.eq(work_order_id))
        .first::<WorkOrderRow>(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let technicians: Vec<String> = work_order_technicians::table
        .filter(work_order_technicians::work_order_id.eq(work_order_id))
        .order(work_order_technicians::id.asc())
        .select(work_order_technicians::technician)
        .load::<String>(conn)?;

    let order: WorkOrder = work_order_from_row(&row, technicians)?;
    Ok(Some((order, row.updated_at)))
}

}

backend_fn! {

/// List all work orders, newest first, with their technician lists.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_work_orders(conn: &mut _) -> Result<Vec<WorkOrder>, PersistenceError> {
    let rows: Vec<WorkOrderRow> = work_orders::table
        .order(work_orders::work_order_id.desc())
        .load::<WorkOrderRow>(conn)?;

    let mut orders: Vec<WorkOrder> = Vec::with_capacity(rows.len());
    for row in &rows {
        let technicians: Vec<String> = work_order_technicians::table
            .filter(work_order_technicians::work_order_id.eq(row.work_order_id))
            .order(work_order_technicians::id.asc())
            .select(work_order_technicians::technician)
            .load::<String>(conn)?;
        orders.push(work_order_from_row(row, technicians)?);
    }
    Ok(orders)
}

}
