// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Meter registry queries.

use crate::convert::{meter_from_row, parse_decimal};
use crate::data_models::MeterRow;
use crate::diesel_schema::meters;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rust_decimal::Decimal;
use tirta_billing_domain::Meter;

backend_fn! {

/// Find a meter by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_meter(conn: &mut _, meter_id: i64) -> Result<Option<Meter>, PersistenceError> {
    let row: Option<MeterRow> = meters::table
        .filter(meters::meter_id.eq(meter_id))
        .first::<MeterRow>(conn)
        .optional()?;

    row.as_ref().map(meter_from_row).transpose()
}

}

backend_fn! {

/// List all meters, ordered by meter number.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_meters(conn: &mut _) -> Result<Vec<Meter>, PersistenceError> {
    let rows: Vec<MeterRow> = meters::table
        .order(meters::meter_number.asc())
        .load::<MeterRow>(conn)?;

    rows.iter().map(meter_from_row).collect()
}

}

backend_fn! {

/// Read a meter's unbilled consumption as of now.
///
/// Returns `None` if the meter does not exist; absence of data is the
/// caller's failure to classify, never zero.
///
/// # Errors
///
/// Returns an error if the query fails or the stored value is corrupt.
pub fn get_unbilled_consumption(
    conn: &mut _,
    meter_id: i64,
) -> Result<Option<Decimal>, PersistenceError> {
    let value: Option<String> = meters::table
        .filter(meters::meter_id.eq(meter_id))
        .select(meters::unbilled_consumption)
        .first::<String>(conn)
        .optional()?;

    value
        .map(|v| parse_decimal(&v, "unbilled_consumption"))
        .transpose()
}

}
