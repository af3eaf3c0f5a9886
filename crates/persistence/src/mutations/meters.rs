// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Meter registry mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewMeterRow;
use crate::diesel_schema::meters;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::Meter;

backend_fn! {

/// Insert a meter and return its generated id.
///
/// # Errors
///
/// Returns `UniqueViolation` if the meter number or account number is
/// already taken, or a database error if the insert fails.
pub fn insert_meter(conn: &mut _, meter: &Meter) -> Result<i64, PersistenceError> {
    let row = NewMeterRow {
        meter_number: meter.meter_number().to_string(),
        account_number: meter.account_number().to_string(),
        tariff_group_id: meter.tariff_group_id,
        is_active: i32::from(meter.is_active),
        unbilled_consumption: meter.unbilled_consumption.to_string(),
        total_consumption: meter.total_consumption.to_string(),
    };

    diesel::insert_into(meters::table)
        .values(&row)
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Overwrite a meter's unbilled consumption counter.
///
/// This is the write surface for the external reading-upload
/// collaborator; the billing engine itself only reads the counter.
///
/// # Errors
///
/// Returns `NotFound` if no meter has this id.
pub fn set_unbilled_consumption(
    conn: &mut _,
    meter_id: i64,
    volume: &str,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(meters::table.filter(meters::meter_id.eq(meter_id)))
            .set(meters::unbilled_consumption.eq(volume))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("meter {meter_id}")));
    }
    Ok(())
}

}

backend_fn! {

/// Set a meter's active flag.
///
/// # Errors
///
/// Returns `NotFound` if no meter has this id.
pub fn set_meter_active(
    conn: &mut _,
    meter_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(meters::table.filter(meters::meter_id.eq(meter_id)))
            .set(meters::is_active.eq(i32::from(is_active)))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("meter {meter_id}")));
    }
    Ok(())
}

}
