// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tariff group mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewTariffGroupRow;
use crate::diesel_schema::tariff_groups;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::TariffGroup;

backend_fn! {

/// Insert a tariff group and return its generated id.
///
/// # Errors
///
/// Returns `UniqueViolation` if the name is already taken, or a database
/// error if the insert fails.
pub fn insert_tariff_group(
    conn: &mut _,
    tariff: &TariffGroup,
) -> Result<i64, PersistenceError> {
    let row = NewTariffGroupRow {
        name: tariff.name().to_string(),
        rate_below_threshold: tariff.rate_below_threshold.to_string(),
        rate_above_threshold: tariff.rate_above_threshold.to_string(),
        fixed_monthly_charge: tariff.fixed_monthly_charge.to_string(),
    };

    diesel::insert_into(tariff_groups::table)
        .values(&row)
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Update an existing tariff group.
///
/// # Errors
///
/// Returns `NotFound` if no group has this id.
pub fn update_tariff_group(
    conn: &mut _,
    tariff_group_id: i64,
    tariff: &TariffGroup,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        tariff_groups::table.filter(tariff_groups::tariff_group_id.eq(tariff_group_id)),
    )
    .set((
        tariff_groups::name.eq(tariff.name()),
        tariff_groups::rate_below_threshold.eq(tariff.rate_below_threshold.to_string()),
        tariff_groups::rate_above_threshold.eq(tariff.rate_above_threshold.to_string()),
        tariff_groups::fixed_monthly_charge.eq(tariff.fixed_monthly_charge.to_string()),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "tariff group {tariff_group_id}"
        )));
    }
    Ok(())
}

}

backend_fn! {

/// Delete a tariff group.
///
/// Whether the group is still referenced by active meters is a caller
/// precondition; a dangling reference is rejected by the foreign key.
///
/// # Errors
///
/// Returns `NotFound` if no group has this id.
pub fn delete_tariff_group(
    conn: &mut _,
    tariff_group_id: i64,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(
        tariff_groups::table.filter(tariff_groups::tariff_group_id.eq(tariff_group_id)),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "tariff group {tariff_group_id}"
        )));
    }
    Ok(())
}

}
