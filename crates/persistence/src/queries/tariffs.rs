// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tariff group queries.

use crate::convert::tariff_group_from_row;
use crate::data_models::TariffGroupRow;
use crate::diesel_schema::tariff_groups;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_domain::TariffGroup;

backend_fn! {

/// Find a tariff group by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is corrupt.
pub fn get_tariff_group(
    conn: &mut _,
    tariff_group_id: i64,
) -> Result<Option<TariffGroup>, PersistenceError> {
    let row: Option<TariffGroupRow> = tariff_groups::table
        .filter(tariff_groups::tariff_group_id.eq(tariff_group_id))
        .first::<TariffGroupRow>(conn)
        .optional()?;

    row.as_ref().map(tariff_group_from_row).transpose()
}

}

backend_fn! {

/// List all tariff groups, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is corrupt.
pub fn list_tariff_groups(conn: &mut _) -> Result<Vec<TariffGroup>, PersistenceError> {
    let rows: Vec<TariffGroupRow> = tariff_groups::table
        .order(tariff_groups::name.asc())
        .load::<TariffGroupRow>(conn)?;

    rows.iter().map(tariff_group_from_row).collect()
}

}
