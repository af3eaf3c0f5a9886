// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use crate::convert::parse_period;
use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tirta_billing_domain::BillingPeriod;

/// Reconstructs an audit event from its stored row.
fn audit_event_from_row(row: &AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause: CauseData = serde_json::from_str(&row.cause_json)?;
    let action: ActionData = serde_json::from_str(&row.action_json)?;
    let before: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;
    let period: Option<BillingPeriod> =
        row.period.as_deref().map(parse_period).transpose()?;

    Ok(AuditEvent::new(
        Actor::new(actor.id, actor.actor_type),
        Cause::new(cause.id, cause.description),
        Action::new(action.name, action.details),
        StateSnapshot::new(before.data),
        StateSnapshot::new(after.data),
        period,
        row.subject.clone(),
    ))
}

backend_fn! {

/// Retrieve an audit event by id.
///
/// # Errors
///
/// Returns `NotFound` if no event has this id, or an error if the row
/// cannot be deserialized.
pub fn get_audit_event(conn: &mut _, event_id: i64) -> Result<AuditEvent, PersistenceError> {
    let row: Option<AuditEventRow> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first::<AuditEventRow>(conn)
        .optional()?;

    let Some(row) = row else {
        return Err(PersistenceError::NotFound(format!("audit event {event_id}")));
    };
    audit_event_from_row(&row)
}

}

backend_fn! {

/// Retrieve the full audit timeline, oldest first, with each event's id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut _,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?;

    rows.iter()
        .map(|row| Ok((row.event_id, audit_event_from_row(row)?)))
        .collect()
}

}
