// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use crate::backend::PersistenceBackend;
use crate::convert::now_iso;
use crate::data_models::{ActionData, ActorData, CauseData, NewAuditEventRow, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tirta_billing_audit::AuditEvent;

backend_fn! {

/// Persist an audit event and return its generated event id.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(conn: &mut _, event: &AuditEvent) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    })?;
    let cause_json: String = serde_json::to_string(&CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    })?;
    let action_json: String = serde_json::to_string(&ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    })?;
    let before_snapshot_json: String = serde_json::to_string(&StateSnapshotData {
        data: event.before.data.clone(),
    })?;
    let after_snapshot_json: String = serde_json::to_string(&StateSnapshotData {
        data: event.after.data.clone(),
    })?;

    let row = NewAuditEventRow {
        period: event.period.map(|p| p.to_string()),
        subject: event.subject.clone(),
        actor_json,
        cause_json,
        action_json,
        before_snapshot_json,
        after_snapshot_json,
        created_at: now_iso()?,
    };

    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

}
