// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for persistence tests.

use crate::Persistence;
use rust_decimal_macros::dec;
use tirta_billing_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tirta_billing_domain::{BillRecord, BillingPeriod, Meter, TariffGroup};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn march_2025() -> BillingPeriod {
    BillingPeriod::new(2025, 3).unwrap()
}

/// Seeds the reference tariff group and returns its id.
pub fn seed_tariff_group(persistence: &mut Persistence) -> i64 {
    let tariff: TariffGroup =
        TariffGroup::new("Rumah Tangga A", dec!(3000), dec!(5000), dec!(10000));
    persistence
        .create_tariff_group(&tariff)
        .expect("Failed to seed tariff group")
}

/// Seeds an active meter under the given tariff group and returns its id.
pub fn seed_meter(persistence: &mut Persistence, number: &str, tariff_group_id: i64) -> i64 {
    let mut meter: Meter = Meter::new(number, &format!("ACC-{number}"), tariff_group_id);
    meter.unbilled_consumption = dec!(15);
    meter.total_consumption = dec!(120);
    persistence
        .register_meter(&meter)
        .expect("Failed to seed meter")
}

/// A bill for the seeded meter matching the reference tariff scenario.
pub fn reference_bill(meter_id: i64) -> BillRecord {
    BillRecord::new(
        meter_id,
        march_2025(),
        dec!(15),
        dec!(55000),
        dec!(10000),
        dec!(65000),
    )
}

pub fn test_audit_event() -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("op-1"), String::from("operator")),
        Cause::new(String::from("req-1"), String::from("test request")),
        Action::new(String::from("TestAction"), None),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
        Some(march_2025()),
        String::from("test/1"),
    )
}
