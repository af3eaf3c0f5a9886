// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API handler tests.

use crate::handlers::{create_tariff_group, register_meter};
use crate::request_response::{RegisterMeterRequest, TariffGroupRequest};
use tirta_billing_audit::{Actor, Cause};
use tirta_billing_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("operator"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("test request"))
}

pub fn reference_tariff_request() -> TariffGroupRequest {
    TariffGroupRequest {
        name: String::from("Rumah Tangga A"),
        rate_below_threshold: String::from("3000"),
        rate_above_threshold: String::from("5000"),
        fixed_monthly_charge: String::from("10000"),
    }
}

/// Seeds the reference tariff group and returns its id.
pub fn seed_tariff_group(persistence: &mut Persistence) -> i64 {
    create_tariff_group(
        persistence,
        &reference_tariff_request(),
        test_actor(),
        test_cause(),
    )
    .expect("Failed to seed tariff group")
    .tariff_group_id
}

/// Seeds an active meter and returns its id.
///
/// Meter consumption counters start at zero; tests that need volume
/// adjust the stored meter directly through persistence.
pub fn seed_meter(persistence: &mut Persistence, number: &str, tariff_group_id: i64) -> i64 {
    register_meter(
        persistence,
        &RegisterMeterRequest {
            meter_number: number.to_string(),
            account_number: format!("ACC-{number}"),
            tariff_group_id,
        },
        test_actor(),
        test_cause(),
    )
    .expect("Failed to seed meter")
    .meter_id
}
