// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeStore, march_2025, store_with_standard_tariff};
use crate::error::CoreError;
use crate::generation::{BatchOutcome, GenerationFailureReason, generate_bills};
use rust_decimal_macros::dec;
use tirta_billing_domain::{BillRecord, BillingPeriod, DomainError, PaymentStatus};

#[test]
fn test_generates_one_bill_per_meter() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.add_standard_meter(2, dec!(15));
    store.add_standard_meter(3, dec!(0));

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 2, 3]).unwrap();

    assert_eq!(outcome.succeeded, 3);
    assert_eq!(outcome.skipped, 0);
    assert!(outcome.failures.is_empty());
    assert_eq!(store.bills.len(), 3);
}

#[test]
fn test_generated_bill_carries_computed_amounts_and_pending_status() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(15));

    generate_bills(&mut store, march_2025(), &[1]).unwrap();

    let bills: Vec<&BillRecord> = store.bills_for(1, march_2025());
    assert_eq!(bills.len(), 1);
    let bill: &BillRecord = bills[0];
    assert_eq!(bill.consumption, dec!(15));
    assert_eq!(bill.base_charge, dec!(55000));
    assert_eq!(bill.fixed_charge, dec!(10000));
    assert_eq!(bill.total_charge, dec!(65000));
    assert_eq!(bill.status, PaymentStatus::Pending);
    assert_eq!(bill.late_penalty, None);
}

#[test]
fn test_second_run_is_idempotent() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.add_standard_meter(2, dec!(15));

    let first: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 2]).unwrap();
    assert_eq!(first.succeeded, 2);

    let second: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 2]).unwrap();

    assert_eq!(second.succeeded, 0);
    assert_eq!(second.skipped, 2);
    assert!(second.failures.is_empty());
    // No duplicates for any meter.
    assert_eq!(store.bills_for(1, march_2025()).len(), 1);
    assert_eq!(store.bills_for(2, march_2025()).len(), 1);
}

#[test]
fn test_rerun_does_not_alter_existing_records() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(15));

    generate_bills(&mut store, march_2025(), &[1]).unwrap();
    let before: BillRecord = store.bills[0].clone();

    // Consumption changed between runs; the existing bill must not move.
    store.consumption.insert(1, dec!(99));
    generate_bills(&mut store, march_2025(), &[1]).unwrap();

    assert_eq!(store.bills.len(), 1);
    assert_eq!(store.bills[0], before);
}

#[test]
fn test_same_meter_different_period_is_billed_again() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));

    let march: BillingPeriod = march_2025();
    let april: BillingPeriod = BillingPeriod::new(2025, 4).unwrap();

    generate_bills(&mut store, march, &[1]).unwrap();
    let outcome: BatchOutcome = generate_bills(&mut store, april, &[1]).unwrap();

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(store.bills.len(), 2);
}

#[test]
fn test_partial_failure_isolation() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.add_standard_meter(2, dec!(15));
    store.add_standard_meter(3, dec!(8));

    // Meter 99 does not exist.
    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 99, 2, 3]).unwrap();

    assert_eq!(outcome.succeeded, 3);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].meter_id, 99);
    assert_eq!(
        outcome.failures[0].reason,
        GenerationFailureReason::MeterNotFound
    );
    // Valid meters still produced correctly computed bills.
    assert_eq!(store.bills_for(2, march_2025())[0].total_charge, dec!(65000));
}

#[test]
fn test_buckets_always_sum_to_input_size() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.add_standard_meter(2, dec!(15));
    store.add_standard_meter(3, dec!(8));
    store.meters.get_mut(&3).unwrap().is_active = false;

    // One billed already, one inactive, one missing, one fine.
    generate_bills(&mut store, march_2025(), &[1]).unwrap();
    let ids: Vec<i64> = vec![1, 2, 3, 99];
    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &ids).unwrap();

    assert_eq!(outcome.total(), ids.len());
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.failures.len(), 2);
}

#[test]
fn test_inactive_meter_is_a_failure() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.meters.get_mut(&1).unwrap().is_active = false;

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1]).unwrap();

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(
        outcome.failures[0].reason,
        GenerationFailureReason::MeterInactive
    );
    assert!(store.bills.is_empty());
}

#[test]
fn test_missing_consumption_is_a_failure_not_zero() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.consumption.remove(&1);

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1]).unwrap();

    assert_eq!(
        outcome.failures[0].reason,
        GenerationFailureReason::MissingConsumption
    );
    assert!(store.bills.is_empty());
}

#[test]
fn test_missing_tariff_group_is_a_failure() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.meters.get_mut(&1).unwrap().tariff_group_id = 42;

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1]).unwrap();

    assert_eq!(
        outcome.failures[0].reason,
        GenerationFailureReason::TariffGroupNotFound
    );
}

#[test]
fn test_negative_consumption_reading_is_a_calculator_failure() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.consumption.insert(1, dec!(-2));

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1]).unwrap();

    assert!(matches!(
        outcome.failures[0].reason,
        GenerationFailureReason::Calculator(DomainError::NegativeConsumption { .. })
    ));
}

#[test]
fn test_collaborator_outage_fails_that_meter_only() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.add_standard_meter(2, dec!(8));
    store.failing_reads.insert(1);

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 2]).unwrap();

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0].reason,
        GenerationFailureReason::Store(_)
    ));
}

#[test]
fn test_lost_insert_race_counts_as_skipped() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.racing_inserts.insert(1);

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1]).unwrap();

    assert_eq!(outcome.succeeded, 0);
    assert_eq!(outcome.skipped, 1);
    assert!(outcome.failures.is_empty());
}

#[test]
fn test_duplicate_meter_id_in_request_is_classified_twice() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 1]).unwrap();

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.total(), 2);
    assert_eq!(store.bills.len(), 1);
}

#[test]
fn test_empty_meter_list_is_rejected_before_any_work() {
    let mut store: FakeStore = store_with_standard_tariff();

    let result: Result<BatchOutcome, CoreError> = generate_bills(&mut store, march_2025(), &[]);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::EmptyMeterList))
    );
}

#[test]
fn test_spec_scenario_one_of_three_already_billed() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(1, dec!(5));
    store.add_standard_meter(2, dec!(15));
    store.add_standard_meter(3, dec!(8));

    // Meter 2 already has a bill for 2025-03.
    generate_bills(&mut store, march_2025(), &[2]).unwrap();

    let outcome: BatchOutcome = generate_bills(&mut store, march_2025(), &[1, 2, 3]).unwrap();

    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.skipped + outcome.failures.len(), 1);
    assert_eq!(store.bills_for(2, march_2025()).len(), 1);
}

#[test]
fn test_meter_missing_from_directory_mid_list_does_not_stop_later_meters() {
    let mut store: FakeStore = store_with_standard_tariff();
    store.add_standard_meter(5, dec!(1));
    store.add_standard_meter(7, dec!(2));

    let outcome: BatchOutcome =
        generate_bills(&mut store, march_2025(), &[6, 5, 6, 7]).unwrap();

    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failures.len(), 2);
    assert!(
        outcome
            .failures
            .iter()
            .all(|f| f.meter_id == 6 && f.reason == GenerationFailureReason::MeterNotFound)
    );
}
