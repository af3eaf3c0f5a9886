// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_persistence, seed_meter, seed_tariff_group, test_actor, test_cause};
use crate::error::ApiError;
use crate::handlers::{
    generate_bills, list_bill_status_history, list_bills_for_period, record_late_penalty,
    update_bill_status,
};
use crate::request_response::{
    BillInfo, GenerateBillsRequest, GenerateBillsResponse, RecordPenaltyRequest,
    UpdateBillStatusRequest,
};
use rust_decimal_macros::dec;
use tirta_billing_persistence::Persistence;

fn generation_request(meter_ids: Vec<i64>) -> GenerateBillsRequest {
    GenerateBillsRequest {
        period: String::from("2025-03"),
        meter_ids,
    }
}

fn settle_request() -> UpdateBillStatusRequest {
    UpdateBillStatusRequest {
        status: String::from("settlement"),
        payment_method: Some(String::from("bank_transfer")),
        notes: None,
    }
}

/// Seeds a tariff, a meter with 15 m³ unbilled, and returns the meter id.
fn seeded_meter(persistence: &mut Persistence) -> i64 {
    let tariff_id: i64 = seed_tariff_group(persistence);
    let meter_id: i64 = seed_meter(persistence, "MTR-0001", tariff_id);
    persistence
        .set_unbilled_consumption(meter_id, dec!(15))
        .unwrap();
    meter_id
}

#[test]
fn test_generate_bills_reports_counts_and_message() {
    let mut persistence: Persistence = create_test_persistence();
    let meter_id: i64 = seeded_meter(&mut persistence);

    let response: GenerateBillsResponse = generate_bills(
        &mut persistence,
        &generation_request(vec![meter_id]),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(response.berhasil, 1);
    assert_eq!(response.gagal, 0);
    assert_eq!(
        response.pesan,
        "1 bills generated, 0 skipped (already billed), 0 failed"
    );
    assert!(response.failures.is_empty());
}

#[test]
fn test_generated_bill_matches_reference_scenario() {
    let mut persistence: Persistence = create_test_persistence();
    let meter_id: i64 = seeded_meter(&mut persistence);

    generate_bills(
        &mut persistence,
        &generation_request(vec![meter_id]),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    let bills: Vec<BillInfo> = list_bills_for_period(&mut persistence, "2025-03").unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].base_charge, "55000");
    assert_eq!(bills[0].fixed_charge, "10000");
    assert_eq!(bills[0].total_charge, "65000");
    assert_eq!(bills[0].status, "pending");
}

#[test]
fn test_spec_scenario_rerun_reports_skip_in_gagal() {
    let mut persistence: Persistence = create_test_persistence();
    let tariff_id: i64 = seed_tariff_group(&mut persistence);
    let meter_1: i64 = seed_meter(&mut persistence, "MTR-0001", tariff_id);
    let meter_2: i64 = seed_meter(&mut persistence, "MTR-0002", tariff_id);
    let meter_3: i64 = seed_meter(&mut persistence, "MTR-0003", tariff_id);
    for id in [meter_1, meter_2, meter_3] {
        persistence.set_unbilled_consumption(id, dec!(10)).unwrap();
    }

    // Meter 2 already has a bill for 2025-03.
    generate_bills(
        &mut persistence,
        &generation_request(vec![meter_2]),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    let response: GenerateBillsResponse = generate_bills(
        &mut persistence,
        &generation_request(vec![meter_1, meter_2, meter_3]),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(response.berhasil, 2);
    assert_eq!(response.gagal, 1);
    // No new record for meter 2.
    let bills: Vec<BillInfo> = list_bills_for_period(&mut persistence, "2025-03").unwrap();
    assert_eq!(bills.len(), 3);
}

#[test]
fn test_generate_bills_rejects_malformed_period() {
    let mut persistence: Persistence = create_test_persistence();
    let request: GenerateBillsRequest = GenerateBillsRequest {
        period: String::from("March 2025"),
        meter_ids: vec![1],
    };

    let result: Result<GenerateBillsResponse, ApiError> =
        generate_bills(&mut persistence, &request, test_actor(), test_cause());

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_generate_bills_rejects_empty_meter_list() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<GenerateBillsResponse, ApiError> = generate_bills(
        &mut persistence,
        &generation_request(Vec::new()),
        test_actor(),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_unknown_meter_is_reported_in_failures() {
    let mut persistence: Persistence = create_test_persistence();
    let meter_id: i64 = seeded_meter(&mut persistence);

    let response: GenerateBillsResponse = generate_bills(
        &mut persistence,
        &generation_request(vec![meter_id, 9999]),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(response.berhasil, 1);
    assert_eq!(response.gagal, 1);
    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].meter_id, 9999);
    assert_eq!(response.failures[0].reason, "meter not found");
}

fn generated_bill_id(persistence: &mut Persistence) -> i64 {
    let meter_id: i64 = seeded_meter(persistence);
    generate_bills(
        persistence,
        &generation_request(vec![meter_id]),
        test_actor(),
        test_cause(),
    )
    .unwrap();
    list_bills_for_period(persistence, "2025-03").unwrap()[0].bill_id
}

#[test]
fn test_manual_settlement_stamps_payment_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let bill_id: i64 = generated_bill_id(&mut persistence);

    let bill: BillInfo = update_bill_status(
        &mut persistence,
        bill_id,
        settle_request(),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(bill.status, "settlement");
    assert!(bill.payment_date.is_some());
    assert_eq!(bill.payment_method.as_deref(), Some("bank_transfer"));
}

#[test]
fn test_settling_a_cancelled_bill_reports_the_specific_reason() {
    let mut persistence: Persistence = create_test_persistence();
    let bill_id: i64 = generated_bill_id(&mut persistence);

    update_bill_status(
        &mut persistence,
        bill_id,
        UpdateBillStatusRequest {
            status: String::from("cancel"),
            payment_method: None,
            notes: None,
        },
        test_actor(),
        test_cause(),
    )
    .unwrap();

    let result: Result<BillInfo, ApiError> = update_bill_status(
        &mut persistence,
        bill_id,
        settle_request(),
        test_actor(),
        test_cause(),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, message }) => {
            assert_eq!(rule, "status_transition");
            assert!(message.contains("cancel"));
            assert!(message.contains("settlement"));
        }
        other => panic!("expected a domain rule violation, got {other:?}"),
    }
}

#[test]
fn test_unknown_status_string_is_invalid_input() {
    let mut persistence: Persistence = create_test_persistence();
    let bill_id: i64 = generated_bill_id(&mut persistence);

    let result: Result<BillInfo, ApiError> = update_bill_status(
        &mut persistence,
        bill_id,
        UpdateBillStatusRequest {
            status: String::from("paid"),
            payment_method: None,
            notes: None,
        },
        test_actor(),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_missing_bill_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<BillInfo, ApiError> = update_bill_status(
        &mut persistence,
        42,
        settle_request(),
        test_actor(),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_status_transitions_append_history() {
    let mut persistence: Persistence = create_test_persistence();
    let bill_id: i64 = generated_bill_id(&mut persistence);

    update_bill_status(
        &mut persistence,
        bill_id,
        settle_request(),
        test_actor(),
        test_cause(),
    )
    .unwrap();
    update_bill_status(
        &mut persistence,
        bill_id,
        UpdateBillStatusRequest {
            status: String::from("refund"),
            payment_method: None,
            notes: Some(String::from("customer dispute upheld")),
        },
        test_actor(),
        test_cause(),
    )
    .unwrap();

    let history = list_bill_status_history(&mut persistence, bill_id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].previous_status.as_deref(), Some("pending"));
    assert_eq!(history[0].new_status, "settlement");
    assert_eq!(history[1].previous_status.as_deref(), Some("settlement"));
    assert_eq!(history[1].new_status, "refund");
}

#[test]
fn test_late_penalty_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let bill_id: i64 = generated_bill_id(&mut persistence);

    let bill: BillInfo = record_late_penalty(
        &mut persistence,
        bill_id,
        &RecordPenaltyRequest {
            amount: String::from("2500"),
        },
        test_actor(),
        test_cause(),
    )
    .unwrap();

    assert_eq!(bill.late_penalty.as_deref(), Some("2500"));
    assert_eq!(bill.total_charge, "65000");
}

#[test]
fn test_late_penalty_on_settled_bill_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let bill_id: i64 = generated_bill_id(&mut persistence);
    update_bill_status(
        &mut persistence,
        bill_id,
        settle_request(),
        test_actor(),
        test_cause(),
    )
    .unwrap();

    let result: Result<BillInfo, ApiError> = record_late_penalty(
        &mut persistence,
        bill_id,
        &RecordPenaltyRequest {
            amount: String::from("2500"),
        },
        test_actor(),
        test_cause(),
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}
