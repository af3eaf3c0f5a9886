// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BillRecord, BillingPeriod, Meter, PaymentStatus, TariffGroup};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_tariff_group_name_is_trimmed() {
    let tariff: TariffGroup = TariffGroup::new("  Rumah Tangga A  ", dec!(3000), dec!(5000), dec!(10000));
    assert_eq!(tariff.name(), "Rumah Tangga A");
    assert!(tariff.validate().is_ok());
}

#[test]
fn test_tariff_group_rejects_empty_name() {
    let tariff: TariffGroup = TariffGroup::new("   ", dec!(3000), dec!(5000), dec!(10000));
    assert!(tariff.validate().is_err());
}

#[test]
fn test_tariff_group_rejects_negative_rates() {
    let below: TariffGroup = TariffGroup::new("A", dec!(-1), dec!(5000), dec!(10000));
    assert!(below.validate().is_err());

    let above: TariffGroup = TariffGroup::new("A", dec!(3000), dec!(-1), dec!(10000));
    assert!(above.validate().is_err());

    let fixed: TariffGroup = TariffGroup::new("A", dec!(3000), dec!(5000), dec!(-1));
    assert!(fixed.validate().is_err());
}

#[test]
fn test_tariff_group_allows_zero_rates() {
    let tariff: TariffGroup = TariffGroup::new("Sosial", dec!(0), dec!(0), dec!(0));
    assert!(tariff.validate().is_ok());
}

#[test]
fn test_tariff_group_id_round_trip() {
    let tariff: TariffGroup = TariffGroup::new("A", dec!(3000), dec!(5000), dec!(10000));
    assert_eq!(tariff.tariff_group_id(), None);

    let persisted: TariffGroup = TariffGroup::with_id(7, "A", dec!(3000), dec!(5000), dec!(10000));
    assert_eq!(persisted.tariff_group_id(), Some(7));
}

#[test]
fn test_new_meter_starts_active_with_zero_counters() {
    let meter: Meter = Meter::new("MTR-0001", "ACC-0001", 1);
    assert!(meter.is_active);
    assert_eq!(meter.unbilled_consumption, Decimal::ZERO);
    assert_eq!(meter.total_consumption, Decimal::ZERO);
    assert_eq!(meter.meter_id(), None);
    assert!(meter.validate().is_ok());
}

#[test]
fn test_meter_rejects_empty_identifiers() {
    let no_number: Meter = Meter::new("  ", "ACC-0001", 1);
    assert!(no_number.validate().is_err());

    let no_account: Meter = Meter::new("MTR-0001", "", 1);
    assert!(no_account.validate().is_err());
}

#[test]
fn test_meter_rejects_negative_counters() {
    let meter: Meter = Meter::with_id(1, "MTR-0001", "ACC-0001", 1, true, dec!(-1), dec!(0));
    assert!(meter.validate().is_err());
}

#[test]
fn test_new_bill_starts_pending_without_payment_data() {
    let period: BillingPeriod = BillingPeriod::new(2025, 3).unwrap();
    let bill: BillRecord = BillRecord::new(1, period, dec!(15), dec!(55000), dec!(10000), dec!(65000));

    assert_eq!(bill.status, PaymentStatus::Pending);
    assert_eq!(bill.bill_id(), None);
    assert_eq!(bill.late_penalty, None);
    assert_eq!(bill.payment_date, None);
    assert_eq!(bill.payment_method, None);
}

#[test]
fn test_late_penalty_requires_positive_amount() {
    let period: BillingPeriod = BillingPeriod::new(2025, 3).unwrap();
    let bill: BillRecord = BillRecord::new(1, period, dec!(15), dec!(55000), dec!(10000), dec!(65000));

    assert!(bill.validate_late_penalty(dec!(0)).is_err());
    assert!(bill.validate_late_penalty(dec!(-500)).is_err());
    assert!(bill.validate_late_penalty(dec!(500)).is_ok());
}

#[test]
fn test_late_penalty_only_on_pending_bills() {
    let period: BillingPeriod = BillingPeriod::new(2025, 3).unwrap();
    let mut bill: BillRecord =
        BillRecord::new(1, period, dec!(15), dec!(55000), dec!(10000), dec!(65000));
    bill.status = PaymentStatus::Settlement;

    assert!(bill.validate_late_penalty(dec!(500)).is_err());
}
