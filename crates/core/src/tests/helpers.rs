// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test fixtures: an in-memory store implementing the generation
//! collaborator traits, and entity builders.

use crate::generation::{
    BillStore, ConsumptionReader, InsertOutcome, MeterDirectory, StoreError, TariffLookup,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};
use tirta_billing_audit::{Actor, Cause};
use tirta_billing_domain::{BillRecord, BillingPeriod, Meter, TariffGroup};

/// In-memory store for generation tests.
///
/// `racing_inserts` simulates a concurrent batch winning the unique
/// constraint between the existence check and the insert.
/// `failing_reads` simulates a collaborator outage for specific meters.
pub struct FakeStore {
    pub meters: HashMap<i64, Meter>,
    pub tariffs: HashMap<i64, TariffGroup>,
    pub consumption: HashMap<i64, Decimal>,
    pub bills: Vec<BillRecord>,
    pub racing_inserts: HashSet<i64>,
    pub failing_reads: HashSet<i64>,
    next_bill_id: i64,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            meters: HashMap::new(),
            tariffs: HashMap::new(),
            consumption: HashMap::new(),
            bills: Vec::new(),
            racing_inserts: HashSet::new(),
            failing_reads: HashSet::new(),
            next_bill_id: 1,
        }
    }

    /// Registers an active meter with consumption data under tariff 1.
    pub fn add_standard_meter(&mut self, meter_id: i64, volume: Decimal) {
        let meter: Meter = Meter::with_id(
            meter_id,
            &format!("MTR-{meter_id:04}"),
            &format!("ACC-{meter_id:04}"),
            1,
            true,
            volume,
            volume,
        );
        self.meters.insert(meter_id, meter);
        self.consumption.insert(meter_id, volume);
    }

    pub fn bills_for(&self, meter_id: i64, period: BillingPeriod) -> Vec<&BillRecord> {
        self.bills
            .iter()
            .filter(|b| b.meter_id == meter_id && b.period == period)
            .collect()
    }
}

impl MeterDirectory for FakeStore {
    fn find_meter(&mut self, meter_id: i64) -> Result<Option<Meter>, StoreError> {
        Ok(self.meters.get(&meter_id).cloned())
    }
}

impl TariffLookup for FakeStore {
    fn tariff_group(&mut self, tariff_group_id: i64) -> Result<Option<TariffGroup>, StoreError> {
        Ok(self.tariffs.get(&tariff_group_id).cloned())
    }
}

impl ConsumptionReader for FakeStore {
    fn unbilled_consumption(&mut self, meter_id: i64) -> Result<Option<Decimal>, StoreError> {
        if self.failing_reads.contains(&meter_id) {
            return Err(StoreError::new(String::from("reader unavailable")));
        }
        Ok(self.consumption.get(&meter_id).copied())
    }
}

impl BillStore for FakeStore {
    fn bill_exists(&mut self, meter_id: i64, period: BillingPeriod) -> Result<bool, StoreError> {
        Ok(self
            .bills
            .iter()
            .any(|b| b.meter_id == meter_id && b.period == period))
    }

    fn insert_bill(&mut self, bill: &BillRecord) -> Result<InsertOutcome, StoreError> {
        if self.racing_inserts.contains(&bill.meter_id) {
            // A concurrent batch inserted first; the unique index wins.
            return Ok(InsertOutcome::AlreadyBilled);
        }
        if self
            .bills
            .iter()
            .any(|b| b.meter_id == bill.meter_id && b.period == bill.period)
        {
            return Ok(InsertOutcome::AlreadyBilled);
        }
        let bill_id: i64 = self.next_bill_id;
        self.next_bill_id += 1;
        let persisted: BillRecord = BillRecord::with_id(
            bill_id,
            bill.meter_id,
            bill.period,
            bill.consumption,
            bill.base_charge,
            bill.fixed_charge,
            bill.total_charge,
            bill.late_penalty,
            bill.status,
            bill.payment_date.clone(),
            bill.payment_method.clone(),
            bill.notes.clone(),
        );
        self.bills.push(persisted);
        Ok(InsertOutcome::Inserted(bill_id))
    }
}

/// A store seeded with the reference tariff group as id 1.
pub fn store_with_standard_tariff() -> FakeStore {
    let mut store: FakeStore = FakeStore::new();
    store.tariffs.insert(
        1,
        TariffGroup::with_id(1, "Rumah Tangga A", dec!(3000), dec!(5000), dec!(10000)),
    );
    store
}

pub fn march_2025() -> BillingPeriod {
    BillingPeriod::new(2025, 3).unwrap()
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("op-1"), String::from("operator"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("test request"))
}
