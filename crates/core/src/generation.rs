// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly bill generation.
//!
//! The batch classifies every requested meter id into exactly one of three
//! disjoint buckets: succeeded, skipped (already billed), or failed with a
//! reason. A single meter's failure never aborts the batch.
//!
//! Idempotency rests on the persistence layer's unique index over
//! `(meter, period)`: the fast-path existence check avoids pointless
//! computation on re-runs, and the constraint catches the race two
//! concurrent batch invocations would otherwise lose, converting the
//! duplicate insert into a skip. The constraint is the authority, not any
//! in-process lock.

use crate::calculator::{BillAmounts, compute_bill};
use crate::error::CoreError;
use rust_decimal::Decimal;
use tirta_billing_domain::{
    BillRecord, BillingPeriod, DomainError, Meter, TariffGroup, validate_meter_list,
};

/// Error reported by a generation collaborator (directory, reader, store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// Description of the failure.
    pub message: String,
}

impl StoreError {
    /// Creates a new `StoreError`.
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self { message }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Looks up meters by id.
pub trait MeterDirectory {
    /// Returns the meter, or `None` if no such meter exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn find_meter(&mut self, meter_id: i64) -> Result<Option<Meter>, StoreError>;
}

/// Resolves tariff groups by id.
pub trait TariffLookup {
    /// Returns the tariff group, or `None` if no such group exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn tariff_group(&mut self, tariff_group_id: i64) -> Result<Option<TariffGroup>, StoreError>;
}

/// Supplies per-meter unbilled consumption as of generation time.
pub trait ConsumptionReader {
    /// Returns the unbilled volume, or `None` if no reading data exists.
    ///
    /// Absence of data is a per-meter failure, never zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the read itself fails.
    fn unbilled_consumption(&mut self, meter_id: i64) -> Result<Option<Decimal>, StoreError>;
}

/// The outcome of a constraint-backed bill insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new bill row was created with this id.
    Inserted(i64),
    /// The unique index over `(meter, period)` already holds a row;
    /// nothing was written.
    AlreadyBilled,
}

/// Stores bill records under the `(meter, period)` unique constraint.
pub trait BillStore {
    /// Returns whether a bill already exists for `(meter_id, period)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn bill_exists(&mut self, meter_id: i64, period: BillingPeriod) -> Result<bool, StoreError>;

    /// Inserts a bill, reporting a unique-constraint hit as
    /// [`InsertOutcome::AlreadyBilled`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails for any other reason.
    fn insert_bill(&mut self, bill: &BillRecord) -> Result<InsertOutcome, StoreError>;
}

/// Why a meter could not be billed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailureReason {
    /// No meter exists with the requested id.
    MeterNotFound,
    /// The meter exists but is inactive.
    MeterInactive,
    /// The meter references a tariff group that does not exist.
    TariffGroupNotFound,
    /// The consumption reader has no data for the meter.
    MissingConsumption,
    /// The calculator rejected the inputs.
    Calculator(DomainError),
    /// A collaborator failed.
    Store(StoreError),
}

impl std::fmt::Display for GenerationFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeterNotFound => write!(f, "meter not found"),
            Self::MeterInactive => write!(f, "meter is inactive"),
            Self::TariffGroupNotFound => write!(f, "tariff group not found"),
            Self::MissingConsumption => write!(f, "no consumption data"),
            Self::Calculator(err) => write!(f, "calculation failed: {err}"),
            Self::Store(err) => write!(f, "storage failed: {err}"),
        }
    }
}

/// One meter's failure inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// The meter id that failed.
    pub meter_id: i64,
    /// Why it failed.
    pub reason: GenerationFailureReason,
}

/// The aggregate result of one generation batch.
///
/// Every requested meter id lands in exactly one bucket:
/// `succeeded + skipped + failures.len() == requested`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// The billing period the batch ran for.
    pub period: BillingPeriod,
    /// Bills created by this run.
    pub succeeded: usize,
    /// Meters already billed for the period.
    pub skipped: usize,
    /// Per-meter failures, in input order.
    pub failures: Vec<GenerationFailure>,
}

impl BatchOutcome {
    /// Returns the total number of classified meters.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failures.len()
    }
}

/// How one meter was classified.
enum MeterResult {
    Succeeded,
    Skipped,
    Failed(GenerationFailureReason),
}

/// Runs one meter through lookup, computation, and insert.
fn generate_for_meter<S>(store: &mut S, period: BillingPeriod, meter_id: i64) -> MeterResult
where
    S: MeterDirectory + TariffLookup + ConsumptionReader + BillStore,
{
    let meter: Meter = match store.find_meter(meter_id) {
        Ok(Some(meter)) => meter,
        Ok(None) => return MeterResult::Failed(GenerationFailureReason::MeterNotFound),
        Err(e) => return MeterResult::Failed(GenerationFailureReason::Store(e)),
    };
    if !meter.is_active {
        return MeterResult::Failed(GenerationFailureReason::MeterInactive);
    }

    // Fast path for re-runs; the unique index still backs the insert below.
    match store.bill_exists(meter_id, period) {
        Ok(true) => return MeterResult::Skipped,
        Ok(false) => {}
        Err(e) => return MeterResult::Failed(GenerationFailureReason::Store(e)),
    }

    let consumption: Decimal = match store.unbilled_consumption(meter_id) {
        Ok(Some(volume)) => volume,
        Ok(None) => return MeterResult::Failed(GenerationFailureReason::MissingConsumption),
        Err(e) => return MeterResult::Failed(GenerationFailureReason::Store(e)),
    };

    let tariff: TariffGroup = match store.tariff_group(meter.tariff_group_id) {
        Ok(Some(tariff)) => tariff,
        Ok(None) => return MeterResult::Failed(GenerationFailureReason::TariffGroupNotFound),
        Err(e) => return MeterResult::Failed(GenerationFailureReason::Store(e)),
    };

    let amounts: BillAmounts = match compute_bill(consumption, &tariff) {
        Ok(amounts) => amounts,
        Err(e) => return MeterResult::Failed(GenerationFailureReason::Calculator(e)),
    };

    let bill: BillRecord = BillRecord::new(
        meter_id,
        period,
        consumption,
        amounts.base_charge,
        amounts.fixed_charge,
        amounts.total_charge,
    );

    match store.insert_bill(&bill) {
        Ok(InsertOutcome::Inserted(_)) => MeterResult::Succeeded,
        // Lost the race against a concurrent batch; the constraint makes
        // this a benign skip.
        Ok(InsertOutcome::AlreadyBilled) => MeterResult::Skipped,
        Err(e) => MeterResult::Failed(GenerationFailureReason::Store(e)),
    }
}

/// Generates bills for a period over a list of meter ids.
///
/// Meters are classified independently and set-wise; no ordering
/// guarantee exists between them. Re-running the batch for an
/// already-billed set creates no duplicates and alters no existing
/// records.
///
/// # Arguments
///
/// * `store` - The persistence collaborator
/// * `period` - The billing period to generate for
/// * `meter_ids` - The meters to bill (each occurrence is classified)
///
/// # Errors
///
/// Returns an error only if the request itself is invalid (empty meter
/// list); per-meter problems land in the outcome's failure bucket.
pub fn generate_bills<S>(
    store: &mut S,
    period: BillingPeriod,
    meter_ids: &[i64],
) -> Result<BatchOutcome, CoreError>
where
    S: MeterDirectory + TariffLookup + ConsumptionReader + BillStore,
{
    validate_meter_list(meter_ids)?;

    let mut outcome: BatchOutcome = BatchOutcome {
        period,
        succeeded: 0,
        skipped: 0,
        failures: Vec::new(),
    };

    for &meter_id in meter_ids {
        match generate_for_meter(store, period, meter_id) {
            MeterResult::Succeeded => outcome.succeeded += 1,
            MeterResult::Skipped => outcome.skipped += 1,
            MeterResult::Failed(reason) => {
                outcome.failures.push(GenerationFailure { meter_id, reason });
            }
        }
    }

    Ok(outcome)
}
