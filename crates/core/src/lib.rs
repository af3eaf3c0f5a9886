// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod calculator;
mod command;
mod error;
mod generation;

#[cfg(test)]
mod tests;

pub use apply::{BillTransition, WorkOrderTransition, apply_bill, apply_work_order};
pub use calculator::{BillAmounts, CONSUMPTION_THRESHOLD, compute_bill};
pub use command::{BillCommand, WorkOrderCommand};
pub use error::CoreError;
pub use generation::{
    BatchOutcome, BillStore, ConsumptionReader, GenerationFailure, GenerationFailureReason,
    InsertOutcome, MeterDirectory, StoreError, TariffLookup, generate_bills,
};
