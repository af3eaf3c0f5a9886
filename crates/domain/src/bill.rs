// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bill records.
//!
//! A bill is a financial record: created once per `(meter, period)` by the
//! generation batch, mutated only through payment status transitions, and
//! never deleted.

use crate::error::DomainError;
use crate::payment_status::PaymentStatus;
use crate::period::BillingPeriod;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A generated bill for one meter and one billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the bill has not been persisted yet.
    bill_id: Option<i64>,
    /// The meter this bill belongs to.
    pub meter_id: i64,
    /// The billing period this bill covers.
    pub period: BillingPeriod,
    /// Consumption volume billed, in m³.
    pub consumption: Decimal,
    /// Tiered consumption charge.
    pub base_charge: Decimal,
    /// Fixed monthly charge.
    pub fixed_charge: Decimal,
    /// `base_charge + fixed_charge`. The late penalty is tracked
    /// separately and never folded into this field.
    pub total_charge: Decimal,
    /// Late penalty recorded by the overdue process, if any.
    pub late_penalty: Option<Decimal>,
    /// Current payment status.
    pub status: PaymentStatus,
    /// Payment timestamp (ISO 8601); stamped only by the transition to
    /// `Settlement`.
    pub payment_date: Option<String>,
    /// Payment method reported by the payment provider or operator.
    pub payment_method: Option<String>,
    /// Free-form operator notes.
    pub notes: Option<String>,
}

impl BillRecord {
    /// Creates a new `BillRecord` in `Pending` status without a persisted ID.
    #[must_use]
    pub const fn new(
        meter_id: i64,
        period: BillingPeriod,
        consumption: Decimal,
        base_charge: Decimal,
        fixed_charge: Decimal,
        total_charge: Decimal,
    ) -> Self {
        Self {
            bill_id: None,
            meter_id,
            period,
            consumption,
            base_charge,
            fixed_charge,
            total_charge,
            late_penalty: None,
            status: PaymentStatus::Pending,
            payment_date: None,
            payment_method: None,
            notes: None,
        }
    }

    /// Creates a `BillRecord` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        bill_id: i64,
        meter_id: i64,
        period: BillingPeriod,
        consumption: Decimal,
        base_charge: Decimal,
        fixed_charge: Decimal,
        total_charge: Decimal,
        late_penalty: Option<Decimal>,
        status: PaymentStatus,
        payment_date: Option<String>,
        payment_method: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            bill_id: Some(bill_id),
            meter_id,
            period,
            consumption,
            base_charge,
            fixed_charge,
            total_charge,
            late_penalty,
            status,
            payment_date,
            payment_method,
            notes,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn bill_id(&self) -> Option<i64> {
        self.bill_id
    }

    /// Validates that a late penalty may be recorded on this bill.
    ///
    /// The overdue decision itself belongs to an external scheduler; this
    /// only checks that the bill is still awaiting payment and the amount
    /// is positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the bill is not
    /// in `Pending` status.
    pub fn validate_late_penalty(&self, amount: Decimal) -> Result<(), DomainError> {
        if amount <= Decimal::ZERO {
            return Err(DomainError::InvalidPenaltyAmount { amount });
        }
        if self.status != PaymentStatus::Pending {
            return Err(DomainError::LatePenaltyNotApplicable {
                status: self.status.as_str().to_string(),
            });
        }
        Ok(())
    }
}
