// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Metered connections.
//!
//! A meter belongs to exactly one customer connection (the customer
//! directory is an external collaborator). The engine reads the meter's
//! unbilled consumption at generation time and records it on the bill;
//! zeroing the counter afterwards is a collaborator write.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A metered water connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the meter has not been persisted yet.
    meter_id: Option<i64>,
    /// The physical meter number (unique, non-empty, trimmed).
    meter_number: String,
    /// The customer account number (unique, non-empty, trimmed).
    account_number: String,
    /// The tariff group this meter is billed under.
    pub tariff_group_id: i64,
    /// Whether the meter participates in billing.
    pub is_active: bool,
    /// Consumption accumulated since the last generated bill, in m³.
    pub unbilled_consumption: Decimal,
    /// Lifetime consumption, in m³.
    pub total_consumption: Decimal,
}

impl Meter {
    /// Creates a new `Meter` without a persisted ID.
    ///
    /// New meters start active with zero consumption counters.
    #[must_use]
    pub fn new(meter_number: &str, account_number: &str, tariff_group_id: i64) -> Self {
        Self {
            meter_id: None,
            meter_number: meter_number.trim().to_string(),
            account_number: account_number.trim().to_string(),
            tariff_group_id,
            is_active: true,
            unbilled_consumption: Decimal::ZERO,
            total_consumption: Decimal::ZERO,
        }
    }

    /// Creates a `Meter` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        meter_id: i64,
        meter_number: &str,
        account_number: &str,
        tariff_group_id: i64,
        is_active: bool,
        unbilled_consumption: Decimal,
        total_consumption: Decimal,
    ) -> Self {
        Self {
            meter_id: Some(meter_id),
            meter_number: meter_number.trim().to_string(),
            account_number: account_number.trim().to_string(),
            tariff_group_id,
            is_active,
            unbilled_consumption,
            total_consumption,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn meter_id(&self) -> Option<i64> {
        self.meter_id
    }

    /// Returns the physical meter number.
    #[must_use]
    pub fn meter_number(&self) -> &str {
        &self.meter_number
    }

    /// Returns the customer account number.
    #[must_use]
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Validates the meter fields.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier is empty or a consumption
    /// counter is negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.meter_number.is_empty() {
            return Err(DomainError::InvalidMeterNumber(String::from(
                "meter number must not be empty",
            )));
        }
        if self.account_number.is_empty() {
            return Err(DomainError::InvalidAccountNumber(String::from(
                "account number must not be empty",
            )));
        }
        if self.unbilled_consumption < Decimal::ZERO {
            return Err(DomainError::NegativeConsumption {
                volume: self.unbilled_consumption,
            });
        }
        if self.total_consumption < Decimal::ZERO {
            return Err(DomainError::NegativeConsumption {
                volume: self.total_consumption,
            });
        }
        Ok(())
    }
}
