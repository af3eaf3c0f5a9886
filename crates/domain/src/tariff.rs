// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer-group tariff definitions.
//!
//! A tariff group carries the two per-m³ rates of the progressive tariff
//! and the fixed monthly charge. The consumption threshold separating the
//! two rates is system-wide, not stored per group; it lives as a named
//! constant in the calculator.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer-group tariff definition.
///
/// Referenced by zero or more meters. Deleting a group that active meters
/// still reference is a caller-enforced precondition, not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffGroup {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the group has not been persisted yet.
    tariff_group_id: Option<i64>,
    /// The group name (unique, non-empty, trimmed).
    name: String,
    /// Rate per m³ for consumption at or below the threshold.
    pub rate_below_threshold: Decimal,
    /// Rate per m³ for consumption above the threshold.
    pub rate_above_threshold: Decimal,
    /// Fixed charge applied once per bill regardless of consumption.
    pub fixed_monthly_charge: Decimal,
}

impl TariffGroup {
    /// Creates a new `TariffGroup` without a persisted ID.
    ///
    /// The name is trimmed; rates are taken as given and validated by
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn new(
        name: &str,
        rate_below_threshold: Decimal,
        rate_above_threshold: Decimal,
        fixed_monthly_charge: Decimal,
    ) -> Self {
        Self {
            tariff_group_id: None,
            name: name.trim().to_string(),
            rate_below_threshold,
            rate_above_threshold,
            fixed_monthly_charge,
        }
    }

    /// Creates a `TariffGroup` with an existing persisted ID.
    #[must_use]
    pub fn with_id(
        tariff_group_id: i64,
        name: &str,
        rate_below_threshold: Decimal,
        rate_above_threshold: Decimal,
        fixed_monthly_charge: Decimal,
    ) -> Self {
        Self {
            tariff_group_id: Some(tariff_group_id),
            name: name.trim().to_string(),
            rate_below_threshold,
            rate_above_threshold,
            fixed_monthly_charge,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn tariff_group_id(&self) -> Option<i64> {
        self.tariff_group_id
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validates the tariff group fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or any rate is negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidTariffName(String::from(
                "name must not be empty",
            )));
        }
        if self.rate_below_threshold < Decimal::ZERO {
            return Err(DomainError::NegativeTariffRate {
                field: "rate_below_threshold",
                value: self.rate_below_threshold,
            });
        }
        if self.rate_above_threshold < Decimal::ZERO {
            return Err(DomainError::NegativeTariffRate {
                field: "rate_above_threshold",
                value: self.rate_above_threshold,
            });
        }
        if self.fixed_monthly_charge < Decimal::ZERO {
            return Err(DomainError::NegativeTariffRate {
                field: "fixed_monthly_charge",
                value: self.fixed_monthly_charge,
            });
        }
        Ok(())
    }
}
