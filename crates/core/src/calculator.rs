// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tiered bill computation.
//!
//! The calculator is a pure function: identical input always produces
//! identical output, and nothing here touches persistence. That property
//! is what makes batch generation safe to retry and to parallelize.

use rust_decimal::Decimal;
use tirta_billing_domain::{DomainError, TariffGroup, validate_consumption};

/// The consumption threshold separating the two tariff rates, in m³.
///
/// System-wide, not configurable per tariff group in the current model.
pub const CONSUMPTION_THRESHOLD: Decimal = Decimal::TEN;

/// The computed charges for one bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillAmounts {
    /// Tiered consumption charge.
    pub base_charge: Decimal,
    /// Fixed monthly charge, applied once per bill.
    pub fixed_charge: Decimal,
    /// `base_charge + fixed_charge`.
    pub total_charge: Decimal,
}

/// Computes the charges for a consumption volume under a tariff group.
///
/// The tariff is progressive: the first [`CONSUMPTION_THRESHOLD`] m³ are
/// always billed at the lower rate, and only the excess above the
/// threshold is billed at the upper rate. The boundary is inclusive on
/// the lower tier. The fixed monthly charge applies regardless of
/// consumption, including zero. Late penalties are added later by the
/// overdue process, never here.
///
/// # Arguments
///
/// * `consumption` - The consumption volume in m³ (must be non-negative)
/// * `tariff` - The tariff group the meter is billed under
///
/// # Errors
///
/// Returns an error if the consumption is negative or the tariff group
/// fails validation.
pub fn compute_bill(
    consumption: Decimal,
    tariff: &TariffGroup,
) -> Result<BillAmounts, DomainError> {
    validate_consumption(consumption)?;
    tariff.validate()?;

    let base_charge: Decimal = if consumption <= CONSUMPTION_THRESHOLD {
        consumption * tariff.rate_below_threshold
    } else {
        CONSUMPTION_THRESHOLD * tariff.rate_below_threshold
            + (consumption - CONSUMPTION_THRESHOLD) * tariff.rate_above_threshold
    };

    let fixed_charge: Decimal = tariff.fixed_monthly_charge;

    Ok(BillAmounts {
        base_charge,
        fixed_charge,
        total_charge: base_charge + fixed_charge,
    })
}
