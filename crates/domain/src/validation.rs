// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-cutting input validation helpers.

use crate::error::DomainError;
use rust_decimal::Decimal;

/// Validates a consumption volume.
///
/// Absence of consumption data is a collaborator failure and is handled
/// by the generation batch; this only rejects negative volumes.
///
/// # Errors
///
/// Returns `DomainError::NegativeConsumption` if the volume is negative.
pub fn validate_consumption(volume: Decimal) -> Result<(), DomainError> {
    if volume < Decimal::ZERO {
        return Err(DomainError::NegativeConsumption { volume });
    }
    Ok(())
}

/// Validates the meter id list of a generation request.
///
/// # Errors
///
/// Returns `DomainError::EmptyMeterList` if the list is empty.
pub fn validate_meter_list(meter_ids: &[i64]) -> Result<(), DomainError> {
    if meter_ids.is_empty() {
        return Err(DomainError::EmptyMeterList);
    }
    Ok(())
}
