// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bill payment status tracking and transition logic.
//!
//! This module defines payment status states and valid transitions.
//! The legal transition set is encoded in a single table so it can be
//! inspected and tested as one artifact. The engine never advances a
//! status on its own; expiry is driven by an external scheduler that
//! requests the transition.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Payment status states for a bill record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Bill created, awaiting payment.
    Pending,
    /// Bill fully paid.
    Settlement,
    /// Bill cancelled before payment.
    Cancel,
    /// Due date passed without payment.
    Expire,
    /// Settled amount returned to the customer.
    Refund,
    /// Settled amount reclaimed by the payment provider.
    Chargeback,
    /// Payment flagged as fraudulent.
    Fraud,
}

/// The complete set of legal payment status transitions.
///
/// `Cancel`, `Expire`, and `Fraud` are terminal failures; `Refund` and
/// `Chargeback` are terminal post-settlement reversals. Nothing re-enters
/// `Pending`.
const ALLOWED_TRANSITIONS: &[(PaymentStatus, PaymentStatus)] = &[
    (PaymentStatus::Pending, PaymentStatus::Settlement),
    (PaymentStatus::Pending, PaymentStatus::Cancel),
    (PaymentStatus::Pending, PaymentStatus::Expire),
    (PaymentStatus::Pending, PaymentStatus::Fraud),
    (PaymentStatus::Settlement, PaymentStatus::Refund),
    (PaymentStatus::Settlement, PaymentStatus::Chargeback),
];

impl PaymentStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Settlement => "settlement",
            Self::Cancel => "cancel",
            Self::Expire => "expire",
            Self::Refund => "refund",
            Self::Chargeback => "chargeback",
            Self::Fraud => "fraud",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "settlement" => Ok(Self::Settlement),
            "cancel" => Ok(Self::Cancel),
            "expire" => Ok(Self::Expire),
            "refund" => Ok(Self::Refund),
            "chargeback" => Ok(Self::Chargeback),
            "fraud" => Ok(Self::Fraud),
            _ => Err(DomainError::InvalidPaymentStatus(s.to_string())),
        }
    }

    /// Returns true if no transition leads out of this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !ALLOWED_TRANSITIONS.iter().any(|(from, _)| from == self)
    }

    /// Returns true if this status records a completed payment.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settlement)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the pair is not in
    /// the allowed-transition table.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if ALLOWED_TRANSITIONS.contains(&(*self, new_status)) {
            return Ok(());
        }

        let reason: &str = if self.is_terminal() {
            "no transitions are permitted out of a terminal payment status"
        } else if new_status == Self::Pending {
            "a bill never re-enters pending"
        } else {
            "transition not permitted by the payment lifecycle rules"
        };

        Err(DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: new_status.as_str().to_string(),
            reason: reason.to_string(),
        })
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
