// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field work-order status states.
//!
//! The status vocabulary is the operator-facing Indonesian one. Context-free
//! forward transitions live in a single table; the hold/resume and approval
//! rules need entity context and are enforced by
//! [`WorkOrder`](crate::WorkOrder).

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Work order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    /// Assigned to a technician team; field work not yet started.
    Ditugaskan,
    /// Field work in progress.
    SedangDikerjakan,
    /// On hold; resumes to the state it was held from.
    Ditunda,
    /// Completed work awaiting admin review.
    DitinjauAdmin,
    /// Done (terminal).
    Selesai,
    /// Cancelled (terminal).
    Dibatalkan,
}

/// Context-free forward transitions.
///
/// Hold (`-> Ditunda`), resume (`Ditunda -> held-from state`), and
/// cancellation (`-> Dibatalkan`) are handled separately because they
/// apply from any non-terminal state or depend on entity context.
const FORWARD_TRANSITIONS: &[(WorkOrderStatus, WorkOrderStatus)] = &[
    (
        WorkOrderStatus::Ditugaskan,
        WorkOrderStatus::SedangDikerjakan,
    ),
    (
        WorkOrderStatus::SedangDikerjakan,
        WorkOrderStatus::DitinjauAdmin,
    ),
    (WorkOrderStatus::SedangDikerjakan, WorkOrderStatus::Selesai),
    (WorkOrderStatus::DitinjauAdmin, WorkOrderStatus::Selesai),
    (
        WorkOrderStatus::DitinjauAdmin,
        WorkOrderStatus::SedangDikerjakan,
    ),
];

impl WorkOrderStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ditugaskan => "ditugaskan",
            Self::SedangDikerjakan => "sedang_dikerjakan",
            Self::Ditunda => "ditunda",
            Self::DitinjauAdmin => "ditinjau_admin",
            Self::Selesai => "selesai",
            Self::Dibatalkan => "dibatalkan",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWorkOrderStatus` if the string is not
    /// a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "ditugaskan" => Ok(Self::Ditugaskan),
            "sedang_dikerjakan" => Ok(Self::SedangDikerjakan),
            "ditunda" => Ok(Self::Ditunda),
            "ditinjau_admin" => Ok(Self::DitinjauAdmin),
            "selesai" => Ok(Self::Selesai),
            "dibatalkan" => Ok(Self::Dibatalkan),
            _ => Err(DomainError::InvalidWorkOrderStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Selesai | Self::Dibatalkan)
    }

    /// Returns true if `(self, target)` is a context-free forward transition.
    ///
    /// Completion transitions listed here are additionally gated on admin
    /// approval by the work order entity.
    #[must_use]
    pub fn is_forward_transition(&self, target: Self) -> bool {
        FORWARD_TRANSITIONS.contains(&(*self, target))
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
