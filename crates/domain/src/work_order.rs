// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field work orders.
//!
//! A work order is created when a customer report is triaged into
//! actionable work or a new-connection survey completes. It is advanced by
//! technicians, gated by admin approval before completion, and never
//! deleted.

use crate::error::DomainError;
use crate::work_order_status::WorkOrderStatus;
use serde::{Deserialize, Serialize};

/// A unit of field technician work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the order has not been persisted yet.
    work_order_id: Option<i64>,
    /// Reference to the customer report or survey/installation request
    /// this order was created from.
    source_ref: String,
    /// Assigned technician team (zero or more).
    pub technicians: Vec<String>,
    /// Current lifecycle status.
    pub status: WorkOrderStatus,
    /// The non-terminal status a held order resumes to.
    /// `Some` exactly while the order is in `Ditunda`.
    pub held_from: Option<WorkOrderStatus>,
    /// Admin approval flag: unset until review, then granted or rejected.
    pub admin_approved: Option<bool>,
    /// Free-form operator notes.
    pub notes: Option<String>,
    /// Linked cost estimate reference, if any.
    pub cost_estimate_ref: Option<String>,
    /// Linked completion evidence reference, if any.
    pub completion_evidence_ref: Option<String>,
}

impl WorkOrder {
    /// Creates a new `WorkOrder` in `Ditugaskan` status without a
    /// persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSourceReference` if the source
    /// reference is empty.
    pub fn new(source_ref: &str, technicians: Vec<String>) -> Result<Self, DomainError> {
        let source_ref: &str = source_ref.trim();
        if source_ref.is_empty() {
            return Err(DomainError::InvalidSourceReference(String::from(
                "source reference must not be empty",
            )));
        }
        Ok(Self {
            work_order_id: None,
            source_ref: source_ref.to_string(),
            technicians,
            status: WorkOrderStatus::Ditugaskan,
            held_from: None,
            admin_approved: None,
            notes: None,
            cost_estimate_ref: None,
            completion_evidence_ref: None,
        })
    }

    /// Creates a `WorkOrder` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        work_order_id: i64,
        source_ref: &str,
        technicians: Vec<String>,
        status: WorkOrderStatus,
        held_from: Option<WorkOrderStatus>,
        admin_approved: Option<bool>,
        notes: Option<String>,
        cost_estimate_ref: Option<String>,
        completion_evidence_ref: Option<String>,
    ) -> Self {
        Self {
            work_order_id: Some(work_order_id),
            source_ref: source_ref.to_string(),
            technicians,
            status,
            held_from,
            admin_approved,
            notes,
            cost_estimate_ref,
            completion_evidence_ref,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn work_order_id(&self) -> Option<i64> {
        self.work_order_id
    }

    /// Returns the source reference.
    #[must_use]
    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    /// Validates a status transition against the full lifecycle rules.
    ///
    /// Hold and cancellation are permitted from any non-terminal state; a
    /// held order resumes only to the state it was held from; completion
    /// requires granted admin approval.
    ///
    /// # Errors
    ///
    /// Returns the specific violation:
    /// - `TerminalStateViolation` if the order is in `Selesai` or
    ///   `Dibatalkan`
    /// - `ApprovalRequired` if completion is attempted without
    ///   `admin_approved == Some(true)`
    /// - `NoHeldState` if a held order has no recorded prior state
    /// - `InvalidStatusTransition` for every other illegal pair
    pub fn validate_transition(&self, new_status: WorkOrderStatus) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStateViolation {
                entity: "work order",
                status: self.status.as_str().to_string(),
            });
        }

        // Cancellation is reachable from any non-terminal state.
        if new_status == WorkOrderStatus::Dibatalkan {
            return Ok(());
        }

        // Hold is reachable from any non-terminal state except itself.
        if new_status == WorkOrderStatus::Ditunda {
            if self.status == WorkOrderStatus::Ditunda {
                return Err(DomainError::InvalidStatusTransition {
                    from: self.status.as_str().to_string(),
                    to: new_status.as_str().to_string(),
                    reason: String::from("the work order is already on hold"),
                });
            }
            return Ok(());
        }

        // A held order resumes only to the state it was held from.
        if self.status == WorkOrderStatus::Ditunda {
            let held_from: WorkOrderStatus = self.held_from.ok_or(DomainError::NoHeldState)?;
            if new_status == held_from {
                return Ok(());
            }
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: format!("a held work order resumes only to '{held_from}'"),
            });
        }

        if !self.status.is_forward_transition(new_status) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: String::from("transition not permitted by the work order lifecycle rules"),
            });
        }

        // Completion is gated on granted admin approval.
        if new_status == WorkOrderStatus::Selesai && self.admin_approved != Some(true) {
            return Err(DomainError::ApprovalRequired {
                status: self.status.as_str().to_string(),
            });
        }

        Ok(())
    }

    /// Validates an admin approval decision.
    ///
    /// # Errors
    ///
    /// Returns `TerminalStateViolation` if the order is terminal, or
    /// `InvalidApprovalState` if it is not in `DitinjauAdmin`.
    pub fn validate_approval(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStateViolation {
                entity: "work order",
                status: self.status.as_str().to_string(),
            });
        }
        if self.status != WorkOrderStatus::DitinjauAdmin {
            return Err(DomainError::InvalidApprovalState {
                status: self.status.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Validates a technician assignment amendment.
    ///
    /// Assignment may be amended while the order is in `Ditugaskan` or
    /// `SedangDikerjakan` only.
    ///
    /// # Errors
    ///
    /// Returns `TerminalStateViolation` for terminal orders and
    /// `TechnicianAssignmentLocked` for `Ditunda`/`DitinjauAdmin`.
    pub fn validate_technician_amendment(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::TerminalStateViolation {
                entity: "work order",
                status: self.status.as_str().to_string(),
            });
        }
        match self.status {
            WorkOrderStatus::Ditugaskan | WorkOrderStatus::SedangDikerjakan => Ok(()),
            _ => Err(DomainError::TechnicianAssignmentLocked {
                status: self.status.as_str().to_string(),
            }),
        }
    }
}
