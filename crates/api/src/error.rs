// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::csv_preview::CsvImportError;
use tirta_billing::CoreError;
use tirta_billing_domain::DomainError;
use tirta_billing_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The entity was modified by a concurrent request; re-read and retry.
    Conflict {
        /// A description of the conflict.
        message: String,
    },
    /// The uploaded CSV could not be parsed.
    InvalidCsvFormat {
        /// Why the CSV was rejected.
        reason: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV format: {reason}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CsvImportError> for ApiError {
    fn from(err: CsvImportError) -> Self {
        Self::InvalidCsvFormat {
            reason: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTariffName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::NegativeTariffRate { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {value}"),
        },
        DomainError::NegativeConsumption { volume } => ApiError::InvalidInput {
            field: String::from("consumption"),
            message: format!("must not be negative, got {volume}"),
        },
        DomainError::InvalidPeriod(msg) => ApiError::InvalidInput {
            field: String::from("period"),
            message: msg,
        },
        DomainError::InvalidMeterNumber(msg) => ApiError::InvalidInput {
            field: String::from("meter_number"),
            message: msg,
        },
        DomainError::InvalidAccountNumber(msg) => ApiError::InvalidInput {
            field: String::from("account_number"),
            message: msg,
        },
        DomainError::EmptyMeterList => ApiError::InvalidInput {
            field: String::from("meter_ids"),
            message: String::from("generation requires at least one meter id"),
        },
        DomainError::InvalidPaymentStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("unknown payment status: {s}"),
        },
        DomainError::InvalidWorkOrderStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("unknown work order status: {s}"),
        },
        DomainError::InvalidSourceReference(msg) => ApiError::InvalidInput {
            field: String::from("source_ref"),
            message: msg,
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_transition"),
                message: format!("cannot transition from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::TerminalStateViolation { entity, status } => ApiError::DomainRuleViolation {
            rule: String::from("terminal_state"),
            message: format!("the {entity} is in terminal status '{status}'"),
        },
        DomainError::ApprovalRequired { status } => ApiError::DomainRuleViolation {
            rule: String::from("approval_gate"),
            message: format!(
                "work order in status '{status}' cannot be completed without admin approval"
            ),
        },
        DomainError::InvalidApprovalState { status } => ApiError::DomainRuleViolation {
            rule: String::from("approval_gate"),
            message: format!("work order in status '{status}' is not awaiting admin review"),
        },
        DomainError::TechnicianAssignmentLocked { status } => ApiError::DomainRuleViolation {
            rule: String::from("technician_assignment"),
            message: format!("assignment cannot be amended while the work order is '{status}'"),
        },
        DomainError::NoHeldState => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: String::from("held work order has no recorded prior state to resume"),
        },
        DomainError::InvalidPenaltyAmount { amount } => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("late penalty must be positive, got {amount}"),
        },
        DomainError::LatePenaltyNotApplicable { status } => ApiError::DomainRuleViolation {
            rule: String::from("late_penalty"),
            message: format!("late penalty can only be recorded on a pending bill, not '{status}'"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `DuplicateBill` never reaches this path from the generation batch (it
/// is classified as a skip there); a duplicate surfacing elsewhere is a
/// genuine rule violation.
#[must_use]
pub fn translate_persistence_error(err: &PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg.clone(),
        },
        PersistenceError::ConcurrentModification { entity, id } => ApiError::Conflict {
            message: format!("the {entity} {id} was modified by a concurrent request"),
        },
        PersistenceError::DuplicateBill { meter_id, period } => ApiError::DomainRuleViolation {
            rule: String::from("one_bill_per_meter_per_period"),
            message: format!("meter {meter_id} is already billed for {period}"),
        },
        PersistenceError::UniqueViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("unique_constraint"),
            message: msg.clone(),
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
