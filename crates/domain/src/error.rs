// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Tariff group name is empty or invalid.
    InvalidTariffName(String),
    /// A tariff rate or charge is negative.
    NegativeTariffRate {
        /// The tariff field that was negative.
        field: &'static str,
        /// The offending value.
        value: Decimal,
    },
    /// Consumption volume is negative.
    NegativeConsumption {
        /// The offending volume.
        volume: Decimal,
    },
    /// Billing period string is not a valid `YYYY-MM` value.
    InvalidPeriod(String),
    /// Meter number is empty or invalid.
    InvalidMeterNumber(String),
    /// Account number is empty or invalid.
    InvalidAccountNumber(String),
    /// The meter list for a generation batch is empty.
    EmptyMeterList,
    /// Payment status string is not a recognized status.
    InvalidPaymentStatus(String),
    /// Work order status string is not a recognized status.
    InvalidWorkOrderStatus(String),
    /// Work order source reference is empty or invalid.
    InvalidSourceReference(String),
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A status or approval change was attempted on a terminal entity.
    TerminalStateViolation {
        /// The entity kind ("bill" or "work order").
        entity: &'static str,
        /// The terminal status the entity is in.
        status: String,
    },
    /// Completion was attempted without admin approval being granted.
    ApprovalRequired {
        /// The work order status at the time of the attempt.
        status: String,
    },
    /// Approval was attempted while the order is not under admin review.
    InvalidApprovalState {
        /// The work order status at the time of the attempt.
        status: String,
    },
    /// Technician assignment was amended outside the permitted states.
    TechnicianAssignmentLocked {
        /// The work order status at the time of the attempt.
        status: String,
    },
    /// A held work order has no recorded prior state to resume to.
    NoHeldState,
    /// Late penalty amount must be positive.
    InvalidPenaltyAmount {
        /// The offending amount.
        amount: Decimal,
    },
    /// Late penalty was applied to a bill that is not awaiting payment.
    LatePenaltyNotApplicable {
        /// The bill status at the time of the attempt.
        status: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTariffName(msg) => write!(f, "Invalid tariff group name: {msg}"),
            Self::NegativeTariffRate { field, value } => {
                write!(f, "Tariff field '{field}' must not be negative, got {value}")
            }
            Self::NegativeConsumption { volume } => {
                write!(f, "Consumption volume must not be negative, got {volume}")
            }
            Self::InvalidPeriod(msg) => write!(f, "Invalid billing period: {msg}"),
            Self::InvalidMeterNumber(msg) => write!(f, "Invalid meter number: {msg}"),
            Self::InvalidAccountNumber(msg) => write!(f, "Invalid account number: {msg}"),
            Self::EmptyMeterList => {
                write!(f, "Generation requires at least one meter id")
            }
            Self::InvalidPaymentStatus(s) => write!(f, "Unknown payment status: {s}"),
            Self::InvalidWorkOrderStatus(s) => write!(f, "Unknown work order status: {s}"),
            Self::InvalidSourceReference(msg) => {
                write!(f, "Invalid work order source reference: {msg}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::TerminalStateViolation { entity, status } => {
                write!(
                    f,
                    "The {entity} is in terminal status '{status}' and cannot be changed"
                )
            }
            Self::ApprovalRequired { status } => {
                write!(
                    f,
                    "Work order in status '{status}' cannot be completed without admin approval"
                )
            }
            Self::InvalidApprovalState { status } => {
                write!(
                    f,
                    "Work order in status '{status}' is not awaiting admin review"
                )
            }
            Self::TechnicianAssignmentLocked { status } => {
                write!(
                    f,
                    "Technician assignment cannot be amended while the work order is '{status}'"
                )
            }
            Self::NoHeldState => {
                write!(f, "Held work order has no recorded prior state to resume")
            }
            Self::InvalidPenaltyAmount { amount } => {
                write!(f, "Late penalty must be positive, got {amount}")
            }
            Self::LatePenaltyNotApplicable { status } => {
                write!(
                    f,
                    "Late penalty can only be recorded on a pending bill, not '{status}'"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
