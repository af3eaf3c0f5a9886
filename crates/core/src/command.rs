// Copyright (C) 2026 Tirta Data Systems
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use tirta_billing_domain::{PaymentStatus, WorkOrderStatus};

/// A command represents operator or collaborator intent as data only.
///
/// Commands are the only way to request a bill state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillCommand {
    /// Apply a payment status transition.
    ///
    /// Used both by payment-provider callbacks and by manual
    /// administrative settlement; the engine does not distinguish the
    /// trigger source. Callers confirming payment out-of-band should say
    /// so in `notes`.
    ApplyPaymentStatus {
        /// The requested status.
        new_status: PaymentStatus,
        /// Payment method, recorded on settlement if provided.
        payment_method: Option<String>,
        /// Free-form note appended to the bill.
        notes: Option<String>,
    },
    /// Record a late penalty decided by the external overdue process.
    RecordLatePenalty {
        /// The penalty amount (must be positive).
        amount: Decimal,
    },
}

/// A command requesting a work order change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkOrderCommand {
    /// Advance the order's lifecycle status.
    TransitionStatus {
        /// The requested status.
        new_status: WorkOrderStatus,
        /// Free-form note appended to the order.
        notes: Option<String>,
    },
    /// Record an admin approval decision for an order under review.
    ///
    /// Rejection returns the order to in-progress for rework; it does not
    /// cancel the order.
    Approve {
        /// The decision.
        approved: bool,
        /// Free-form note appended to the order.
        notes: Option<String>,
    },
    /// Replace the assigned technician team.
    AmendTechnicians {
        /// The new technician list.
        technicians: Vec<String>,
    },
}
