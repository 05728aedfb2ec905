// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ApplicationStatus;

/// Errors that can occur during domain validation and balance accounting.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A date or time range is inverted or empty.
    InvalidRange {
        /// Description of the invalid range.
        reason: String,
    },
    /// The referenced leave type does not exist.
    UnknownLeaveType(i64),
    /// The leave type cannot be booked for future dates.
    AdvanceBookingDisallowed {
        /// The leave type name.
        leave_type: String,
    },
    /// The leave type cannot be booked for past dates.
    RetrospectiveBookingDisallowed {
        /// The leave type name.
        leave_type: String,
    },
    /// The start date is further ahead than the leave type allows.
    AdvanceLimitExceeded {
        /// The maximum number of days ahead a booking may start.
        max_advance_days: i64,
    },
    /// A partial-day time range was supplied but the leave type forbids it.
    PartialDaysDisallowed {
        /// The leave type name.
        leave_type: String,
    },
    /// A partial-day request is shorter than the configured minimum.
    BelowMinimumHours {
        /// The minimum hours required for a partial-day booking.
        minimum_hours: f64,
        /// The hours actually requested.
        requested_hours: f64,
    },
    /// The leave type requires supporting evidence and none was attached.
    DocumentRequired {
        /// The leave type name.
        leave_type: String,
    },
    /// The requested duration exceeds the available balance.
    InsufficientBalance {
        /// Days (or hours, for TIL) requested.
        requested: f64,
        /// Days (or hours, for TIL) available.
        available: f64,
    },
    /// User not found.
    UserNotFound(i64),
    /// Leave pool not found.
    PoolNotFound(i64),
    /// The actor's role does not permit the operation.
    PermissionDenied {
        /// The operation that was attempted.
        action: String,
        /// The role required to perform it.
        required: String,
    },
    /// An entity cannot be deleted while other records reference it.
    EntityInUse {
        /// A description of the entity.
        entity: String,
        /// How many records reference it.
        references: usize,
    },
    /// A referenced entity does not exist.
    EntityNotFound {
        /// A description of the entity kind.
        entity: String,
        /// The identifier that failed to resolve.
        id: i64,
    },
    /// The requested status change is not a legal transition.
    InvalidStatusTransition {
        /// The current status.
        from: ApplicationStatus,
        /// The requested status.
        to: ApplicationStatus,
    },
    /// TIL is not enabled for this user.
    TilNotEnabled(i64),
    /// A leave type configuration is invalid.
    InvalidLeaveType(String),
    /// A leave pool configuration is invalid.
    InvalidLeavePool(String),
    /// FTE must be greater than 0 and at most 1.
    InvalidFte(f64),
    /// Unrecognized role value.
    InvalidRole(String),
    /// Unrecognized staff category value.
    InvalidStaffCategory(String),
    /// Unrecognized employment type value.
    InvalidEmploymentType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { reason } => write!(f, "Invalid range: {reason}"),
            Self::UnknownLeaveType(id) => write!(f, "Unknown leave type: {id}"),
            Self::AdvanceBookingDisallowed { leave_type } => {
                write!(f, "'{leave_type}' cannot be booked in advance")
            }
            Self::RetrospectiveBookingDisallowed { leave_type } => {
                write!(f, "'{leave_type}' cannot be booked retrospectively")
            }
            Self::AdvanceLimitExceeded { max_advance_days } => {
                write!(f, "Cannot book more than {max_advance_days} days in advance")
            }
            Self::PartialDaysDisallowed { leave_type } => {
                write!(f, "'{leave_type}' does not allow partial days")
            }
            Self::BelowMinimumHours {
                minimum_hours,
                requested_hours,
            } => {
                write!(
                    f,
                    "Minimum {minimum_hours} hours required for partial-day leave, requested {requested_hours}"
                )
            }
            Self::DocumentRequired { leave_type } => {
                write!(f, "'{leave_type}' requires a supporting document")
            }
            Self::InsufficientBalance {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient balance: requested {requested}, available {available}"
                )
            }
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::PoolNotFound(id) => write!(f, "Leave pool {id} not found"),
            Self::PermissionDenied { action, required } => {
                write!(f, "Permission denied: '{action}' requires {required}")
            }
            Self::EntityInUse { entity, references } => {
                write!(
                    f,
                    "{entity} cannot be deleted: referenced by {references} record(s)"
                )
            }
            Self::EntityNotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot transition application from {from} to {to}")
            }
            Self::TilNotEnabled(id) => write!(f, "Time in lieu is not enabled for user {id}"),
            Self::InvalidLeaveType(msg) => write!(f, "Invalid leave type: {msg}"),
            Self::InvalidLeavePool(msg) => write!(f, "Invalid leave pool: {msg}"),
            Self::InvalidFte(fte) => {
                write!(f, "Invalid FTE {fte}: must be greater than 0 and at most 1")
            }
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidStaffCategory(msg) => write!(f, "Invalid staff category: {msg}"),
            Self::InvalidEmploymentType(msg) => write!(f, "Invalid employment type: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
