// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balance;
mod eligibility;
mod error;
mod schedule;
mod til;
mod types;
mod validation;

pub use balance::{
    BalanceKey, ResolvedBalance, check_sufficiency, pool_remaining_for_type, resolve_balance,
    resolve_balances,
};
pub use eligibility::{
    BookingRequest, available_leave_types, validate_booking, validate_document, validation_errors,
};
pub use error::DomainError;
pub use schedule::compute_duration;
pub use til::{TilExpiry, is_expired, next_expiry};
pub use types::{
    AccrualModel, AccrualPeriod, ApplicationId, ApplicationStatus, AvailabilityRule, BookingPolicy,
    DocumentRef, EmploymentType, GlobalTilSettings, LeaveApplication, LeaveBalance, LeavePool,
    LeaveType, LeaveTypeId, PartialDayPolicy, PoolId, ResetDate, Role, StaffCategory,
    TilBalance, TilLedgerEntry, TilMode, TilSettings, TimeRange, User, UserId, WorkDay,
    WorkSchedule,
};
pub use validation::{
    can_delete_leave_pool, can_delete_leave_type, validate_leave_pool, validate_leave_type,
};
