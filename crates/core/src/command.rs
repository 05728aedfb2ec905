// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leavedesk_domain::{
    ApplicationId, BalanceKey, DocumentRef, GlobalTilSettings, LeavePool, LeaveType, LeaveTypeId,
    PoolId, TilSettings, TimeRange, UserId,
};
use time::Date;

/// Which side of the TIL ledger a manual adjustment lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilAdjustment {
    /// Credit hours, recorded in the accrual history.
    Accrual,
    /// Debit hours, recorded in the usage history.
    Usage,
}

/// The outcome a decider requests for a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Approve the application, committing its balance effects.
    Approve,
    /// Reject the application, reversing any balance effects.
    Reject,
}

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit a leave application for a regular (non-TIL) leave type.
    SubmitApplication {
        /// The applicant.
        user_id: UserId,
        /// The leave type to book against.
        leave_type_id: LeaveTypeId,
        /// First day of leave (inclusive).
        start_date: Date,
        /// Last day of leave (inclusive).
        end_date: Date,
        /// Optional partial-day time range (single-day requests only).
        times: Option<TimeRange>,
        /// Optional supporting document.
        document: Option<DocumentRef>,
        /// Optional free-text notes.
        notes: Option<String>,
    },
    /// Log extra hours worked, to be banked as time in lieu on approval.
    SubmitTilWork {
        /// The applicant.
        user_id: UserId,
        /// The TIL leave type.
        leave_type_id: LeaveTypeId,
        /// The day the extra hours were worked.
        date: Date,
        /// Hours worked.
        hours: f64,
        /// Optional free-text notes.
        notes: Option<String>,
    },
    /// Take leave paid out of banked time-in-lieu hours.
    SubmitTilTake {
        /// The applicant.
        user_id: UserId,
        /// The TIL leave type.
        leave_type_id: LeaveTypeId,
        /// First day of leave (inclusive).
        start_date: Date,
        /// Last day of leave (inclusive).
        end_date: Date,
        /// Optional partial-day time range (single-day requests only).
        times: Option<TimeRange>,
        /// Optional free-text notes.
        notes: Option<String>,
    },
    /// Approve or reject a submitted application.
    Decide {
        /// The application to decide.
        application_id: ApplicationId,
        /// The requested outcome.
        decision: Decision,
    },
    /// Withdraw an application. Owners may withdraw their own; admins may
    /// withdraw anyone's.
    Withdraw {
        /// The application to withdraw.
        application_id: ApplicationId,
    },
    /// Attach (or replace) a supporting document on an active application.
    AddAttachment {
        /// The application to attach to.
        application_id: ApplicationId,
        /// The document reference.
        document: DocumentRef,
    },
    /// Create a leave type. Admin only.
    CreateLeaveType {
        /// The fully configured leave type.
        leave_type: LeaveType,
    },
    /// Replace an existing leave type's configuration. Admin only.
    UpdateLeaveType {
        /// The replacement configuration; matched by id.
        leave_type: LeaveType,
    },
    /// Delete a leave type with no active applications. Admin only.
    DeleteLeaveType {
        /// The leave type to delete.
        leave_type_id: LeaveTypeId,
    },
    /// Create a leave pool. Admin only.
    CreateLeavePool {
        /// The fully configured pool.
        pool: LeavePool,
    },
    /// Replace an existing pool's configuration. Admin only.
    UpdateLeavePool {
        /// The replacement configuration; matched by id.
        pool: LeavePool,
    },
    /// Delete a pool no leave type draws from. Admin only.
    DeleteLeavePool {
        /// The pool to delete.
        pool_id: PoolId,
    },
    /// Set a user's stored balance directly, creating the record if
    /// absent. Admin only.
    AdjustBalance {
        /// The user whose balance to adjust.
        user_id: UserId,
        /// Which balance to adjust.
        key: BalanceKey,
        /// The new raw (unscaled) balance in days.
        new_balance: f64,
    },
    /// Manually credit or debit a user's spendable TIL hours, appending a
    /// matching ledger entry. Creates the record if absent. Admin only.
    AdjustTilBalance {
        /// The user whose TIL balance to adjust.
        user_id: UserId,
        /// Hours to credit or debit (always positive).
        hours: f64,
        /// Which ledger the adjustment belongs to.
        kind: TilAdjustment,
        /// Optional note recorded on the ledger entry.
        note: Option<String>,
    },
    /// Replace the process-wide TIL policy. Admin only.
    UpdateTilSettings {
        /// The new policy.
        settings: GlobalTilSettings,
    },
    /// Replace a user's TIL enablement settings. Admin only.
    UpdateUserTilSettings {
        /// The user to update.
        user_id: UserId,
        /// The new per-user settings.
        settings: TilSettings,
    },
}
