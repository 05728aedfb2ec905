// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-in-lieu accrual and usage.
//!
//! TIL applications flow through the same lifecycle as regular leave but
//! move hours, not days, and their balance effects are timed differently:
//! worked hours land in pending accrual at submission and only become
//! spendable on approval, while taken hours are debited immediately at
//! submission and re-credited if the application is later rejected or
//! withdrawn.

use crate::apply::{check_self_or_admin, transition};
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use leavedesk_domain::{
    ApplicationId, ApplicationStatus, DomainError, LeaveApplication, LeaveType, LeaveTypeId,
    TilBalance, TilLedgerEntry, TilMode, TimeRange, User, UserId, compute_duration,
};
use time::Date;

fn til_type<'a>(state: &'a State, leave_type_id: LeaveTypeId) -> Result<&'a LeaveType, CoreError> {
    let leave_type: &LeaveType = state.leave_type(leave_type_id)?;
    if !leave_type.is_til() {
        return Err(CoreError::DomainViolation(DomainError::InvalidLeaveType(
            format!("'{}' is not a time-in-lieu type", leave_type.name),
        )));
    }
    Ok(leave_type)
}

fn check_enabled(user: &User) -> Result<(), CoreError> {
    if !user.til_settings.enabled {
        return Err(CoreError::DomainViolation(DomainError::TilNotEnabled(
            user.id.value(),
        )));
    }
    Ok(())
}

/// Logs extra hours worked. The hours land in pending accrual, scaled by
/// the accrual ratio, and become spendable only on approval.
#[allow(clippy::too_many_arguments)]
pub(crate) fn submit_work(
    state: &State,
    actor: &User,
    user_id: UserId,
    leave_type_id: LeaveTypeId,
    date: Date,
    hours: f64,
    notes: Option<String>,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    check_self_or_admin(actor, user_id, "log TIL hours for another user")?;

    let user: &User = state.user(user_id)?;
    let leave_type: &LeaveType = til_type(state, leave_type_id)?;
    check_enabled(user)?;

    if hours <= 0.0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidRange {
            reason: String::from("worked hours must be positive"),
        }));
    }
    if date < today && !user.til_settings.allow_retrospective {
        return Err(CoreError::DomainViolation(
            DomainError::RetrospectiveBookingDisallowed {
                leave_type: leave_type.name.clone(),
            },
        ));
    }

    let accrued: f64 = hours * state.til_settings.accrual_ratio;
    let mut new_state: State = state.clone();
    new_state.til_balance_mut(user_id).pending_accrual += accrued;

    let application: LeaveApplication = LeaveApplication {
        id: state.next_application_id(),
        user_id,
        leave_type_id,
        start_date: date,
        end_date: date,
        total_days: hours / 8.0,
        status: ApplicationStatus::Pending,
        times: None,
        document: None,
        notes,
        til_mode: Some(TilMode::Work),
        decided_by: None,
        decided_on: None,
        created_on: today,
    };
    let details: Option<String> = Some(format!(
        "application {} for user {user_id}: {hours}h worked, {accrued}h pending",
        application.id
    ));
    new_state.applications.push(application);

    Ok(transition(
        state,
        new_state,
        actor,
        "SubmitTilWork",
        details,
        today,
    ))
}

/// Takes leave against banked TIL hours. The debit lands immediately at
/// submission, after checking the spendable balance covers it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn submit_take(
    state: &State,
    actor: &User,
    user_id: UserId,
    leave_type_id: LeaveTypeId,
    start_date: Date,
    end_date: Date,
    times: Option<TimeRange>,
    notes: Option<String>,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    check_self_or_admin(actor, user_id, "take TIL leave for another user")?;

    let user: &User = state.user(user_id)?;
    let leave_type: &LeaveType = til_type(state, leave_type_id)?;
    check_enabled(user)?;

    if start_date < today && !user.til_settings.allow_retrospective {
        return Err(CoreError::DomainViolation(
            DomainError::RetrospectiveBookingDisallowed {
                leave_type: leave_type.name.clone(),
            },
        ));
    }

    let total_days: f64 =
        compute_duration(start_date, end_date, &user.work_schedule, times.as_ref())?;
    if total_days <= 0.0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidRange {
            reason: String::from("the requested range contains no scheduled work days"),
        }));
    }

    let debit: f64 = total_days * 8.0 * state.til_settings.usage_ratio;
    let available: f64 = state
        .til_balance(user_id)
        .map_or(0.0, |balance| balance.balance);
    if debit > available {
        return Err(CoreError::DomainViolation(
            DomainError::InsufficientBalance {
                requested: debit,
                available,
            },
        ));
    }

    let application_id: ApplicationId = state.next_application_id();
    let mut new_state: State = state.clone();
    let balance: &mut TilBalance = new_state.til_balance_mut(user_id);
    balance.balance -= debit;
    balance.usage_history.push(TilLedgerEntry::new(
        today,
        debit,
        Some(format!("application {application_id}")),
    ));

    let application: LeaveApplication = LeaveApplication {
        id: application_id,
        user_id,
        leave_type_id,
        start_date,
        end_date,
        total_days,
        status: ApplicationStatus::Pending,
        times,
        document: None,
        notes,
        til_mode: Some(TilMode::Take),
        decided_by: None,
        decided_on: None,
        created_on: today,
    };
    let details: Option<String> = Some(format!(
        "application {application_id} for user {user_id}: {debit}h debited"
    ));
    new_state.applications.push(application);

    Ok(transition(
        state,
        new_state,
        actor,
        "SubmitTilTake",
        details,
        today,
    ))
}

/// Commits a TIL application's approval effects.
///
/// Work mode banks all pending accrual into the spendable balance, dated
/// to the day the hours were worked so the expiry clock starts there.
/// Take mode is a no-op: the debit already happened at submission.
pub(crate) fn approve(state: &mut State, application: &LeaveApplication) {
    match application.til_mode {
        Some(TilMode::Work) => {
            let balance: &mut TilBalance = state.til_balance_mut(application.user_id);
            let banked: f64 = balance.pending_accrual;
            balance.balance += banked;
            balance.pending_accrual = 0.0;
            balance.accrual_history.push(TilLedgerEntry::new(
                application.start_date,
                banked,
                Some(format!("application {}", application.id)),
            ));
        }
        Some(TilMode::Take) | None => {}
    }
}

/// Reverses a TIL application's balance effects on rejection or
/// withdrawal.
///
/// Pending worked hours are forfeited; already-banked worked hours are
/// clawed back. Taken hours are re-credited with a negative usage entry so
/// the ledger still adds up.
pub(crate) fn reverse(state: &mut State, application: &LeaveApplication, today: Date) {
    let usage_ratio: f64 = state.til_settings.usage_ratio;
    let accrual_ratio: f64 = state.til_settings.accrual_ratio;
    match application.til_mode {
        Some(TilMode::Work) => {
            let balance: &mut TilBalance = state.til_balance_mut(application.user_id);
            if application.status == ApplicationStatus::Approved {
                balance.balance -= application.hours() * accrual_ratio;
            } else {
                balance.pending_accrual = 0.0;
            }
        }
        Some(TilMode::Take) => {
            let credit: f64 = application.total_days * 8.0 * usage_ratio;
            let balance: &mut TilBalance = state.til_balance_mut(application.user_id);
            balance.balance += credit;
            balance.usage_history.push(TilLedgerEntry::new(
                today,
                -credit,
                Some(format!("application {} reversed", application.id)),
            ));
        }
        None => {}
    }
}
