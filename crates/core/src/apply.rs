// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::admin;
use crate::command::{Command, Decision};
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use crate::til;
use leavedesk_audit::{Action, Actor, AuditEvent, StateSnapshot};
use leavedesk_domain::{
    ApplicationId, ApplicationStatus, BookingRequest, DocumentRef, DomainError, LeaveApplication,
    LeaveBalance, LeaveType, LeaveTypeId, TimeRange, User, UserId, check_sufficiency,
    compute_duration, validate_booking, validate_document,
};
use time::Date;

/// Applies a command to the current state, producing a new state and audit
/// event.
///
/// The current date is supplied by the caller so transitions stay pure and
/// replayable.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The user performing this action
/// * `today` - The current date as seen by the caller
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates domain rules or the actor
/// lacks permission for it.
pub fn apply(
    state: &State,
    command: Command,
    actor: &User,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitApplication {
            user_id,
            leave_type_id,
            start_date,
            end_date,
            times,
            document,
            notes,
        } => submit_application(
            state,
            actor,
            user_id,
            leave_type_id,
            start_date,
            end_date,
            times,
            document,
            notes,
            today,
        ),
        Command::SubmitTilWork {
            user_id,
            leave_type_id,
            date,
            hours,
            notes,
        } => til::submit_work(state, actor, user_id, leave_type_id, date, hours, notes, today),
        Command::SubmitTilTake {
            user_id,
            leave_type_id,
            start_date,
            end_date,
            times,
            notes,
        } => til::submit_take(
            state,
            actor,
            user_id,
            leave_type_id,
            start_date,
            end_date,
            times,
            notes,
            today,
        ),
        Command::Decide {
            application_id,
            decision,
        } => decide(state, actor, application_id, decision, today),
        Command::Withdraw { application_id } => withdraw(state, actor, application_id, today),
        Command::AddAttachment {
            application_id,
            document,
        } => add_attachment(state, actor, application_id, document, today),
        other => admin::apply_admin(state, other, actor, today),
    }
}

/// Builds the transition result for a completed state change.
pub(crate) fn transition(
    previous: &State,
    new_state: State,
    actor: &User,
    action_name: &str,
    details: Option<String>,
    today: Date,
) -> TransitionResult {
    let before: StateSnapshot = previous.to_snapshot();
    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(
        Actor::new(actor.id, actor.role),
        Action::new(String::from(action_name), details),
        today,
        before,
        after,
    );
    TransitionResult {
        new_state,
        audit_event,
    }
}

/// Users act on their own records; admins may act on anyone's.
pub(crate) fn check_self_or_admin(
    actor: &User,
    user_id: UserId,
    action: &str,
) -> Result<(), DomainError> {
    if actor.id == user_id || actor.role.is_admin() {
        return Ok(());
    }
    Err(DomainError::PermissionDenied {
        action: String::from(action),
        required: String::from("admin role"),
    })
}

#[allow(clippy::too_many_arguments)]
fn submit_application(
    state: &State,
    actor: &User,
    user_id: UserId,
    leave_type_id: LeaveTypeId,
    start_date: Date,
    end_date: Date,
    times: Option<TimeRange>,
    document: Option<DocumentRef>,
    notes: Option<String>,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    check_self_or_admin(actor, user_id, "submit an application for another user")?;

    let user: &User = state.user(user_id)?;
    let leave_type: &LeaveType = state.leave_type(leave_type_id)?;

    if leave_type.is_til() {
        return Err(CoreError::DomainViolation(DomainError::InvalidLeaveType(
            format!(
                "'{}' is a time-in-lieu type; use the TIL commands",
                leave_type.name
            ),
        )));
    }

    if !leave_type.available_for.permits(user) {
        return Err(CoreError::DomainViolation(DomainError::PermissionDenied {
            action: format!("book '{}'", leave_type.name),
            required: String::from("an eligible employment type and staff category"),
        }));
    }

    let total_days: f64 = compute_duration(start_date, end_date, &user.work_schedule, times.as_ref())?;
    if total_days <= 0.0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidRange {
            reason: String::from("the requested range contains no scheduled work days"),
        }));
    }

    let request: BookingRequest<'_> = BookingRequest {
        start_date,
        times: times.as_ref(),
        document: document.as_ref(),
        total_days,
    };
    validate_booking(&request, leave_type, today)?;
    validate_document(leave_type, document.as_ref(), total_days)?;
    check_sufficiency(user, leave_type, &state.balances, total_days)?;

    // Submission never touches balances; effects land at approval.
    let application: LeaveApplication = LeaveApplication {
        id: state.next_application_id(),
        user_id,
        leave_type_id,
        start_date,
        end_date,
        total_days,
        status: ApplicationStatus::Pending,
        times,
        document,
        notes,
        til_mode: None,
        decided_by: None,
        decided_on: None,
        created_on: today,
    };
    let details: Option<String> = Some(format!(
        "application {} for user {user_id}: {total_days} day(s) of '{}'",
        application.id, leave_type.name
    ));

    let mut new_state: State = state.clone();
    new_state.applications.push(application);

    Ok(transition(
        state,
        new_state,
        actor,
        "SubmitApplication",
        details,
        today,
    ))
}

fn decide(
    state: &State,
    actor: &User,
    application_id: ApplicationId,
    decision: Decision,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    if !actor.role.can_decide() {
        return Err(CoreError::DomainViolation(DomainError::PermissionDenied {
            action: String::from("decide an application"),
            required: String::from("manager or admin role"),
        }));
    }

    let application: LeaveApplication = state.application(application_id)?.clone();
    let target: ApplicationStatus = match decision {
        Decision::Approve => ApplicationStatus::Approved,
        Decision::Reject => ApplicationStatus::Rejected,
    };
    let action_name: &str = match decision {
        Decision::Approve => "Approve",
        Decision::Reject => "Reject",
    };

    // Deciding to the status already held is idempotent: no balance
    // movement, no state change.
    if application.status == target {
        return Ok(transition(
            state,
            state.clone(),
            actor,
            action_name,
            Some(format!("application {application_id} already {target}")),
            today,
        ));
    }

    if !application.status.can_transition_to(target) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: application.status,
                to: target,
            },
        ));
    }

    let user: User = state.user(application.user_id)?.clone();
    let leave_type: LeaveType = state.leave_type(application.leave_type_id)?.clone();
    let mut new_state: State = state.clone();

    match target {
        ApplicationStatus::Approved => {
            if leave_type.is_til() {
                til::approve(&mut new_state, &application);
            } else {
                // Balances may have moved since submission; re-check
                // before committing the debit.
                check_sufficiency(&user, &leave_type, &new_state.balances, application.total_days)?;
                debit_balance(&mut new_state, &user, &leave_type, application.total_days)?;
            }
        }
        ApplicationStatus::Rejected => {
            if leave_type.is_til() {
                til::reverse(&mut new_state, &application, today);
            } else if application.status == ApplicationStatus::Approved {
                credit_balance(&mut new_state, &user, &leave_type, application.total_days);
            }
        }
        ApplicationStatus::Pending | ApplicationStatus::Withdrawn => {
            unreachable!("decide only targets approved or rejected")
        }
    }

    let decided: &mut LeaveApplication = new_state.application_mut(application_id)?;
    decided.status = target;
    decided.decided_by = Some(actor.id);
    decided.decided_on = Some(today);

    Ok(transition(
        state,
        new_state,
        actor,
        action_name,
        Some(format!("application {application_id} for user {}", user.id)),
        today,
    ))
}

fn withdraw(
    state: &State,
    actor: &User,
    application_id: ApplicationId,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    let application: LeaveApplication = state.application(application_id)?.clone();
    check_self_or_admin(
        actor,
        application.user_id,
        "withdraw another user's application",
    )?;

    if application.status == ApplicationStatus::Withdrawn {
        return Ok(transition(
            state,
            state.clone(),
            actor,
            "Withdraw",
            Some(format!("application {application_id} already withdrawn")),
            today,
        ));
    }

    if !application
        .status
        .can_transition_to(ApplicationStatus::Withdrawn)
    {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: application.status,
                to: ApplicationStatus::Withdrawn,
            },
        ));
    }

    let user: User = state.user(application.user_id)?.clone();
    let leave_type: LeaveType = state.leave_type(application.leave_type_id)?.clone();
    let mut new_state: State = state.clone();

    if leave_type.is_til() {
        til::reverse(&mut new_state, &application, today);
    } else if application.status == ApplicationStatus::Approved {
        credit_balance(&mut new_state, &user, &leave_type, application.total_days);
    }

    new_state.application_mut(application_id)?.status = ApplicationStatus::Withdrawn;

    Ok(transition(
        state,
        new_state,
        actor,
        "Withdraw",
        Some(format!("application {application_id} for user {}", user.id)),
        today,
    ))
}

fn add_attachment(
    state: &State,
    actor: &User,
    application_id: ApplicationId,
    document: DocumentRef,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    let application: &LeaveApplication = state.application(application_id)?;

    if actor.id != application.user_id {
        return Err(CoreError::DomainViolation(DomainError::PermissionDenied {
            action: String::from("attach a document to another user's application"),
            required: String::from("ownership of the application"),
        }));
    }
    if !application.status.is_active() {
        return Err(CoreError::DomainViolation(DomainError::PermissionDenied {
            action: String::from("attach a document to a closed application"),
            required: String::from("an active application"),
        }));
    }

    let mut new_state: State = state.clone();
    // Replaces any existing attachment.
    new_state.application_mut(application_id)?.document = Some(document);

    Ok(transition(
        state,
        new_state,
        actor,
        "AddAttachment",
        Some(format!("application {application_id}")),
        today,
    ))
}

/// Commits an approved application's balance effects.
///
/// Pooled types record usage against the member type; the stored pool
/// allocation itself never moves. Independent types debit the raw stored
/// balance.
fn debit_balance(
    state: &mut State,
    user: &User,
    leave_type: &LeaveType,
    days: f64,
) -> Result<(), DomainError> {
    match leave_type.pool_id() {
        Some(pool_id) => {
            let record: &mut LeaveBalance = state
                .balances
                .iter_mut()
                .find(|balance| balance.is_for_pool(user.id, pool_id))
                .ok_or(DomainError::InsufficientBalance {
                    requested: days,
                    available: 0.0,
                })?;
            if let LeaveBalance::Pooled { usage_by_type, .. } = record {
                *usage_by_type.entry(leave_type.id).or_insert(0.0) += days;
            }
            Ok(())
        }
        None => {
            let record: &mut LeaveBalance = state
                .balances
                .iter_mut()
                .find(|balance| balance.is_for_type(user.id, leave_type.id))
                .ok_or(DomainError::InsufficientBalance {
                    requested: days,
                    available: 0.0,
                })?;
            if let LeaveBalance::Independent { balance, .. } = record {
                *balance -= days;
            }
            Ok(())
        }
    }
}

/// Reverses a previously committed debit when an approved application is
/// rejected or withdrawn.
fn credit_balance(state: &mut State, user: &User, leave_type: &LeaveType, days: f64) {
    match leave_type.pool_id() {
        Some(pool_id) => {
            let record: Option<&mut LeaveBalance> = state
                .balances
                .iter_mut()
                .find(|balance| balance.is_for_pool(user.id, pool_id));
            if let Some(LeaveBalance::Pooled { usage_by_type, .. }) = record {
                *usage_by_type.entry(leave_type.id).or_insert(0.0) -= days;
            }
        }
        None => {
            let index: Option<usize> = state
                .balances
                .iter()
                .position(|balance| balance.is_for_type(user.id, leave_type.id));
            match index {
                Some(i) => {
                    if let LeaveBalance::Independent { balance, .. } = &mut state.balances[i] {
                        *balance += days;
                    }
                }
                None => state.balances.push(LeaveBalance::Independent {
                    user_id: user.id,
                    leave_type_id: leave_type.id,
                    balance: days,
                }),
            }
        }
    }
}
