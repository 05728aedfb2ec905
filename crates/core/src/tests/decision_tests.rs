// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TODAY, base_state, employee, manager, pooled_leave_type, test_pool,
};
use crate::{Command, CoreError, Decision, State, TransitionResult, apply};
use leavedesk_domain::{
    ApplicationId, ApplicationStatus, DocumentRef, DomainError, LeaveBalance, LeaveTypeId, PoolId,
    UserId,
};
use std::collections::BTreeMap;
use time::macros::date;

/// Submits a one-week application for user 2 and returns the new state.
fn with_pending_application(state: &State) -> State {
    let command: Command = Command::SubmitApplication {
        user_id: UserId::new(2),
        leave_type_id: LeaveTypeId::new(1),
        start_date: date!(2023 - 07 - 10),
        end_date: date!(2023 - 07 - 14),
        times: None,
        document: None,
        notes: None,
    };
    apply(state, command, &employee(state), TODAY)
        .unwrap()
        .new_state
}

fn decide(state: &State, decision: Decision) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        Command::Decide {
            application_id: ApplicationId::new(1),
            decision,
        },
        &manager(state),
        TODAY,
    )
}

fn independent_balance(state: &State) -> f64 {
    state
        .balances
        .iter()
        .find_map(|balance| match balance {
            LeaveBalance::Independent {
                user_id, balance, ..
            } if *user_id == UserId::new(2) => Some(*balance),
            _ => None,
        })
        .unwrap()
}

#[test]
fn test_employee_cannot_decide() {
    let state: State = with_pending_application(&base_state());
    let result = apply(
        &state,
        Command::Decide {
            application_id: ApplicationId::new(1),
            decision: Decision::Approve,
        },
        &employee(&state),
        TODAY,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::PermissionDenied { .. }
        ))
    ));
}

#[test]
fn test_approve_debits_independent_balance() {
    let state: State = with_pending_application(&base_state());

    let result: TransitionResult = decide(&state, Decision::Approve).unwrap();

    let application = &result.new_state.applications[0];
    assert_eq!(application.status, ApplicationStatus::Approved);
    assert_eq!(application.decided_by, Some(UserId::new(3)));
    assert_eq!(application.decided_on, Some(TODAY));
    assert!((independent_balance(&result.new_state) - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_reject_pending_leaves_balance_alone() {
    let state: State = with_pending_application(&base_state());

    let result: TransitionResult = decide(&state, Decision::Reject).unwrap();

    assert_eq!(
        result.new_state.applications[0].status,
        ApplicationStatus::Rejected
    );
    assert!((independent_balance(&result.new_state) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_approve_then_reject_round_trip() {
    let state: State = with_pending_application(&base_state());

    let approved: State = decide(&state, Decision::Approve).unwrap().new_state;
    assert!((independent_balance(&approved) - 5.0).abs() < f64::EPSILON);

    let rejected: State = decide(&approved, Decision::Reject).unwrap().new_state;
    assert_eq!(
        rejected.applications[0].status,
        ApplicationStatus::Rejected
    );
    assert!((independent_balance(&rejected) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_rejecting_twice_does_not_credit_twice() {
    let state: State = with_pending_application(&base_state());
    let approved: State = decide(&state, Decision::Approve).unwrap().new_state;
    let rejected: State = decide(&approved, Decision::Reject).unwrap().new_state;

    let again: State = decide(&rejected, Decision::Reject).unwrap().new_state;

    assert_eq!(again, rejected);
    assert!((independent_balance(&again) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_cannot_approve_a_rejected_application() {
    let state: State = with_pending_application(&base_state());
    let rejected: State = decide(&state, Decision::Reject).unwrap().new_state;

    let result = decide(&rejected, Decision::Approve);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidStatusTransition {
            from: ApplicationStatus::Rejected,
            to: ApplicationStatus::Approved,
        })
    );
}

#[test]
fn test_withdraw_pending_leaves_balance_alone() {
    let state: State = with_pending_application(&base_state());

    let result: TransitionResult = apply(
        &state,
        Command::Withdraw {
            application_id: ApplicationId::new(1),
        },
        &employee(&state),
        TODAY,
    )
    .unwrap();

    assert_eq!(
        result.new_state.applications[0].status,
        ApplicationStatus::Withdrawn
    );
    assert!((independent_balance(&result.new_state) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_withdraw_approved_credits_back() {
    let state: State = with_pending_application(&base_state());
    let approved: State = decide(&state, Decision::Approve).unwrap().new_state;

    let result: TransitionResult = apply(
        &approved,
        Command::Withdraw {
            application_id: ApplicationId::new(1),
        },
        &employee(&approved),
        TODAY,
    )
    .unwrap();

    assert!((independent_balance(&result.new_state) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_withdraw_requires_owner_or_admin() {
    let state: State = with_pending_application(&base_state());

    let result = apply(
        &state,
        Command::Withdraw {
            application_id: ApplicationId::new(1),
        },
        &manager(&state),
        TODAY,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::PermissionDenied { .. }
        ))
    ));
}

#[test]
fn test_pooled_approval_records_usage_not_a_debit() {
    let mut state: State = base_state();
    state.pools = vec![test_pool(1)];
    state.leave_types.push(pooled_leave_type(2, 1));
    state.balances.push(LeaveBalance::Pooled {
        user_id: UserId::new(2),
        pool_id: PoolId::new(1),
        balance: 15.0,
        usage_by_type: BTreeMap::new(),
    });

    let command: Command = Command::SubmitApplication {
        user_id: UserId::new(2),
        leave_type_id: LeaveTypeId::new(2),
        start_date: date!(2023 - 07 - 10),
        end_date: date!(2023 - 07 - 11),
        times: None,
        document: None,
        notes: None,
    };
    let submitted: State = apply(&state, command, &employee(&state), TODAY)
        .unwrap()
        .new_state;
    let approved: State = decide(&submitted, Decision::Approve).unwrap().new_state;

    let pooled = approved
        .balances
        .iter()
        .find(|balance| balance.is_for_pool(UserId::new(2), PoolId::new(1)))
        .unwrap();
    match pooled {
        LeaveBalance::Pooled {
            balance,
            usage_by_type,
            ..
        } => {
            // The stored allocation never moves; usage carries the debit.
            assert!((balance - 15.0).abs() < f64::EPSILON);
            assert!((usage_by_type[&LeaveTypeId::new(2)] - 2.0).abs() < f64::EPSILON);
        }
        LeaveBalance::Independent { .. } => panic!("expected pooled balance"),
    }
}

#[test]
fn test_pooled_approve_then_reject_round_trip() {
    let mut state: State = base_state();
    state.pools = vec![test_pool(1)];
    state.leave_types.push(pooled_leave_type(2, 1));
    state.balances.push(LeaveBalance::Pooled {
        user_id: UserId::new(2),
        pool_id: PoolId::new(1),
        balance: 15.0,
        usage_by_type: BTreeMap::new(),
    });

    let command: Command = Command::SubmitApplication {
        user_id: UserId::new(2),
        leave_type_id: LeaveTypeId::new(2),
        start_date: date!(2023 - 07 - 10),
        end_date: date!(2023 - 07 - 11),
        times: None,
        document: None,
        notes: None,
    };
    let submitted: State = apply(&state, command, &employee(&state), TODAY)
        .unwrap()
        .new_state;
    let approved: State = decide(&submitted, Decision::Approve).unwrap().new_state;
    let rejected: State = decide(&approved, Decision::Reject).unwrap().new_state;

    let pooled = rejected
        .balances
        .iter()
        .find(|balance| balance.is_for_pool(UserId::new(2), PoolId::new(1)))
        .unwrap();
    match pooled {
        LeaveBalance::Pooled { usage_by_type, .. } => {
            // The rejection credited the usage back out.
            assert!(usage_by_type[&LeaveTypeId::new(2)].abs() < f64::EPSILON);
        }
        LeaveBalance::Independent { .. } => panic!("expected pooled balance"),
    }
}

#[test]
fn test_sequential_approvals_respect_the_type_cap() {
    let mut state: State = base_state();
    state.pools = vec![test_pool(1)];
    let mut capped = pooled_leave_type(2, 1);
    capped.max_days_per_year = Some(1.0);
    state.leave_types.push(capped);
    state.balances.push(LeaveBalance::Pooled {
        user_id: UserId::new(2),
        pool_id: PoolId::new(1),
        balance: 15.0,
        usage_by_type: BTreeMap::new(),
    });

    // Two one-day applications, both submitted while the cap still has
    // room.
    let mut current: State = state;
    for day in [date!(2023 - 07 - 10), date!(2023 - 07 - 11)] {
        let command: Command = Command::SubmitApplication {
            user_id: UserId::new(2),
            leave_type_id: LeaveTypeId::new(2),
            start_date: day,
            end_date: day,
            times: None,
            document: None,
            notes: None,
        };
        current = apply(&current, command, &employee(&current), TODAY)
            .unwrap()
            .new_state;
    }

    let first = apply(
        &current,
        Command::Decide {
            application_id: ApplicationId::new(1),
            decision: Decision::Approve,
        },
        &manager(&current),
        TODAY,
    )
    .unwrap();

    // The first approval exhausted the yearly cap; the second re-check
    // fails even though the pool itself still has capacity.
    let second = apply(
        &first.new_state,
        Command::Decide {
            application_id: ApplicationId::new(2),
            decision: Decision::Approve,
        },
        &manager(&first.new_state),
        TODAY,
    );

    assert_eq!(
        second.unwrap_err(),
        CoreError::DomainViolation(DomainError::InsufficientBalance {
            requested: 1.0,
            available: 0.0
        })
    );
}

#[test]
fn test_attachment_owner_only_and_replaces() {
    let state: State = with_pending_application(&base_state());

    let denied = apply(
        &state,
        Command::AddAttachment {
            application_id: ApplicationId::new(1),
            document: DocumentRef::new("cert-001.pdf"),
        },
        &manager(&state),
        TODAY,
    );
    assert!(matches!(
        denied,
        Err(CoreError::DomainViolation(
            DomainError::PermissionDenied { .. }
        ))
    ));

    let first: State = apply(
        &state,
        Command::AddAttachment {
            application_id: ApplicationId::new(1),
            document: DocumentRef::new("cert-001.pdf"),
        },
        &employee(&state),
        TODAY,
    )
    .unwrap()
    .new_state;
    let second: State = apply(
        &first,
        Command::AddAttachment {
            application_id: ApplicationId::new(1),
            document: DocumentRef::new("cert-002.pdf"),
        },
        &employee(&first),
        TODAY,
    )
    .unwrap()
    .new_state;

    assert_eq!(
        second.applications[0].document,
        Some(DocumentRef::new("cert-002.pdf"))
    );
}
