// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative configuration commands.
//!
//! All commands here require the admin role. Deletions are guarded by
//! referential-integrity checks, and deleting a leave type cascades to its
//! balance records so no dangling references survive.

use crate::apply::transition;
use crate::command::{Command, TilAdjustment};
use crate::error::CoreError;
use crate::state::{State, TransitionResult};
use leavedesk_domain::{
    BalanceKey, DomainError, LeaveBalance, TilBalance, TilLedgerEntry, User,
    can_delete_leave_pool, can_delete_leave_type, validate_leave_pool, validate_leave_type,
};
use std::collections::BTreeMap;
use time::Date;

/// Applies an administrative command.
///
/// # Errors
///
/// Returns `PermissionDenied` for non-admin actors, a validation error for
/// bad configuration, or `EntityInUse` for guarded deletions.
#[allow(clippy::too_many_lines)]
pub(crate) fn apply_admin(
    state: &State,
    command: Command,
    actor: &User,
    today: Date,
) -> Result<TransitionResult, CoreError> {
    if !actor.role.is_admin() {
        return Err(CoreError::DomainViolation(DomainError::PermissionDenied {
            action: String::from("administer leave configuration"),
            required: String::from("admin role"),
        }));
    }

    match command {
        Command::CreateLeaveType { leave_type } => {
            validate_leave_type(&leave_type, &state.pools)?;
            if state.leave_types.iter().any(|lt| lt.id == leave_type.id) {
                return Err(CoreError::DomainViolation(DomainError::InvalidLeaveType(
                    format!("leave type {} already exists", leave_type.id),
                )));
            }

            let details: Option<String> = Some(format!(
                "leave type {} '{}'",
                leave_type.id, leave_type.name
            ));
            let mut new_state: State = state.clone();
            new_state.leave_types.push(leave_type);

            Ok(transition(
                state,
                new_state,
                actor,
                "CreateLeaveType",
                details,
                today,
            ))
        }
        Command::UpdateLeaveType { leave_type } => {
            validate_leave_type(&leave_type, &state.pools)?;
            let index: usize = state
                .leave_types
                .iter()
                .position(|lt| lt.id == leave_type.id)
                .ok_or(DomainError::UnknownLeaveType(leave_type.id.value()))?;

            let details: Option<String> = Some(format!(
                "leave type {} '{}'",
                leave_type.id, leave_type.name
            ));
            let mut new_state: State = state.clone();
            new_state.leave_types[index] = leave_type;

            Ok(transition(
                state,
                new_state,
                actor,
                "UpdateLeaveType",
                details,
                today,
            ))
        }
        Command::DeleteLeaveType { leave_type_id } => {
            // Resolve first so a missing id reports as not-found.
            state.leave_type(leave_type_id)?;
            can_delete_leave_type(leave_type_id, &state.applications)?;

            let mut new_state: State = state.clone();
            new_state.leave_types.retain(|lt| lt.id != leave_type_id);
            // Cascade: drop the type's independent balances and its usage
            // entries inside pooled balances.
            new_state.balances.retain(|balance| {
                !matches!(
                    balance,
                    LeaveBalance::Independent { leave_type_id: id, .. } if *id == leave_type_id
                )
            });
            for balance in &mut new_state.balances {
                if let LeaveBalance::Pooled { usage_by_type, .. } = balance {
                    usage_by_type.remove(&leave_type_id);
                }
            }

            Ok(transition(
                state,
                new_state,
                actor,
                "DeleteLeaveType",
                Some(format!("leave type {leave_type_id}")),
                today,
            ))
        }
        Command::CreateLeavePool { pool } => {
            validate_leave_pool(&pool)?;
            if state.pools.iter().any(|p| p.id == pool.id) {
                return Err(CoreError::DomainViolation(DomainError::InvalidLeavePool(
                    format!("pool {} already exists", pool.id),
                )));
            }

            let details: Option<String> = Some(format!("pool {} '{}'", pool.id, pool.name));
            let mut new_state: State = state.clone();
            new_state.pools.push(pool);

            Ok(transition(
                state,
                new_state,
                actor,
                "CreateLeavePool",
                details,
                today,
            ))
        }
        Command::UpdateLeavePool { pool } => {
            validate_leave_pool(&pool)?;
            let index: usize = state
                .pools
                .iter()
                .position(|p| p.id == pool.id)
                .ok_or(DomainError::PoolNotFound(pool.id.value()))?;

            let details: Option<String> = Some(format!("pool {} '{}'", pool.id, pool.name));
            let mut new_state: State = state.clone();
            new_state.pools[index] = pool;

            Ok(transition(
                state,
                new_state,
                actor,
                "UpdateLeavePool",
                details,
                today,
            ))
        }
        Command::DeleteLeavePool { pool_id } => {
            state.pool(pool_id)?;
            can_delete_leave_pool(pool_id, &state.leave_types)?;

            let mut new_state: State = state.clone();
            new_state.pools.retain(|pool| pool.id != pool_id);
            new_state.balances.retain(|balance| {
                !matches!(
                    balance,
                    LeaveBalance::Pooled { pool_id: id, .. } if *id == pool_id
                )
            });

            Ok(transition(
                state,
                new_state,
                actor,
                "DeleteLeavePool",
                Some(format!("pool {pool_id}")),
                today,
            ))
        }
        Command::AdjustBalance {
            user_id,
            key,
            new_balance,
        } => {
            state.user(user_id)?;
            match key {
                BalanceKey::LeaveType(leave_type_id) => {
                    state.leave_type(leave_type_id)?;
                }
                BalanceKey::Pool(pool_id) => {
                    state.pool(pool_id)?;
                }
            }

            let mut new_state: State = state.clone();
            let index: Option<usize> = new_state.balances.iter().position(|balance| match key {
                BalanceKey::LeaveType(leave_type_id) => {
                    balance.is_for_type(user_id, leave_type_id)
                }
                BalanceKey::Pool(pool_id) => balance.is_for_pool(user_id, pool_id),
            });
            match index {
                Some(i) => match &mut new_state.balances[i] {
                    LeaveBalance::Independent { balance, .. }
                    | LeaveBalance::Pooled { balance, .. } => *balance = new_balance,
                },
                None => new_state.balances.push(match key {
                    BalanceKey::LeaveType(leave_type_id) => LeaveBalance::Independent {
                        user_id,
                        leave_type_id,
                        balance: new_balance,
                    },
                    BalanceKey::Pool(pool_id) => LeaveBalance::Pooled {
                        user_id,
                        pool_id,
                        balance: new_balance,
                        usage_by_type: BTreeMap::new(),
                    },
                }),
            }

            Ok(transition(
                state,
                new_state,
                actor,
                "AdjustBalance",
                Some(format!("user {user_id} set to {new_balance}")),
                today,
            ))
        }
        Command::AdjustTilBalance {
            user_id,
            hours,
            kind,
            note,
        } => {
            state.user(user_id)?;
            if hours <= 0.0 {
                return Err(CoreError::DomainViolation(DomainError::InvalidRange {
                    reason: String::from("adjustment hours must be positive"),
                }));
            }

            let mut new_state: State = state.clone();
            let balance: &mut TilBalance = new_state.til_balance_mut(user_id);
            let entry: TilLedgerEntry = TilLedgerEntry::new(today, hours, note);
            match kind {
                TilAdjustment::Accrual => {
                    balance.balance += hours;
                    balance.accrual_history.push(entry);
                }
                TilAdjustment::Usage => {
                    balance.balance -= hours;
                    balance.usage_history.push(entry);
                }
            }

            Ok(transition(
                state,
                new_state,
                actor,
                "AdjustTilBalance",
                Some(format!("user {user_id}: {hours}h {kind:?}")),
                today,
            ))
        }
        Command::UpdateTilSettings { settings } => {
            let mut new_state: State = state.clone();
            new_state.til_settings = settings;

            Ok(transition(
                state,
                new_state,
                actor,
                "UpdateTilSettings",
                Some(format!(
                    "accrual_ratio={}, usage_ratio={}, expiry_days={}",
                    settings.accrual_ratio, settings.usage_ratio, settings.expiry_days
                )),
                today,
            ))
        }
        Command::UpdateUserTilSettings { user_id, settings } => {
            let index: usize = state
                .users
                .iter()
                .position(|user| user.id == user_id)
                .ok_or(DomainError::UserNotFound(user_id.value()))?;

            let mut new_state: State = state.clone();
            new_state.users[index].til_settings = settings;

            Ok(transition(
                state,
                new_state,
                actor,
                "UpdateUserTilSettings",
                Some(format!("user {user_id}")),
                today,
            ))
        }
        Command::SubmitApplication { .. }
        | Command::SubmitTilWork { .. }
        | Command::SubmitTilTake { .. }
        | Command::Decide { .. }
        | Command::Withdraw { .. }
        | Command::AddAttachment { .. } => {
            unreachable!("apply_admin called with non-admin command")
        }
    }
}
