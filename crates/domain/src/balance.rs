// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Balance resolution.
//!
//! Read-only aggregation of stored balances into the values callers may
//! act on: FTE scaling is applied here, at read time, and never persisted.
//! Pooled balances carry their per-type usage breakdown and the list of
//! member types; the remaining capacity for a type in a pool is the
//! minimum of the pool constraint and the type's own yearly cap.

use crate::error::DomainError;
use crate::types::{LeaveBalance, LeavePool, LeaveType, LeaveTypeId, PoolId, User};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies which balance to resolve for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceKey {
    /// An independent per-type balance.
    LeaveType(LeaveTypeId),
    /// A pooled balance.
    Pool(PoolId),
}

/// A balance as seen by callers: FTE-adjusted, with pool context attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolvedBalance {
    /// An independent per-type balance.
    Independent {
        /// The leave type the balance belongs to.
        leave_type_id: LeaveTypeId,
        /// Remaining days, FTE-adjusted unless the type uses full-day
        /// allocation.
        balance: f64,
    },
    /// A pooled balance shared across member leave types.
    Pooled {
        /// The pool the balance draws from.
        pool_id: PoolId,
        /// The FTE-adjusted pool allocation in days.
        balance: f64,
        /// Total days consumed from the pool this year.
        total_used: f64,
        /// Days used per member type this year.
        usage_by_type: BTreeMap<LeaveTypeId, f64>,
        /// The leave types sharing this pool.
        member_types: Vec<LeaveTypeId>,
    },
}

impl ResolvedBalance {
    /// Days still available: the balance itself for independent balances,
    /// the allocation minus total usage for pooled ones.
    #[must_use]
    pub fn available(&self) -> f64 {
        match self {
            Self::Independent { balance, .. } => *balance,
            Self::Pooled {
                balance,
                total_used,
                ..
            } => balance - total_used,
        }
    }
}

/// Remaining days a specific leave type may draw from a pool.
///
/// The two-constraint rule: a type is limited both by what is left in the
/// pool and by its own yearly cap. An unset cap is unbounded.
#[must_use]
pub fn pool_remaining_for_type(
    pool_balance: f64,
    total_used: f64,
    type_used: f64,
    max_days_per_year: Option<f64>,
) -> f64 {
    let pool_remaining: f64 = pool_balance - total_used;
    match max_days_per_year {
        Some(cap) => pool_remaining.min(cap - type_used),
        None => pool_remaining,
    }
}

/// Resolves all balances recorded for a user.
///
/// A user with no recorded balances resolves to an empty list, not an
/// error.
///
/// # Errors
///
/// Returns `UnknownLeaveType` or `PoolNotFound` when a stored balance
/// references configuration that no longer exists.
pub fn resolve_balances(
    user: &User,
    balances: &[LeaveBalance],
    leave_types: &[LeaveType],
    pools: &[LeavePool],
) -> Result<Vec<ResolvedBalance>, DomainError> {
    balances
        .iter()
        .filter(|balance| balance.user_id() == user.id)
        .map(|balance| resolve_one(user, balance, leave_types, pools))
        .collect()
}

/// Resolves a single balance for a user, if one is recorded.
///
/// # Errors
///
/// Returns `UnknownLeaveType` or `PoolNotFound` when the stored balance
/// references configuration that no longer exists.
pub fn resolve_balance(
    user: &User,
    key: BalanceKey,
    balances: &[LeaveBalance],
    leave_types: &[LeaveType],
    pools: &[LeavePool],
) -> Result<Option<ResolvedBalance>, DomainError> {
    let found: Option<&LeaveBalance> = balances.iter().find(|balance| match key {
        BalanceKey::LeaveType(leave_type_id) => balance.is_for_type(user.id, leave_type_id),
        BalanceKey::Pool(pool_id) => balance.is_for_pool(user.id, pool_id),
    });
    found
        .map(|balance| resolve_one(user, balance, leave_types, pools))
        .transpose()
}

fn resolve_one(
    user: &User,
    balance: &LeaveBalance,
    leave_types: &[LeaveType],
    pools: &[LeavePool],
) -> Result<ResolvedBalance, DomainError> {
    match balance {
        LeaveBalance::Independent {
            leave_type_id,
            balance,
            ..
        } => {
            let leave_type: &LeaveType = leave_types
                .iter()
                .find(|lt| lt.id == *leave_type_id)
                .ok_or(DomainError::UnknownLeaveType(leave_type_id.value()))?;
            let adjusted: f64 = if leave_type.use_full_day_allocation {
                *balance
            } else {
                balance * user.work_schedule.fte
            };
            Ok(ResolvedBalance::Independent {
                leave_type_id: *leave_type_id,
                balance: adjusted,
            })
        }
        LeaveBalance::Pooled {
            pool_id,
            balance,
            usage_by_type,
            ..
        } => {
            if !pools.iter().any(|pool| pool.id == *pool_id) {
                return Err(DomainError::PoolNotFound(pool_id.value()));
            }
            let member_types: Vec<LeaveTypeId> = leave_types
                .iter()
                .filter(|lt| lt.pool_id() == Some(*pool_id))
                .map(|lt| lt.id)
                .collect();
            let total_used: f64 = usage_by_type.values().sum();
            Ok(ResolvedBalance::Pooled {
                pool_id: *pool_id,
                balance: balance * user.work_schedule.fte,
                total_used,
                usage_by_type: usage_by_type.clone(),
                member_types,
            })
        }
    }
}

/// Checks that a user has enough balance for a requested duration.
///
/// Pooled types apply the two-constraint remaining rule; independent
/// types compare against the FTE-adjusted balance. A missing balance
/// record counts as zero available.
///
/// # Errors
///
/// Returns `InsufficientBalance` carrying the requested and available
/// amounts when the request does not fit.
pub fn check_sufficiency(
    user: &User,
    leave_type: &LeaveType,
    balances: &[LeaveBalance],
    requested_days: f64,
) -> Result<(), DomainError> {
    let available: f64 = leave_type.pool_id().map_or_else(
        || {
            balances
                .iter()
                .find_map(|balance| match balance {
                    LeaveBalance::Independent {
                        user_id,
                        leave_type_id,
                        balance,
                    } if *user_id == user.id && *leave_type_id == leave_type.id => {
                        if leave_type.use_full_day_allocation {
                            Some(*balance)
                        } else {
                            Some(balance * user.work_schedule.fte)
                        }
                    }
                    _ => None,
                })
                .unwrap_or(0.0)
        },
        |pool_id| {
            balances
                .iter()
                .find_map(|balance| match balance {
                    LeaveBalance::Pooled {
                        user_id,
                        pool_id: stored_pool,
                        balance,
                        usage_by_type,
                    } if *user_id == user.id && *stored_pool == pool_id => {
                        let total_used: f64 = usage_by_type.values().sum();
                        let type_used: f64 =
                            usage_by_type.get(&leave_type.id).copied().unwrap_or(0.0);
                        Some(pool_remaining_for_type(
                            balance * user.work_schedule.fte,
                            total_used,
                            type_used,
                            leave_type.max_days_per_year,
                        ))
                    }
                    _ => None,
                })
                .unwrap_or(0.0)
        },
    );

    if requested_days > available {
        return Err(DomainError::InsufficientBalance {
            requested: requested_days,
            available,
        });
    }
    Ok(())
}
