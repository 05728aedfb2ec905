// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leavedesk_audit::{AuditEvent, StateSnapshot};
use leavedesk_domain::{
    ApplicationId, DomainError, GlobalTilSettings, LeaveApplication, LeaveBalance, LeavePool,
    LeaveType, LeaveTypeId, PoolId, TilBalance, User, UserId,
};
use serde::{Deserialize, Serialize};

/// The complete engine state.
///
/// State is an immutable value: transitions clone it, mutate the clone,
/// and return the new value alongside an audit event. A failed transition
/// leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// All known users.
    pub users: Vec<User>,
    /// All configured leave types.
    pub leave_types: Vec<LeaveType>,
    /// All configured leave pools.
    pub pools: Vec<LeavePool>,
    /// All stored (raw, unscaled) leave balances.
    pub balances: Vec<LeaveBalance>,
    /// All leave applications, in submission order.
    pub applications: Vec<LeaveApplication>,
    /// Per-user time-in-lieu balances.
    pub til_balances: Vec<TilBalance>,
    /// Process-wide time-in-lieu policy.
    pub til_settings: GlobalTilSettings,
}

impl State {
    /// Creates a new empty state with default TIL policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            leave_types: Vec::new(),
            pools: Vec::new(),
            balances: Vec::new(),
            applications: Vec::new(),
            til_balances: Vec::new(),
            til_settings: GlobalTilSettings::default(),
        }
    }

    /// Looks up a user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` when no user has the id.
    pub fn user(&self, user_id: UserId) -> Result<&User, DomainError> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .ok_or(DomainError::UserNotFound(user_id.value()))
    }

    /// Looks up a leave type.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLeaveType` when no leave type has the id.
    pub fn leave_type(&self, leave_type_id: LeaveTypeId) -> Result<&LeaveType, DomainError> {
        self.leave_types
            .iter()
            .find(|lt| lt.id == leave_type_id)
            .ok_or(DomainError::UnknownLeaveType(leave_type_id.value()))
    }

    /// Looks up a leave pool.
    ///
    /// # Errors
    ///
    /// Returns `PoolNotFound` when no pool has the id.
    pub fn pool(&self, pool_id: PoolId) -> Result<&LeavePool, DomainError> {
        self.pools
            .iter()
            .find(|pool| pool.id == pool_id)
            .ok_or(DomainError::PoolNotFound(pool_id.value()))
    }

    /// Looks up a leave application.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` when no application has the id.
    pub fn application(
        &self,
        application_id: ApplicationId,
    ) -> Result<&LeaveApplication, DomainError> {
        self.applications
            .iter()
            .find(|app| app.id == application_id)
            .ok_or(DomainError::EntityNotFound {
                entity: String::from("application"),
                id: application_id.value(),
            })
    }

    /// A user's TIL balance, if one has been recorded.
    #[must_use]
    pub fn til_balance(&self, user_id: UserId) -> Option<&TilBalance> {
        self.til_balances
            .iter()
            .find(|balance| balance.user_id == user_id)
    }

    /// The next free application id.
    #[must_use]
    pub fn next_application_id(&self) -> ApplicationId {
        let max: i64 = self
            .applications
            .iter()
            .map(|app| app.id.value())
            .max()
            .unwrap_or(0);
        ApplicationId::new(max + 1)
    }

    /// Mutable access to an application. Callers have already resolved the
    /// id through [`State::application`].
    pub(crate) fn application_mut(
        &mut self,
        application_id: ApplicationId,
    ) -> Result<&mut LeaveApplication, DomainError> {
        self.applications
            .iter_mut()
            .find(|app| app.id == application_id)
            .ok_or(DomainError::EntityNotFound {
                entity: String::from("application"),
                id: application_id.value(),
            })
    }

    /// Mutable access to a user's TIL balance, creating an empty record on
    /// first use.
    pub(crate) fn til_balance_mut(&mut self, user_id: UserId) -> &mut TilBalance {
        let index: Option<usize> = self
            .til_balances
            .iter()
            .position(|balance| balance.user_id == user_id);
        match index {
            Some(i) => &mut self.til_balances[i],
            None => {
                self.til_balances.push(TilBalance::new(user_id));
                let last: usize = self.til_balances.len() - 1;
                &mut self.til_balances[last]
            }
        }
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "users={},leave_types={},pools={},balances={},applications={},til_balances={}",
            self.users.len(),
            self.leave_types.len(),
            self.pools.len(),
            self.balances.len(),
            self.applications.len(),
            self.til_balances.len()
        ))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
