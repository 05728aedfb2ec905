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

mod admin;
mod apply;
mod command;
mod error;
mod state;
mod til;

#[cfg(test)]
mod tests;

use leavedesk_domain::{
    DomainError, LeaveType, ResolvedBalance, TilExpiry, User, UserId, available_leave_types,
    next_expiry, resolve_balances,
};
use time::Date;

// Re-export public types and functions
pub use apply::apply;
pub use command::{Command, Decision, TilAdjustment};
pub use error::CoreError;
pub use state::{State, TransitionResult};

/// The leave types a user may book, after availability filtering.
///
/// This is a read-only query that does not create audit events.
///
/// # Errors
///
/// Returns `UserNotFound` when the user does not exist.
pub fn available_types(state: &State, user_id: UserId) -> Result<Vec<&LeaveType>, DomainError> {
    let user: &User = state.user(user_id)?;
    Ok(available_leave_types(user, &state.leave_types))
}

/// A user's resolved (FTE-adjusted) balances.
///
/// This is a read-only query that does not create audit events.
///
/// # Errors
///
/// Returns `UserNotFound` when the user does not exist, or a resolution
/// error when a stored balance references missing configuration.
pub fn resolved_balances(
    state: &State,
    user_id: UserId,
) -> Result<Vec<ResolvedBalance>, DomainError> {
    let user: &User = state.user(user_id)?;
    resolve_balances(user, &state.balances, &state.leave_types, &state.pools)
}

/// The next TIL expiry for a user, if any hours are at risk.
///
/// This is a read-only query that does not create audit events.
///
/// # Errors
///
/// Returns `UserNotFound` when the user does not exist.
pub fn til_expiry(
    state: &State,
    user_id: UserId,
    today: Date,
) -> Result<Option<TilExpiry>, DomainError> {
    state.user(user_id)?;
    Ok(state
        .til_balance(user_id)
        .and_then(|balance| next_expiry(balance, &state.til_settings, today)))
}
