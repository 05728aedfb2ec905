// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-in-lieu expiry.
//!
//! Expiry is advisory: these functions flag hours at risk so callers can
//! surface a warning. Nothing here mutates a balance.

use crate::types::{GlobalTilSettings, TilBalance, TilLedgerEntry};
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

/// The next date on which accrued TIL hours expire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilExpiry {
    /// The date the hours expire.
    pub date: Date,
    /// The hours at risk: the full spendable balance.
    pub hours: f64,
}

/// Computes the next expiry for a TIL balance.
///
/// The expiry clock runs from the earliest recorded accrual: that entry's
/// date plus the configured expiry window. A positive balance with no
/// accrual history (an administrative adjustment, typically) expires one
/// full window from `today`. Returns `None` when there is nothing to
/// expire.
#[must_use]
pub fn next_expiry(
    balance: &TilBalance,
    settings: &GlobalTilSettings,
    today: Date,
) -> Option<TilExpiry> {
    if balance.balance <= 0.0 && balance.pending_accrual <= 0.0 {
        return None;
    }

    let earliest: Option<&TilLedgerEntry> = balance
        .accrual_history
        .iter()
        .min_by_key(|entry| entry.date);

    let anchor: Date = earliest.map_or(today, |entry| entry.date);
    let date: Date = anchor.checked_add(Duration::days(settings.expiry_days))?;
    Some(TilExpiry {
        date,
        hours: balance.balance,
    })
}

/// Whether a TIL balance holds hours past their expiry date.
#[must_use]
pub fn is_expired(balance: &TilBalance, settings: &GlobalTilSettings, today: Date) -> bool {
    next_expiry(balance, settings, today).is_some_and(|expiry| expiry.date < today)
}
