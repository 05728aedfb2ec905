// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Work schedule duration calculation.
//!
//! Converts a date range plus a per-user weekly schedule into a duration in
//! days. Pure and deterministic: the current date is never consulted.

use crate::error::DomainError;
use crate::types::{TimeRange, WorkSchedule};
use time::Date;

/// Computes the duration of a leave request in days.
///
/// - Single-day range with a time range supplied, on a configured work day:
///   elapsed hours divided by that day's configured hours, as a fractional
///   day. A non-work day is 0 regardless of times.
/// - Single-day range without times: 1.0 on a work day, else 0.
/// - Multi-day range: the count of calendar dates in `[start, end]` whose
///   weekday is a configured work day. Partial times are ignored; boundary
///   days are not weighted.
///
/// # Arguments
///
/// * `start` - First day of the range (inclusive)
/// * `end` - Last day of the range (inclusive)
/// * `schedule` - The user's weekly work schedule
/// * `times` - Optional partial-day time range
///
/// # Errors
///
/// Returns `InvalidRange` when `end < start`, or when a time range is
/// supplied whose end is not after its start.
pub fn compute_duration(
    start: Date,
    end: Date,
    schedule: &WorkSchedule,
    times: Option<&TimeRange>,
) -> Result<f64, DomainError> {
    if end < start {
        return Err(DomainError::InvalidRange {
            reason: format!("end date {end} is before start date {start}"),
        });
    }

    if start == end {
        return single_day_duration(start, schedule, times);
    }

    // Multi-day: count scheduled work days across the inclusive range.
    let mut days: f64 = 0.0;
    let mut current: Date = start;
    loop {
        if schedule.is_work_day(current.weekday()) {
            days += 1.0;
        }
        if current == end {
            break;
        }
        current = current.next_day().ok_or_else(|| DomainError::InvalidRange {
            reason: format!("date overflow while walking range ending {end}"),
        })?;
    }
    Ok(days)
}

/// Duration for a single-day request, with optional partial times.
fn single_day_duration(
    day: Date,
    schedule: &WorkSchedule,
    times: Option<&TimeRange>,
) -> Result<f64, DomainError> {
    let Some(full_day_hours) = schedule.hours_on(day.weekday()) else {
        // Not a scheduled work day; consumes nothing.
        return Ok(0.0);
    };

    match times {
        Some(range) => {
            let hours: f64 = range.hours();
            if hours <= 0.0 {
                return Err(DomainError::InvalidRange {
                    reason: String::from("end time must be after start time"),
                });
            }
            Ok(hours / full_day_hours)
        }
        None => Ok(1.0),
    }
}
