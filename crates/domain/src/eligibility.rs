// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Eligibility validation for leave applications.
//!
//! Policy checks run in a fixed order and fail fast with a specific error;
//! [`validation_errors`] collects the full list for callers that want to
//! report every violation at once. All date comparisons are at day
//! granularity; only the minimum-hours check looks at the time range.

use crate::error::DomainError;
use crate::types::{DocumentRef, LeaveType, TimeRange, User};
use time::{Date, Duration};

/// The policy-relevant parts of a leave request.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest<'a> {
    /// First day of the requested leave.
    pub start_date: Date,
    /// Partial-day time range, when supplied.
    pub times: Option<&'a TimeRange>,
    /// Supporting document reference, when attached.
    pub document: Option<&'a DocumentRef>,
    /// Requested duration in days.
    pub total_days: f64,
}

/// Validates a booking against a leave type's policy.
///
/// Checks, in order: advance booking allowed, retrospective booking
/// allowed, advance limit, partial-day policy, minimum hours. The first
/// failure wins. Document requirements are checked separately at
/// submission finalization via [`validate_document`].
///
/// # Errors
///
/// Returns the first applicable policy violation.
pub fn validate_booking(
    request: &BookingRequest<'_>,
    leave_type: &LeaveType,
    today: Date,
) -> Result<(), DomainError> {
    if !leave_type.booking.allow_advance_booking && request.start_date > today {
        return Err(DomainError::AdvanceBookingDisallowed {
            leave_type: leave_type.name.clone(),
        });
    }

    if !leave_type.booking.allow_retrospective && request.start_date < today {
        return Err(DomainError::RetrospectiveBookingDisallowed {
            leave_type: leave_type.name.clone(),
        });
    }

    if let Some(max_advance_days) = leave_type.booking.max_advance_days {
        let limit: Date = today
            .checked_add(Duration::days(max_advance_days))
            .ok_or_else(|| DomainError::InvalidRange {
                reason: format!("date overflow adding {max_advance_days} days to {today}"),
            })?;
        if request.start_date > limit {
            return Err(DomainError::AdvanceLimitExceeded { max_advance_days });
        }
    }

    if let Some(times) = request.times {
        if !leave_type.partial_day.allow_partial_days {
            return Err(DomainError::PartialDaysDisallowed {
                leave_type: leave_type.name.clone(),
            });
        }
        if let Some(minimum_hours) = leave_type.partial_day.minimum_hours {
            let requested_hours: f64 = times.hours();
            if requested_hours < minimum_hours {
                return Err(DomainError::BelowMinimumHours {
                    minimum_hours,
                    requested_hours,
                });
            }
        }
    }

    Ok(())
}

/// Validates the document requirement at submission finalization.
///
/// A type requiring evidence accepts an undocumented request only when
/// `max_days_without_evidence` is set and covers the requested duration.
///
/// # Errors
///
/// Returns `DocumentRequired` when evidence is required and missing.
pub fn validate_document(
    leave_type: &LeaveType,
    document: Option<&DocumentRef>,
    total_days: f64,
) -> Result<(), DomainError> {
    if !leave_type.requires_document || document.is_some() {
        return Ok(());
    }
    if let Some(max_days) = leave_type.max_days_without_evidence {
        if total_days <= max_days {
            return Ok(());
        }
    }
    Err(DomainError::DocumentRequired {
        leave_type: leave_type.name.clone(),
    })
}

/// Collects every policy violation for a booking, in check order.
#[must_use]
pub fn validation_errors(
    request: &BookingRequest<'_>,
    leave_type: &LeaveType,
    today: Date,
) -> Vec<DomainError> {
    let mut errors: Vec<DomainError> = Vec::new();

    if !leave_type.booking.allow_advance_booking && request.start_date > today {
        errors.push(DomainError::AdvanceBookingDisallowed {
            leave_type: leave_type.name.clone(),
        });
    }

    if !leave_type.booking.allow_retrospective && request.start_date < today {
        errors.push(DomainError::RetrospectiveBookingDisallowed {
            leave_type: leave_type.name.clone(),
        });
    }

    if let Some(max_advance_days) = leave_type.booking.max_advance_days {
        match today.checked_add(Duration::days(max_advance_days)) {
            Some(limit) if request.start_date > limit => {
                errors.push(DomainError::AdvanceLimitExceeded { max_advance_days });
            }
            Some(_) => {}
            None => errors.push(DomainError::InvalidRange {
                reason: format!("date overflow adding {max_advance_days} days to {today}"),
            }),
        }
    }

    if let Some(times) = request.times {
        if !leave_type.partial_day.allow_partial_days {
            errors.push(DomainError::PartialDaysDisallowed {
                leave_type: leave_type.name.clone(),
            });
        }
        if let Some(minimum_hours) = leave_type.partial_day.minimum_hours {
            let requested_hours: f64 = times.hours();
            if requested_hours < minimum_hours {
                errors.push(DomainError::BelowMinimumHours {
                    minimum_hours,
                    requested_hours,
                });
            }
        }
    }

    if let Err(err) = validate_document(leave_type, request.document, request.total_days) {
        errors.push(err);
    }

    errors
}

/// Returns the leave types available to a user under each type's
/// availability rule.
#[must_use]
pub fn available_leave_types<'a>(user: &User, leave_types: &'a [LeaveType]) -> Vec<&'a LeaveType> {
    leave_types
        .iter()
        .filter(|leave_type| leave_type.available_for.permits(user))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{
        AccrualModel, AvailabilityRule, BookingPolicy, EmploymentType, LeaveTypeId,
        PartialDayPolicy, Role, StaffCategory, TilSettings, UserId, WorkSchedule,
    };
    use time::macros::{date, time};

    fn make_leave_type(booking: BookingPolicy, partial_day: PartialDayPolicy) -> LeaveType {
        LeaveType {
            id: LeaveTypeId::new(1),
            name: String::from("Annual Leave"),
            accrual: AccrualModel::Incremental {
                rate: 0.76923,
                period: crate::types::AccrualPeriod::Week,
            },
            use_full_day_allocation: false,
            available_for: AvailabilityRule::all(),
            requires_document: false,
            max_days_without_evidence: None,
            max_days_per_year: None,
            booking,
            partial_day,
        }
    }

    fn full_day_request(start_date: Date) -> BookingRequest<'static> {
        BookingRequest {
            start_date,
            times: None,
            document: None,
            total_days: 1.0,
        }
    }

    const TODAY: Date = date!(2023 - 07 - 01);

    #[test]
    fn test_advance_booking_disallowed() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(false, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        let result: Result<(), DomainError> =
            validate_booking(&full_day_request(date!(2023 - 07 - 10)), &leave_type, TODAY);
        assert!(matches!(
            result,
            Err(DomainError::AdvanceBookingDisallowed { .. })
        ));
    }

    #[test]
    fn test_today_is_not_advance() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(false, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        assert!(validate_booking(&full_day_request(TODAY), &leave_type, TODAY).is_ok());
    }

    #[test]
    fn test_retrospective_booking_disallowed() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, false, None),
            PartialDayPolicy::full_days_only(),
        );
        let result: Result<(), DomainError> =
            validate_booking(&full_day_request(date!(2023 - 06 - 20)), &leave_type, TODAY);
        assert!(matches!(
            result,
            Err(DomainError::RetrospectiveBookingDisallowed { .. })
        ));
    }

    #[test]
    fn test_advance_limit_boundary() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, Some(30), true, None),
            PartialDayPolicy::full_days_only(),
        );

        // Exactly at the limit is allowed.
        assert!(
            validate_booking(&full_day_request(date!(2023 - 07 - 31)), &leave_type, TODAY).is_ok()
        );

        // One day past the limit is not.
        let result: Result<(), DomainError> =
            validate_booking(&full_day_request(date!(2023 - 08 - 01)), &leave_type, TODAY);
        assert_eq!(
            result.unwrap_err(),
            DomainError::AdvanceLimitExceeded {
                max_advance_days: 30
            }
        );
    }

    #[test]
    fn test_partial_days_disallowed() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        let times: TimeRange = TimeRange::new(time!(09:00), time!(12:00));
        let request: BookingRequest<'_> = BookingRequest {
            start_date: TODAY,
            times: Some(&times),
            document: None,
            total_days: 0.5,
        };
        let result: Result<(), DomainError> = validate_booking(&request, &leave_type, TODAY);
        assert!(matches!(
            result,
            Err(DomainError::PartialDaysDisallowed { .. })
        ));
    }

    #[test]
    fn test_below_minimum_hours() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, true, None),
            PartialDayPolicy::new(true, Some(4.0)),
        );
        let times: TimeRange = TimeRange::new(time!(09:00), time!(11:00));
        let request: BookingRequest<'_> = BookingRequest {
            start_date: TODAY,
            times: Some(&times),
            document: None,
            total_days: 0.25,
        };
        let result: Result<(), DomainError> = validate_booking(&request, &leave_type, TODAY);
        assert_eq!(
            result.unwrap_err(),
            DomainError::BelowMinimumHours {
                minimum_hours: 4.0,
                requested_hours: 2.0
            }
        );
    }

    #[test]
    fn test_minimum_hours_met() {
        let leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, true, None),
            PartialDayPolicy::new(true, Some(4.0)),
        );
        let times: TimeRange = TimeRange::new(time!(09:00), time!(13:00));
        let request: BookingRequest<'_> = BookingRequest {
            start_date: TODAY,
            times: Some(&times),
            document: None,
            total_days: 0.5,
        };
        assert!(validate_booking(&request, &leave_type, TODAY).is_ok());
    }

    #[test]
    fn test_document_required() {
        let mut leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        leave_type.requires_document = true;

        let result: Result<(), DomainError> = validate_document(&leave_type, None, 2.0);
        assert!(matches!(result, Err(DomainError::DocumentRequired { .. })));

        let document: DocumentRef = DocumentRef::new("doc://medical-certificate-123");
        assert!(validate_document(&leave_type, Some(&document), 2.0).is_ok());
    }

    #[test]
    fn test_evidence_free_allowance_relaxes_document_requirement() {
        let mut leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        leave_type.requires_document = true;
        leave_type.max_days_without_evidence = Some(5.0);

        assert!(validate_document(&leave_type, None, 5.0).is_ok());
        assert!(matches!(
            validate_document(&leave_type, None, 5.5),
            Err(DomainError::DocumentRequired { .. })
        ));
    }

    #[test]
    fn test_validation_errors_collects_all() {
        let mut leave_type: LeaveType = make_leave_type(
            BookingPolicy::new(false, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        leave_type.requires_document = true;

        let times: TimeRange = TimeRange::new(time!(09:00), time!(10:00));
        let request: BookingRequest<'_> = BookingRequest {
            start_date: date!(2023 - 07 - 10),
            times: Some(&times),
            document: None,
            total_days: 0.2,
        };

        let errors: Vec<DomainError> = validation_errors(&request, &leave_type, TODAY);
        assert_eq!(errors.len(), 3);
        assert!(matches!(
            errors[0],
            DomainError::AdvanceBookingDisallowed { .. }
        ));
        assert!(matches!(
            errors[1],
            DomainError::PartialDaysDisallowed { .. }
        ));
        assert!(matches!(errors[2], DomainError::DocumentRequired { .. }));
    }

    #[test]
    fn test_available_leave_types_filters_by_rule() {
        let user: User = User::new(
            UserId::new(1),
            String::from("Jane Smith"),
            Role::Employee,
            StaffCategory::B,
            WorkSchedule::new(EmploymentType::PartTime, 0.5, Vec::new()).unwrap(),
            None,
            TilSettings::new(false, false),
        );

        let mut open: LeaveType = make_leave_type(
            BookingPolicy::new(true, None, true, None),
            PartialDayPolicy::full_days_only(),
        );
        open.id = LeaveTypeId::new(1);

        let mut restricted: LeaveType = open.clone();
        restricted.id = LeaveTypeId::new(2);
        restricted.available_for = AvailabilityRule::new(Vec::new(), vec![StaffCategory::A]);

        let types: Vec<LeaveType> = vec![open, restricted];
        let available: Vec<&LeaveType> = available_leave_types(&user, &types);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, LeaveTypeId::new(1));
    }
}
