// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Configuration validation and referential-integrity guards for leave
//! types and pools.

use crate::error::DomainError;
use crate::types::{AccrualModel, LeaveApplication, LeavePool, LeaveType, LeaveTypeId, PoolId};

/// Validates a leave type configuration before it is created or updated.
///
/// # Errors
///
/// Returns `InvalidLeaveType` for an empty name, a non-positive accrual
/// rate or allocation, or a non-positive partial-day minimum, and
/// `PoolNotFound` when a pooled type references a pool that does not
/// exist.
pub fn validate_leave_type(leave_type: &LeaveType, pools: &[LeavePool]) -> Result<(), DomainError> {
    if leave_type.name.trim().is_empty() {
        return Err(DomainError::InvalidLeaveType(String::from(
            "name must not be empty",
        )));
    }

    match &leave_type.accrual {
        AccrualModel::Incremental { rate, .. } => {
            if *rate <= 0.0 {
                return Err(DomainError::InvalidLeaveType(String::from(
                    "accrual rate must be positive",
                )));
            }
        }
        AccrualModel::Bulk {
            annual_allocation, ..
        } => {
            if *annual_allocation <= 0.0 {
                return Err(DomainError::InvalidLeaveType(String::from(
                    "annual allocation must be positive",
                )));
            }
        }
        AccrualModel::Pooled { pool } => {
            if !pools.iter().any(|p| p.id == *pool) {
                return Err(DomainError::PoolNotFound(pool.value()));
            }
        }
        AccrualModel::TimeInLieu => {}
    }

    if let Some(minimum) = leave_type.partial_day.minimum_hours
        && minimum <= 0.0
    {
        return Err(DomainError::InvalidLeaveType(String::from(
            "minimum partial-day hours must be positive",
        )));
    }

    if let Some(cap) = leave_type.max_days_per_year
        && cap < 0.0
    {
        return Err(DomainError::InvalidLeaveType(String::from(
            "yearly cap must not be negative",
        )));
    }

    Ok(())
}

/// Validates a leave pool configuration before it is created or updated.
///
/// # Errors
///
/// Returns `InvalidLeavePool` for an empty name or a non-positive annual
/// allocation.
pub fn validate_leave_pool(pool: &LeavePool) -> Result<(), DomainError> {
    if pool.name.trim().is_empty() {
        return Err(DomainError::InvalidLeavePool(String::from(
            "name must not be empty",
        )));
    }
    if pool.annual_allocation <= 0.0 {
        return Err(DomainError::InvalidLeavePool(String::from(
            "annual allocation must be positive",
        )));
    }
    Ok(())
}

/// Checks that a leave type has no active applications before deletion.
///
/// Only pending and approved applications block deletion; rejected and
/// withdrawn history does not.
///
/// # Errors
///
/// Returns `EntityInUse` with the count of active applications that
/// reference the type.
pub fn can_delete_leave_type(
    leave_type_id: LeaveTypeId,
    applications: &[LeaveApplication],
) -> Result<(), DomainError> {
    let references: usize = applications
        .iter()
        .filter(|app| app.leave_type_id == leave_type_id && app.status.is_active())
        .count();
    if references > 0 {
        return Err(DomainError::EntityInUse {
            entity: String::from("leave type"),
            references,
        });
    }
    Ok(())
}

/// Checks that no leave type draws from a pool before deletion.
///
/// # Errors
///
/// Returns `EntityInUse` with the count of leave types that reference the
/// pool.
pub fn can_delete_leave_pool(
    pool_id: PoolId,
    leave_types: &[LeaveType],
) -> Result<(), DomainError> {
    let references: usize = leave_types
        .iter()
        .filter(|lt| lt.pool_id() == Some(pool_id))
        .count();
    if references > 0 {
        return Err(DomainError::EntityInUse {
            entity: String::from("leave pool"),
            references,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{
        AccrualPeriod, ApplicationId, ApplicationStatus, AvailabilityRule, BookingPolicy,
        PartialDayPolicy, ResetDate, UserId,
    };
    use time::Month;
    use time::macros::date;

    fn make_type(name: &str, accrual: AccrualModel) -> LeaveType {
        LeaveType {
            id: LeaveTypeId::new(1),
            name: String::from(name),
            accrual,
            use_full_day_allocation: false,
            available_for: AvailabilityRule::all(),
            requires_document: false,
            max_days_without_evidence: None,
            max_days_per_year: None,
            booking: BookingPolicy::new(true, None, true, None),
            partial_day: PartialDayPolicy::full_days_only(),
        }
    }

    fn make_pool(id: i64, name: &str, allocation: f64) -> LeavePool {
        LeavePool {
            id: PoolId::new(id),
            name: String::from(name),
            annual_allocation: allocation,
            rollover: true,
            reset: ResetDate::new(Month::January, 1),
            available_for: AvailabilityRule::all(),
        }
    }

    fn make_application(leave_type: i64, status: ApplicationStatus) -> LeaveApplication {
        LeaveApplication {
            id: ApplicationId::new(1),
            user_id: UserId::new(2),
            leave_type_id: LeaveTypeId::new(leave_type),
            start_date: date!(2023 - 07 - 10),
            end_date: date!(2023 - 07 - 10),
            total_days: 1.0,
            status,
            times: None,
            document: None,
            notes: None,
            til_mode: None,
            decided_by: None,
            decided_on: None,
            created_on: date!(2023 - 07 - 01),
        }
    }

    #[test]
    fn test_valid_incremental_type() {
        let leave_type: LeaveType = make_type(
            "Annual Leave",
            AccrualModel::Incremental {
                rate: 0.76923,
                period: AccrualPeriod::Week,
            },
        );
        assert!(validate_leave_type(&leave_type, &[]).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let leave_type: LeaveType = make_type("  ", AccrualModel::TimeInLieu);
        assert!(matches!(
            validate_leave_type(&leave_type, &[]),
            Err(DomainError::InvalidLeaveType(_))
        ));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let leave_type: LeaveType = make_type(
            "Annual Leave",
            AccrualModel::Incremental {
                rate: 0.0,
                period: AccrualPeriod::Week,
            },
        );
        assert!(matches!(
            validate_leave_type(&leave_type, &[]),
            Err(DomainError::InvalidLeaveType(_))
        ));
    }

    #[test]
    fn test_pooled_type_requires_existing_pool() {
        let leave_type: LeaveType = make_type(
            "Sick Leave",
            AccrualModel::Pooled {
                pool: PoolId::new(1),
            },
        );
        assert_eq!(
            validate_leave_type(&leave_type, &[]).unwrap_err(),
            DomainError::PoolNotFound(1)
        );

        let pools: Vec<LeavePool> = vec![make_pool(1, "Personal/Carer's Leave Pool", 15.0)];
        assert!(validate_leave_type(&leave_type, &pools).is_ok());
    }

    #[test]
    fn test_nonpositive_minimum_hours_rejected() {
        let mut leave_type: LeaveType = make_type("Annual Leave", AccrualModel::TimeInLieu);
        leave_type.partial_day = PartialDayPolicy::new(true, Some(0.0));
        assert!(matches!(
            validate_leave_type(&leave_type, &[]),
            Err(DomainError::InvalidLeaveType(_))
        ));
    }

    #[test]
    fn test_pool_validation() {
        assert!(validate_leave_pool(&make_pool(1, "Pool", 15.0)).is_ok());
        assert!(matches!(
            validate_leave_pool(&make_pool(1, "", 15.0)),
            Err(DomainError::InvalidLeavePool(_))
        ));
        assert!(matches!(
            validate_leave_pool(&make_pool(1, "Pool", 0.0)),
            Err(DomainError::InvalidLeavePool(_))
        ));
    }

    #[test]
    fn test_type_with_active_applications_cannot_be_deleted() {
        let applications: Vec<LeaveApplication> = vec![
            make_application(1, ApplicationStatus::Pending),
            make_application(1, ApplicationStatus::Approved),
            make_application(1, ApplicationStatus::Rejected),
        ];
        assert_eq!(
            can_delete_leave_type(LeaveTypeId::new(1), &applications).unwrap_err(),
            DomainError::EntityInUse {
                entity: String::from("leave type"),
                references: 2
            }
        );
    }

    #[test]
    fn test_type_with_only_closed_applications_can_be_deleted() {
        let applications: Vec<LeaveApplication> = vec![
            make_application(1, ApplicationStatus::Rejected),
            make_application(1, ApplicationStatus::Withdrawn),
            make_application(9, ApplicationStatus::Pending),
        ];
        assert!(can_delete_leave_type(LeaveTypeId::new(1), &applications).is_ok());
    }

    #[test]
    fn test_pool_with_member_types_cannot_be_deleted() {
        let types: Vec<LeaveType> = vec![make_type(
            "Sick Leave",
            AccrualModel::Pooled {
                pool: PoolId::new(1),
            },
        )];
        assert_eq!(
            can_delete_leave_pool(PoolId::new(1), &types).unwrap_err(),
            DomainError::EntityInUse {
                entity: String::from("leave pool"),
                references: 1
            }
        );
        assert!(can_delete_leave_pool(PoolId::new(2), &types).is_ok());
    }
}
