// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use leavedesk_domain::{
    AccrualModel, AccrualPeriod, AvailabilityRule, BookingPolicy, EmploymentType, LeaveBalance,
    LeavePool, LeaveType, LeaveTypeId, PartialDayPolicy, PoolId, ResetDate, Role, StaffCategory,
    TilSettings, User, UserId, WorkDay, WorkSchedule,
};
use time::macros::date;
use time::{Date, Month, Weekday};

pub const TODAY: Date = date!(2023 - 07 - 01);

pub fn full_time_schedule() -> WorkSchedule {
    WorkSchedule::new(
        EmploymentType::FullTime,
        1.0,
        vec![
            WorkDay::new(Weekday::Monday, 7.6),
            WorkDay::new(Weekday::Tuesday, 7.6),
            WorkDay::new(Weekday::Wednesday, 7.6),
            WorkDay::new(Weekday::Thursday, 7.6),
            WorkDay::new(Weekday::Friday, 7.6),
        ],
    )
    .unwrap()
}

pub fn test_user(id: i64, role: Role) -> User {
    User::new(
        UserId::new(id),
        format!("User {id}"),
        role,
        StaffCategory::A,
        full_time_schedule(),
        None,
        TilSettings::new(true, true),
    )
}

pub fn annual_leave_type(id: i64) -> LeaveType {
    LeaveType {
        id: LeaveTypeId::new(id),
        name: String::from("Annual Leave"),
        accrual: AccrualModel::Incremental {
            rate: 0.76923,
            period: AccrualPeriod::Week,
        },
        use_full_day_allocation: false,
        available_for: AvailabilityRule::all(),
        requires_document: false,
        max_days_without_evidence: None,
        max_days_per_year: None,
        booking: BookingPolicy::new(true, None, true, None),
        partial_day: PartialDayPolicy::new(true, None),
    }
}

pub fn pooled_leave_type(id: i64, pool: i64) -> LeaveType {
    LeaveType {
        id: LeaveTypeId::new(id),
        name: format!("Pooled Leave {id}"),
        accrual: AccrualModel::Pooled {
            pool: PoolId::new(pool),
        },
        use_full_day_allocation: false,
        available_for: AvailabilityRule::all(),
        requires_document: false,
        max_days_without_evidence: None,
        max_days_per_year: None,
        booking: BookingPolicy::new(true, None, true, None),
        partial_day: PartialDayPolicy::full_days_only(),
    }
}

pub fn til_leave_type(id: i64) -> LeaveType {
    LeaveType {
        id: LeaveTypeId::new(id),
        name: String::from("Time in Lieu"),
        accrual: AccrualModel::TimeInLieu,
        use_full_day_allocation: false,
        available_for: AvailabilityRule::all(),
        requires_document: false,
        max_days_without_evidence: None,
        max_days_per_year: None,
        booking: BookingPolicy::new(true, None, true, None),
        partial_day: PartialDayPolicy::new(true, None),
    }
}

pub fn test_pool(id: i64) -> LeavePool {
    LeavePool {
        id: PoolId::new(id),
        name: String::from("Personal/Carer's Leave Pool"),
        annual_allocation: 15.0,
        rollover: true,
        reset: ResetDate::new(Month::January, 1),
        available_for: AvailabilityRule::all(),
    }
}

/// A state with an admin (1), an employee (2), a manager (3), an annual
/// leave type (1), and 10 days of stored balance for the employee.
pub fn base_state() -> State {
    let mut state: State = State::new();
    state.users = vec![
        test_user(1, Role::Admin),
        test_user(2, Role::Employee),
        test_user(3, Role::Manager),
    ];
    state.leave_types = vec![annual_leave_type(1)];
    state.balances = vec![LeaveBalance::Independent {
        user_id: UserId::new(2),
        leave_type_id: LeaveTypeId::new(1),
        balance: 10.0,
    }];
    state
}

pub fn admin(state: &State) -> User {
    state.user(UserId::new(1)).unwrap().clone()
}

pub fn employee(state: &State) -> User {
    state.user(UserId::new(2)).unwrap().clone()
}

pub fn manager(state: &State) -> User {
    state.user(UserId::new(3)).unwrap().clone()
}
