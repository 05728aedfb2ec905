// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::{Date, Month, Time, Weekday};

/// Represents a user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new `UserId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a leave type identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LeaveTypeId(i64);

impl LeaveTypeId {
    /// Creates a new `LeaveTypeId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LeaveTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a leave pool identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PoolId(i64);

impl PoolId {
    /// Creates a new `PoolId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a leave application identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Creates a new `ApplicationId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role a user holds within the system.
///
/// Roles are supplied by the identity collaborator and trusted as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular staff member: submits applications for themselves.
    Employee,
    /// Approves or rejects applications for their team.
    Manager,
    /// Full configuration and approval rights.
    Admin,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns whether this role may decide (approve/reject) applications.
    #[must_use]
    pub const fn can_decide(&self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }

    /// Returns whether this role has administrative rights.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staff category used by leave type availability rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffCategory {
    /// Category A.
    A,
    /// Category B.
    B,
    /// Category C.
    C,
}

impl StaffCategory {
    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl FromStr for StaffCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(DomainError::InvalidStaffCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for StaffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employment type used by leave type availability rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Full-time staff.
    FullTime,
    /// Part-time staff.
    PartTime,
    /// Casual staff.
    Casual,
}

impl EmploymentType {
    /// Converts this employment type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Casual => "casual",
        }
    }
}

impl FromStr for EmploymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(Self::FullTime),
            "part-time" => Ok(Self::PartTime),
            "casual" => Ok(Self::Casual),
            _ => Err(DomainError::InvalidEmploymentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single configured work day in a user's weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkDay {
    /// The weekday this entry applies to.
    pub weekday: Weekday,
    /// Scheduled hours for this weekday.
    pub hours: f64,
}

impl WorkDay {
    /// Creates a new `WorkDay`.
    #[must_use]
    pub const fn new(weekday: Weekday, hours: f64) -> Self {
        Self { weekday, hours }
    }
}

/// A user's weekly work schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// The employment type this schedule reflects.
    pub employment_type: EmploymentType,
    /// Fractional full-time-equivalent factor (0 < fte <= 1).
    pub fte: f64,
    /// The configured work days. Weekdays absent here are non-work days.
    pub work_days: Vec<WorkDay>,
}

impl WorkSchedule {
    /// Creates a new `WorkSchedule`.
    ///
    /// # Arguments
    ///
    /// * `employment_type` - The employment type
    /// * `fte` - Fractional full-time-equivalent factor
    /// * `work_days` - The configured work days
    ///
    /// # Errors
    ///
    /// Returns `InvalidFte` unless `0 < fte <= 1`.
    pub fn new(
        employment_type: EmploymentType,
        fte: f64,
        work_days: Vec<WorkDay>,
    ) -> Result<Self, DomainError> {
        if fte <= 0.0 || fte > 1.0 {
            return Err(DomainError::InvalidFte(fte));
        }
        Ok(Self {
            employment_type,
            fte,
            work_days,
        })
    }

    /// Returns the scheduled hours for a weekday, if it is a work day.
    #[must_use]
    pub fn hours_on(&self, weekday: Weekday) -> Option<f64> {
        self.work_days
            .iter()
            .find(|day| day.weekday == weekday)
            .map(|day| day.hours)
    }

    /// Returns whether the given weekday is a configured work day.
    #[must_use]
    pub fn is_work_day(&self, weekday: Weekday) -> bool {
        self.hours_on(weekday).is_some()
    }
}

/// Per-user time-in-lieu settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilSettings {
    /// Whether the user may accrue and take TIL at all.
    pub enabled: bool,
    /// Whether the user may log TIL work retrospectively.
    pub allow_retrospective: bool,
}

impl TilSettings {
    /// Creates new `TilSettings`.
    #[must_use]
    pub const fn new(enabled: bool, allow_retrospective: bool) -> Self {
        Self {
            enabled,
            allow_retrospective,
        }
    }
}

/// A user of the leave system.
///
/// Users are owned by the identity collaborator; the engine only references
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's identifier.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
    /// The user's role.
    pub role: Role,
    /// The user's staff category.
    pub category: StaffCategory,
    /// The user's weekly work schedule.
    pub work_schedule: WorkSchedule,
    /// The manager this user reports to, if any.
    pub reports_to: Option<UserId>,
    /// The user's TIL settings.
    pub til_settings: TilSettings,
}

impl User {
    /// Creates a new `User`.
    #[must_use]
    pub const fn new(
        id: UserId,
        name: String,
        role: Role,
        category: StaffCategory,
        work_schedule: WorkSchedule,
        reports_to: Option<UserId>,
        til_settings: TilSettings,
    ) -> Self {
        Self {
            id,
            name,
            role,
            category,
            work_schedule,
            reports_to,
            til_settings,
        }
    }
}

/// The accrual period for incremental leave types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualPeriod {
    /// Accrues once per week.
    Week,
    /// Accrues once per month.
    Month,
    /// Accrues once per year.
    Year,
}

/// An annual reset date (month and day) for bulk allocations and pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetDate {
    /// The month of the reset.
    pub month: Month,
    /// The day of the month of the reset.
    pub day: u8,
}

impl ResetDate {
    /// Creates a new `ResetDate`.
    #[must_use]
    pub const fn new(month: Month, day: u8) -> Self {
        Self { month, day }
    }
}

/// How a leave type's balance accrues.
///
/// Time-in-lieu is an explicit variant here rather than a reserved numeric
/// type id, so TIL handling never depends on identifier coupling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AccrualModel {
    /// Accrues at a fixed rate per period.
    Incremental {
        /// Days accrued per period.
        rate: f64,
        /// The accrual period.
        period: AccrualPeriod,
    },
    /// Allocated in full once per year.
    Bulk {
        /// Days allocated per year.
        annual_allocation: f64,
        /// When the allocation resets.
        reset: ResetDate,
    },
    /// Draws from a shared leave pool.
    Pooled {
        /// The pool this type draws from.
        pool: PoolId,
    },
    /// Time in lieu: accrues from logged extra hours worked.
    TimeInLieu,
}

impl AccrualModel {
    /// Returns the referenced pool, if this model is pooled.
    #[must_use]
    pub const fn pool_id(&self) -> Option<PoolId> {
        match self {
            Self::Pooled { pool } => Some(*pool),
            _ => None,
        }
    }

    /// Returns whether this model is time in lieu.
    #[must_use]
    pub const fn is_til(&self) -> bool {
        matches!(self, Self::TimeInLieu)
    }
}

/// Restricts which users a leave type or pool is available to.
///
/// Empty lists mean "no restriction" for that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    /// Employment types this is available to. Empty means all.
    pub employment_types: Vec<EmploymentType>,
    /// Staff categories this is available to. Empty means all.
    pub categories: Vec<StaffCategory>,
}

impl AvailabilityRule {
    /// Creates a new `AvailabilityRule`.
    #[must_use]
    pub const fn new(
        employment_types: Vec<EmploymentType>,
        categories: Vec<StaffCategory>,
    ) -> Self {
        Self {
            employment_types,
            categories,
        }
    }

    /// An unrestricted rule.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            employment_types: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Returns whether the rule admits the given user.
    #[must_use]
    pub fn permits(&self, user: &User) -> bool {
        let employment_ok: bool = self.employment_types.is_empty()
            || self
                .employment_types
                .contains(&user.work_schedule.employment_type);
        let category_ok: bool =
            self.categories.is_empty() || self.categories.contains(&user.category);
        employment_ok && category_ok
    }
}

/// Booking window policy for a leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPolicy {
    /// Whether the type may be booked for future dates.
    pub allow_advance_booking: bool,
    /// Maximum days ahead a booking may start.
    pub max_advance_days: Option<i64>,
    /// Whether the type may be booked for past dates.
    pub allow_retrospective: bool,
    /// Maximum days in the past a booking may start.
    pub max_retrospective_days: Option<i64>,
}

impl BookingPolicy {
    /// Creates a new `BookingPolicy`.
    #[must_use]
    pub const fn new(
        allow_advance_booking: bool,
        max_advance_days: Option<i64>,
        allow_retrospective: bool,
        max_retrospective_days: Option<i64>,
    ) -> Self {
        Self {
            allow_advance_booking,
            max_advance_days,
            allow_retrospective,
            max_retrospective_days,
        }
    }
}

/// Partial-day policy for a leave type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialDayPolicy {
    /// Whether partial-day bookings are permitted.
    pub allow_partial_days: bool,
    /// Minimum hours for a partial-day booking, when set.
    pub minimum_hours: Option<f64>,
}

impl PartialDayPolicy {
    /// Creates a new `PartialDayPolicy`.
    #[must_use]
    pub const fn new(allow_partial_days: bool, minimum_hours: Option<f64>) -> Self {
        Self {
            allow_partial_days,
            minimum_hours,
        }
    }

    /// Full days only.
    #[must_use]
    pub const fn full_days_only() -> Self {
        Self {
            allow_partial_days: false,
            minimum_hours: None,
        }
    }
}

/// A category of absence with its own accrual and eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    /// The leave type identifier.
    pub id: LeaveTypeId,
    /// The leave type name.
    pub name: String,
    /// How the balance accrues.
    pub accrual: AccrualModel,
    /// When true, balances are never FTE-scaled at read time.
    pub use_full_day_allocation: bool,
    /// Who this type is available to.
    pub available_for: AvailabilityRule,
    /// Whether supporting evidence is required.
    pub requires_document: bool,
    /// Days per year bookable without evidence, relaxing `requires_document`.
    pub max_days_without_evidence: Option<f64>,
    /// Per-type yearly cap within a pool.
    pub max_days_per_year: Option<f64>,
    /// Booking window policy.
    pub booking: BookingPolicy,
    /// Partial-day policy.
    pub partial_day: PartialDayPolicy,
}

impl LeaveType {
    /// Returns the pool this type draws from, if pooled.
    #[must_use]
    pub const fn pool_id(&self) -> Option<PoolId> {
        self.accrual.pool_id()
    }

    /// Returns whether this type is time in lieu.
    #[must_use]
    pub const fn is_til(&self) -> bool {
        self.accrual.is_til()
    }
}

/// A shared balance consumed by multiple leave types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePool {
    /// The pool identifier.
    pub id: PoolId,
    /// The pool name.
    pub name: String,
    /// Days allocated per year.
    pub annual_allocation: f64,
    /// Whether unused balance rolls over at reset.
    pub rollover: bool,
    /// When the allocation resets.
    pub reset: ResetDate,
    /// Who this pool is available to.
    pub available_for: AvailabilityRule,
}

/// The lifecycle status of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApplicationStatus {
    /// Awaiting a manager/admin decision. Balances untouched.
    #[default]
    Pending,
    /// Approved. The balance debit has been applied.
    Approved,
    /// Rejected. Terminal unless re-rejected (a no-op).
    Rejected,
    /// Withdrawn by the applicant. Terminal.
    Withdrawn,
}

impl ApplicationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns whether this status still counts against configuration
    /// changes (deletion guards).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved | Rejected | Withdrawn
    /// - Approved → Rejected | Withdrawn (with balance re-credit)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::Approved | Self::Rejected | Self::Withdrawn
            ) | (Self::Approved, Self::Rejected | Self::Withdrawn)
        )
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A partial-day time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time of the partial day.
    pub start_time: Time,
    /// End time of the partial day.
    pub end_time: Time,
}

impl TimeRange {
    /// Creates a new `TimeRange`.
    #[must_use]
    pub const fn new(start_time: Time, end_time: Time) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Elapsed hours between start and end. May be zero or negative for an
    /// inverted range; callers validate.
    #[must_use]
    pub fn hours(&self) -> f64 {
        (self.end_time - self.start_time).as_seconds_f64() / 3600.0
    }
}

/// An opaque reference to an uploaded document.
///
/// The document store collaborator produces these; the engine never
/// inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef(String);

impl DocumentRef {
    /// Creates a new `DocumentRef`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the reference value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// The mode of a time-in-lieu application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TilMode {
    /// Logging extra hours worked, to accrue TIL.
    Work,
    /// Requesting to take accrued TIL as leave.
    Take,
}

impl TilMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Take => "take",
        }
    }
}

impl std::fmt::Display for TilMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A leave application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// The application identifier.
    pub id: ApplicationId,
    /// The applicant.
    pub user_id: UserId,
    /// The leave type applied for.
    pub leave_type_id: LeaveTypeId,
    /// First day of leave (inclusive).
    pub start_date: Date,
    /// Last day of leave (inclusive).
    pub end_date: Date,
    /// Duration in days. For TIL this is hours / 8.
    pub total_days: f64,
    /// Current lifecycle status.
    pub status: ApplicationStatus,
    /// Partial-day time range, when applicable.
    pub times: Option<TimeRange>,
    /// Supporting document reference, when attached.
    pub document: Option<DocumentRef>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// TIL mode for TIL applications; `None` for ordinary leave.
    pub til_mode: Option<TilMode>,
    /// Who decided the application, once decided.
    pub decided_by: Option<UserId>,
    /// When the application was decided.
    pub decided_on: Option<Date>,
    /// When the application was created.
    pub created_on: Date,
}

impl LeaveApplication {
    /// Returns the hours this application represents, using the 8-hour day
    /// convention TIL totals are stored in.
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.total_days * 8.0
    }
}

/// A single entry in a TIL accrual or usage ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilLedgerEntry {
    /// The date of the entry.
    pub date: Date,
    /// Hours accrued or used. Reversals are recorded as negative hours.
    pub hours: f64,
    /// Optional note describing the entry.
    pub note: Option<String>,
}

impl TilLedgerEntry {
    /// Creates a new `TilLedgerEntry`.
    #[must_use]
    pub const fn new(date: Date, hours: f64, note: Option<String>) -> Self {
        Self { date, hours, note }
    }
}

/// A user's time-in-lieu balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilBalance {
    /// The user this balance belongs to.
    pub user_id: UserId,
    /// Spendable hours.
    pub balance: f64,
    /// Hours logged but not yet approved.
    pub pending_accrual: f64,
    /// Ordered accrual history.
    pub accrual_history: Vec<TilLedgerEntry>,
    /// Ordered usage history.
    pub usage_history: Vec<TilLedgerEntry>,
}

impl TilBalance {
    /// Creates an empty TIL balance for a user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: 0.0,
            pending_accrual: 0.0,
            accrual_history: Vec::new(),
            usage_history: Vec::new(),
        }
    }
}

/// Process-wide time-in-lieu policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalTilSettings {
    /// Hours credited per hour worked.
    pub accrual_ratio: f64,
    /// Hours debited per hour taken.
    pub usage_ratio: f64,
    /// Window after which accrued-but-unused hours are flagged.
    pub expiry_days: i64,
}

impl Default for GlobalTilSettings {
    fn default() -> Self {
        Self {
            accrual_ratio: 1.5,
            usage_ratio: 1.0,
            expiry_days: 90,
        }
    }
}

/// A stored leave balance: either tied to a single leave type, or a pooled
/// balance shared by every type drawing from the pool.
///
/// Stored balances are raw; FTE scaling is applied at read time by the
/// balance resolver and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeaveBalance {
    /// A balance owned by a single leave type.
    Independent {
        /// The user this balance belongs to.
        user_id: UserId,
        /// The leave type this balance belongs to.
        leave_type_id: LeaveTypeId,
        /// Remaining days.
        balance: f64,
    },
    /// A shared pool balance with per-type usage tracking.
    Pooled {
        /// The user this balance belongs to.
        user_id: UserId,
        /// The pool this balance draws from.
        pool_id: PoolId,
        /// The pool allocation in days. Remaining capacity is
        /// `balance - sum(usage_by_type)`.
        balance: f64,
        /// Days used per leave type this year.
        usage_by_type: BTreeMap<LeaveTypeId, f64>,
    },
}

impl LeaveBalance {
    /// Returns the user this balance belongs to.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        match self {
            Self::Independent { user_id, .. } | Self::Pooled { user_id, .. } => *user_id,
        }
    }

    /// Returns whether this is the independent balance for the given user
    /// and leave type.
    #[must_use]
    pub fn is_for_type(&self, user: UserId, leave_type: LeaveTypeId) -> bool {
        matches!(
            self,
            Self::Independent {
                user_id,
                leave_type_id,
                ..
            } if *user_id == user && *leave_type_id == leave_type
        )
    }

    /// Returns whether this is the pooled balance for the given user and
    /// pool.
    #[must_use]
    pub fn is_for_pool(&self, user: UserId, pool: PoolId) -> bool {
        matches!(
            self,
            Self::Pooled { user_id, pool_id, .. } if *user_id == user && *pool_id == pool
        )
    }
}
