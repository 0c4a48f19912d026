use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::UserId;
use super::macros::string_enum;

/// Start of the standard workday; clocking in strictly after this is late.
pub fn workday_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

/// End of the standard workday; clocking out strictly before this is an
/// early leave.
pub fn workday_end() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap()
}

/// Fixed lunch window, noon to 1pm. Computed, never stored.
pub fn break_window() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
    )
}

const DEFAULT_BREAK_HOURS: f64 = 1.0;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        HalfDay => "half_day",
        DayOff => "day_off",
        SickLeave => "sick_leave",
        Vacation => "vacation",
    }
}

/// One user's clock-in/out ledger entry for a single calendar day.
///
/// Created only by clock-in, mutated exactly once by clock-out, never
/// deleted. `total_work_hours` is set iff `clock_out_time` is set.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub clock_in_time: DateTime<Utc>,
    pub clock_out_time: Option<DateTime<Utc>>,
    pub overtime_start_time: Option<DateTime<Utc>>,
    pub overtime_end_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub total_work_hours: Option<f64>,
    pub total_break_hours: f64,
    pub total_overtime_hours: Option<f64>,
    pub is_late: bool,
    pub is_early_leave: bool,
    pub is_no_clock_out: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Build the open ledger entry for a clock-in at `now`.
    pub fn open(user_id: UserId, now: DateTime<Utc>, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date: now.date_naive(),
            clock_in_time: now,
            clock_out_time: None,
            overtime_start_time: None,
            overtime_end_time: None,
            status: AttendanceStatus::Present,
            total_work_hours: None,
            total_break_hours: DEFAULT_BREAK_HOURS,
            total_overtime_hours: None,
            is_late: now.time() > workday_start(),
            is_early_leave: false,
            is_no_clock_out: false,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hours worked net of the break allowance. Derived view, not persisted.
    pub fn net_work_hours(&self) -> Option<f64> {
        self.total_work_hours
            .map(|h| (h - self.total_break_hours).max(0.0))
    }
}

/// Fields applied by the atomic close-out update. `total_work_hours` is
/// computed against the stored `clock_in_time` inside the same statement.
#[derive(Debug, Clone)]
pub struct ClockOutPatch {
    pub clock_out_time: DateTime<Utc>,
    pub is_early_leave: bool,
    pub notes: Option<String>,
}
