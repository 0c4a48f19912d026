use bigdecimal::BigDecimal;
use serde::Serialize;

/// Per-user attendance aggregate over a date range. Pure read-model; an
/// empty range yields the all-zero snapshot.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_days: i64,
    pub late_days: i64,
    pub early_leave_days: i64,
    pub no_clock_out_days: i64,
    pub total_work_hours: f64,
    pub total_overtime_hours: f64,
}

impl AttendanceStats {
    pub fn zero() -> Self {
        Self {
            total_days: 0,
            late_days: 0,
            early_leave_days: 0,
            no_clock_out_days: 0,
            total_work_hours: 0.0,
            total_overtime_hours: 0.0,
        }
    }
}

/// Per-user overtime request aggregate over a date range.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeStats {
    pub total_requests: i64,
    pub approved_requests: i64,
    pub rejected_requests: i64,
    pub pending_requests: i64,
    pub cancelled_requests: i64,
    pub total_hours: f64,
    pub total_amount: BigDecimal,
}

impl OvertimeStats {
    pub fn zero() -> Self {
        Self {
            total_requests: 0,
            approved_requests: 0,
            rejected_requests: 0,
            pending_requests: 0,
            cancelled_requests: 0,
            total_hours: 0.0,
            total_amount: BigDecimal::from(0),
        }
    }
}
