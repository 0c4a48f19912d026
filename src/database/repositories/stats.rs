use sqlx::PgPool;

use crate::database::{
    models::{AttendanceStats, DateRange, OvertimeStats, UserId},
    utils::sql,
};
use crate::error::AppError;
use crate::services::stats::StatsStore;

#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StatsStore for StatsRepository {
    /// Single grouped aggregate over the ledger. COUNT/COALESCE make the
    /// empty range come back as the all-zero snapshot.
    async fn attendance_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<AttendanceStats, AppError> {
        let stats = sqlx::query_as::<_, AttendanceStats>(&sql(
            "SELECT
                COUNT(*) AS total_days,
                COUNT(*) FILTER (WHERE is_late) AS late_days,
                COUNT(*) FILTER (WHERE is_early_leave) AS early_leave_days,
                COUNT(*) FILTER (WHERE is_no_clock_out) AS no_clock_out_days,
                COALESCE(SUM(total_work_hours), 0)::DOUBLE PRECISION AS total_work_hours,
                COALESCE(SUM(total_overtime_hours), 0)::DOUBLE PRECISION AS total_overtime_hours
             FROM attendance_records
             WHERE user_id = ? AND date >= ? AND date <= ?",
        ))
        .bind(user_id)
        .bind(range.start.date_naive())
        .bind(range.end.date_naive())
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    async fn overtime_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<OvertimeStats, AppError> {
        let stats = sqlx::query_as::<_, OvertimeStats>(&sql(
            "SELECT
                COUNT(*) AS total_requests,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved_requests,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected_requests,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending_requests,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled_requests,
                COALESCE(SUM(total_hours), 0)::DOUBLE PRECISION AS total_hours,
                COALESCE(SUM(total_amount), 0) AS total_amount
             FROM overtime_requests
             WHERE user_id = ? AND overtime_date >= ? AND overtime_date <= ?",
        ))
        .bind(user_id)
        .bind(range.start.date_naive())
        .bind(range.end.date_naive())
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
