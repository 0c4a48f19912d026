use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::{
    models::{AttendanceRecord, ClockOutPatch, DateRange, Page, PageQuery, UserId},
    utils::sql,
};
use crate::error::AppError;
use crate::services::attendance::AttendanceStore;

const COLUMNS: &str = "id, user_id, date, clock_in_time, clock_out_time, \
    overtime_start_time, overtime_end_time, status, total_work_hours, \
    total_break_hours, total_overtime_hours, is_late, is_early_leave, \
    is_no_clock_out, notes, created_at, updated_at";

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AttendanceStore for AttendanceRepository {
    /// Create today's ledger entry. Uniqueness of (user_id, date) is enforced
    /// by the table constraint; a violation is the losing side of a
    /// concurrent clock-in and becomes `DuplicateClockIn`.
    async fn insert(&self, record: AttendanceRecord) -> Result<AttendanceRecord, AppError> {
        let query = format!(
            "INSERT INTO attendance_records ({COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );

        let result = sqlx::query_as::<_, AttendanceRecord>(&sql(&query))
            .bind(record.id)
            .bind(&record.user_id)
            .bind(record.date)
            .bind(record.clock_in_time)
            .bind(record.clock_out_time)
            .bind(record.overtime_start_time)
            .bind(record.overtime_end_time)
            .bind(record.status)
            .bind(record.total_work_hours)
            .bind(record.total_break_hours)
            .bind(record.total_overtime_hours)
            .bind(record.is_late)
            .bind(record.is_early_leave)
            .bind(record.is_no_clock_out)
            .bind(&record.notes)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateClockIn)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn find_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records WHERE user_id = ? AND date = ?"
        );

        let record = sqlx::query_as::<_, AttendanceRecord>(&sql(&query))
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Close the open entry in one conditional update. The work-hour total is
    /// the whole-hour (truncated) difference, computed against the stored
    /// clock-in inside the statement so concurrent clock-outs cannot both
    /// match; the loser sees no row and gets `None`.
    async fn close(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        patch: ClockOutPatch,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let query = format!(
            "UPDATE attendance_records
             SET clock_out_time = ?,
                 is_early_leave = ?,
                 total_work_hours = FLOOR(EXTRACT(EPOCH FROM (? - clock_in_time)) / 3600)::DOUBLE PRECISION,
                 notes = COALESCE(?, notes),
                 updated_at = ?
             WHERE user_id = ? AND date = ? AND clock_out_time IS NULL
             RETURNING {COLUMNS}"
        );

        let record = sqlx::query_as::<_, AttendanceRecord>(&sql(&query))
            .bind(patch.clock_out_time)
            .bind(patch.is_early_leave)
            .bind(patch.clock_out_time)
            .bind(&patch.notes)
            .bind(patch.clock_out_time)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<AttendanceRecord>, AppError> {
        let start = range.start.date_naive();
        let end = range.end.date_naive();

        let total_count: i64 = sqlx::query_scalar(&sql(
            "SELECT COUNT(*) FROM attendance_records
             WHERE user_id = ? AND date >= ? AND date <= ?",
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records
             WHERE user_id = ? AND date >= ? AND date <= ?
             ORDER BY date DESC
             LIMIT ? OFFSET ?"
        );

        let items = sqlx::query_as::<_, AttendanceRecord>(&sql(&query))
            .bind(user_id)
            .bind(start)
            .bind(end)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page { items, total_count })
    }
}
