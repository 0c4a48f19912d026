use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{DateRange, Page, PageQuery, RequestStatus, TimeOffRequest, UserId},
    utils::sql,
};
use crate::error::AppError;
use crate::services::workflow::{Decision, RequestStore};

const COLUMNS: &str = "id, user_id, start_date, end_date, request_type, status, \
    reason, total_days, total_hours, approved_by, approved_at, rejection_reason, \
    attachment_id, is_half_day, half_day_type, created_at, updated_at";

#[derive(Clone)]
pub struct TimeOffRepository {
    pool: PgPool,
}

impl TimeOffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RequestStore<TimeOffRequest> for TimeOffRepository {
    async fn insert(&self, record: TimeOffRequest) -> Result<TimeOffRequest, AppError> {
        let query = format!(
            "INSERT INTO time_off_requests ({COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );

        let created = sqlx::query_as::<_, TimeOffRequest>(&sql(&query))
            .bind(record.id)
            .bind(&record.user_id)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(record.request_type)
            .bind(record.status)
            .bind(&record.reason)
            .bind(record.total_days)
            .bind(record.total_hours)
            .bind(&record.approved_by)
            .bind(record.approved_at)
            .bind(&record.rejection_reason)
            .bind(&record.attachment_id)
            .bind(record.is_half_day)
            .bind(record.half_day_type)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find(&self, id: Uuid) -> Result<Option<TimeOffRequest>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM time_off_requests WHERE id = ?");

        let request = sqlx::query_as::<_, TimeOffRequest>(&sql(&query))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    /// Terminal transition guarded by `status = 'pending'`; a concurrent
    /// decision already applied leaves no matching row and yields `None`.
    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
    ) -> Result<Option<TimeOffRequest>, AppError> {
        let query = format!(
            "UPDATE time_off_requests
             SET status = ?, approved_by = ?, approved_at = ?, rejection_reason = ?, updated_at = ?
             WHERE id = ? AND status = ?
             RETURNING {COLUMNS}"
        );

        let request = sqlx::query_as::<_, TimeOffRequest>(&sql(&query))
            .bind(decision.status)
            .bind(&decision.approved_by)
            .bind(decision.approved_at)
            .bind(&decision.rejection_reason)
            .bind(decision.approved_at)
            .bind(id)
            .bind(RequestStatus::Pending)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn cancel(
        &self,
        id: Uuid,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<TimeOffRequest>, AppError> {
        let query = format!(
            "UPDATE time_off_requests
             SET status = ?, updated_at = ?
             WHERE id = ? AND user_id = ? AND status = ?
             RETURNING {COLUMNS}"
        );

        let request = sqlx::query_as::<_, TimeOffRequest>(&sql(&query))
            .bind(RequestStatus::Cancelled)
            .bind(now)
            .bind(id)
            .bind(user_id)
            .bind(RequestStatus::Pending)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    /// Inclusive-endpoint overlap with the reporting window; same predicate
    /// as `services::overlap::overlaps`.
    async fn list_overlapping(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<TimeOffRequest>, AppError> {
        let total_count: i64 = sqlx::query_scalar(&sql(
            "SELECT COUNT(*) FROM time_off_requests
             WHERE user_id = ? AND start_date <= ? AND end_date >= ?",
        ))
        .bind(user_id)
        .bind(range.end)
        .bind(range.start)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM time_off_requests
             WHERE user_id = ? AND start_date <= ? AND end_date >= ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        );

        let items = sqlx::query_as::<_, TimeOffRequest>(&sql(&query))
            .bind(user_id)
            .bind(range.end)
            .bind(range.start)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page { items, total_count })
    }
}
