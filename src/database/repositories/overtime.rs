use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{DateRange, OvertimeRequest, Page, PageQuery, RequestStatus, UserId},
    utils::sql,
};
use crate::error::AppError;
use crate::services::workflow::{Decision, RequestStore};

const COLUMNS: &str = "id, user_id, overtime_date, start_time, end_time, \
    request_type, status, reason, total_hours, hourly_rate, total_amount, \
    is_paid, paid_at, approved_by, approved_at, rejection_reason, \
    created_at, updated_at";

#[derive(Clone)]
pub struct OvertimeRepository {
    pool: PgPool,
}

impl OvertimeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl RequestStore<OvertimeRequest> for OvertimeRepository {
    async fn insert(&self, record: OvertimeRequest) -> Result<OvertimeRequest, AppError> {
        let query = format!(
            "INSERT INTO overtime_requests ({COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );

        let created = sqlx::query_as::<_, OvertimeRequest>(&sql(&query))
            .bind(record.id)
            .bind(&record.user_id)
            .bind(record.overtime_date)
            .bind(record.start_time)
            .bind(record.end_time)
            .bind(record.request_type)
            .bind(record.status)
            .bind(&record.reason)
            .bind(record.total_hours)
            .bind(&record.hourly_rate)
            .bind(&record.total_amount)
            .bind(record.is_paid)
            .bind(record.paid_at)
            .bind(&record.approved_by)
            .bind(record.approved_at)
            .bind(&record.rejection_reason)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find(&self, id: Uuid) -> Result<Option<OvertimeRequest>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM overtime_requests WHERE id = ?");

        let request = sqlx::query_as::<_, OvertimeRequest>(&sql(&query))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn decide(
        &self,
        id: Uuid,
        decision: Decision,
    ) -> Result<Option<OvertimeRequest>, AppError> {
        let query = format!(
            "UPDATE overtime_requests
             SET status = ?, approved_by = ?, approved_at = ?, rejection_reason = ?, updated_at = ?
             WHERE id = ? AND status = ?
             RETURNING {COLUMNS}"
        );

        let request = sqlx::query_as::<_, OvertimeRequest>(&sql(&query))
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
    ) -> Result<Option<OvertimeRequest>, AppError> {
        let query = format!(
            "UPDATE overtime_requests
             SET status = ?, updated_at = ?
             WHERE id = ? AND user_id = ? AND status = ?
             RETURNING {COLUMNS}"
        );

        let request = sqlx::query_as::<_, OvertimeRequest>(&sql(&query))
            .bind(RequestStatus::Cancelled)
            .bind(now)
            .bind(id)
            .bind(user_id)
            .bind(RequestStatus::Pending)
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    async fn list_overlapping(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<OvertimeRequest>, AppError> {
        let total_count: i64 = sqlx::query_scalar(&sql(
            "SELECT COUNT(*) FROM overtime_requests
             WHERE user_id = ? AND start_time <= ? AND end_time >= ?",
        ))
        .bind(user_id)
        .bind(range.end)
        .bind(range.start)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM overtime_requests
             WHERE user_id = ? AND start_time <= ? AND end_time >= ?
             ORDER BY created_at DESC
             LIMIT ? OFFSET ?"
        );

        let items = sqlx::query_as::<_, OvertimeRequest>(&sql(&query))
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
