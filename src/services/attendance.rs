use std::sync::Arc;

use chrono::NaiveDate;

use crate::database::models::{
    AttendanceRecord, ClockOutPatch, DateRange, Page, PageQuery, UserId, workday_end,
};
use crate::error::AppError;
use crate::services::clock::Clock;
use crate::services::directory::EmployeeDirectory;

/// Persistence contract for the attendance ledger.
///
/// `insert` must rely on the storage-level `(user_id, date)` uniqueness
/// constraint and translate a violation into `DuplicateClockIn`. `close` must
/// be a single conditional update guarded by `clock_out_time IS NULL`,
/// computing `total_work_hours` against the stored clock-in inside the same
/// statement, and return `None` when no open record matched.
pub trait AttendanceStore: Send + Sync {
    fn insert(
        &self,
        record: AttendanceRecord,
    ) -> impl Future<Output = Result<AttendanceRecord, AppError>> + Send;

    fn find_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<AttendanceRecord>, AppError>> + Send;

    fn close(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        patch: ClockOutPatch,
    ) -> impl Future<Output = Result<Option<AttendanceRecord>, AppError>> + Send;

    fn list_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> impl Future<Output = Result<Page<AttendanceRecord>, AppError>> + Send;
}

/// Owns the per-user, per-day clock-in/out state machine.
pub struct AttendanceTracker<S> {
    store: S,
    clock: Arc<dyn Clock>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl<S: AttendanceStore> AttendanceTracker<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self {
            store,
            clock,
            directory,
        }
    }

    /// Open today's ledger entry for the user.
    ///
    /// There is deliberately no existence pre-check: concurrent clock-ins
    /// race on the uniqueness constraint and exactly one wins, the rest get
    /// `DuplicateClockIn`.
    pub async fn clock_in(
        &self,
        user_id: &UserId,
        notes: Option<String>,
    ) -> Result<AttendanceRecord, AppError> {
        let now = self.clock.now();
        let record = AttendanceRecord::open(user_id.clone(), now, notes);
        let created = self.store.insert(record).await?;

        // Fire-and-forget: the directory is allowed to fail independently of
        // the clock-in result.
        if let Err(err) = self.directory.record_clock_in(user_id.clone(), now).await {
            log::warn!("failed to push last_clocked_in for {}: {}", user_id, err);
        }

        Ok(created)
    }

    /// Close today's ledger entry.
    ///
    /// The close is one conditional update; when it misses we look the record
    /// up to tell `AlreadyClockedOut` apart from `NoActiveClockIn`.
    pub async fn clock_out(
        &self,
        user_id: &UserId,
        notes: Option<String>,
    ) -> Result<AttendanceRecord, AppError> {
        let now = self.clock.now();
        let today = now.date_naive();
        let patch = ClockOutPatch {
            clock_out_time: now,
            is_early_leave: now.time() < workday_end(),
            notes,
        };

        match self.store.close(user_id, today, patch).await? {
            Some(record) => Ok(record),
            None => match self.store.find_for_day(user_id, today).await? {
                Some(_) => Err(AppError::AlreadyClockedOut),
                None => Err(AppError::NoActiveClockIn),
            },
        }
    }

    /// Ledger entries whose date falls inside the range, newest date first.
    pub async fn history(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<AttendanceRecord>, AppError> {
        self.store.list_range(user_id, range, page).await
    }
}
