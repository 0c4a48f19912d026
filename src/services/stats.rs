use crate::database::models::{AttendanceStats, DateRange, OvertimeStats, UserId};
use crate::error::AppError;

/// Grouped count/sum aggregation pushed down to the persistence layer.
///
/// Both queries must treat unset sums as zero so an empty range produces the
/// all-zero snapshot rather than an error.
pub trait StatsStore: Send + Sync {
    fn attendance_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> impl Future<Output = Result<AttendanceStats, AppError>> + Send;

    fn overtime_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> impl Future<Output = Result<OvertimeStats, AppError>> + Send;
}

/// Best-effort point-in-time summaries over the persisted records; reads are
/// not isolated from concurrent writes.
pub struct StatsAggregator<S> {
    store: S,
}

impl<S: StatsStore> StatsAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn attendance_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<AttendanceStats, AppError> {
        self.store.attendance_stats(user_id, range).await
    }

    pub async fn overtime_stats(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<OvertimeStats, AppError> {
        self.store.overtime_stats(user_id, range).await
    }
}
