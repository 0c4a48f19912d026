pub mod config;
pub mod database;
pub mod error;
pub mod response;
pub mod services;

pub use config::Config;
pub use database::repositories::{
    AttendanceRepository, OvertimeRepository, StatsRepository, TimeOffRepository,
};
pub use error::AppError;
pub use response::ApiResponse;
pub use services::{
    AttendanceTracker, Clock, EmployeeDirectory, OvertimePolicy, RequestWorkflow, StatsAggregator,
    SystemClock, TimeOffPolicy,
};

use std::sync::Arc;

use sqlx::PgPool;

/// The wired time & attendance services, handed to the API layer.
pub struct AppState {
    pub attendance: AttendanceTracker<AttendanceRepository>,
    pub time_off: RequestWorkflow<TimeOffPolicy, TimeOffRepository>,
    pub overtime: RequestWorkflow<OvertimePolicy, OvertimeRepository>,
    pub stats: StatsAggregator<StatsRepository>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        clock: Arc<dyn Clock>,
        directory: Arc<dyn EmployeeDirectory>,
    ) -> Self {
        Self {
            attendance: AttendanceTracker::new(
                AttendanceRepository::new(pool.clone()),
                clock.clone(),
                directory,
            ),
            time_off: RequestWorkflow::new(
                TimeOffPolicy,
                TimeOffRepository::new(pool.clone()),
                clock.clone(),
            ),
            overtime: RequestWorkflow::new(
                OvertimePolicy,
                OvertimeRepository::new(pool.clone()),
                clock.clone(),
            ),
            stats: StatsAggregator::new(StatsRepository::new(pool)),
        }
    }
}
