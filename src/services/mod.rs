pub mod attendance;
pub mod clock;
pub mod directory;
pub mod overlap;
pub mod overtime;
pub mod stats;
pub mod time_off;
pub mod workflow;

pub use attendance::{AttendanceStore, AttendanceTracker};
pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{EmployeeDirectory, NoopDirectory};
pub use overtime::OvertimePolicy;
pub use stats::{StatsAggregator, StatsStore};
pub use time_off::TimeOffPolicy;
pub use workflow::{Decision, RequestPolicy, RequestStore, RequestWorkflow, WorkflowRecord};
