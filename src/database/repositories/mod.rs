pub mod attendance;
pub mod overtime;
pub mod stats;
pub mod time_off;

// Re-export all repositories for easy importing
pub use attendance::AttendanceRepository;
pub use overtime::OvertimeRepository;
pub use stats::StatsRepository;
pub use time_off::TimeOffRepository;
