pub mod attendance;
pub mod ids;
pub(crate) mod macros;
pub mod overtime;
pub mod pagination;
pub mod stats;
pub mod time_off;
pub mod workflow;

// Re-export all models for easy importing
pub use attendance::*;
pub use ids::*;
pub use overtime::*;
pub use pagination::*;
pub use stats::*;
pub use time_off::*;
pub use workflow::*;
