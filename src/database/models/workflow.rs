use serde::{Deserialize, Serialize};

use super::macros::string_enum;

string_enum! {
    /// Shared lifecycle for time-off and overtime requests.
    ///
    /// Approved and Rejected are terminal. Cancelled is reachable only by the
    /// owner withdrawing a still-pending request.
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}
