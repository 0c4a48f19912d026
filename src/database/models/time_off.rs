use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{AttachmentId, UserId};
use super::macros::string_enum;
use super::workflow::RequestStatus;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum TimeOffType {
        Annual => "annual",
        Sick => "sick",
        Personal => "personal",
        Maternity => "maternity",
        Paternity => "paternity",
        Bereavement => "bereavement",
        Unpaid => "unpaid",
        Other => "other",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum HalfDayType {
        Morning => "morning",
        Afternoon => "afternoon",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffRequest {
    pub id: Uuid,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub request_type: TimeOffType,
    pub status: RequestStatus,
    pub reason: String,
    pub total_days: i64,
    pub total_hours: f64,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub attachment_id: Option<AttachmentId>,
    pub is_half_day: bool,
    pub half_day_type: Option<HalfDayType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffRequestInput {
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub request_type: TimeOffType,
    pub reason: String,
    /// Overrides the derived `total_days * 8` when supplied.
    pub total_hours: Option<f64>,
    pub attachment_id: Option<AttachmentId>,
    pub is_half_day: bool,
    pub half_day_type: Option<HalfDayType>,
}
