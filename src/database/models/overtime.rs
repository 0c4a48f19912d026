use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::UserId;
use super::macros::string_enum;
use super::workflow::RequestStatus;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum OvertimeType {
        Regular => "regular",
        Holiday => "holiday",
        Weekend => "weekend",
        NightShift => "night_shift",
        Special => "special",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequest {
    pub id: Uuid,
    pub user_id: UserId,
    pub overtime_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub request_type: OvertimeType,
    pub status: RequestStatus,
    pub reason: String,
    pub total_hours: f64,
    pub hourly_rate: Option<BigDecimal>,
    pub total_amount: Option<BigDecimal>,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequestInput {
    pub user_id: UserId,
    pub overtime_date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub request_type: OvertimeType,
    pub reason: String,
    pub hourly_rate: Option<BigDecimal>,
}
