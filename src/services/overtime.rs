use bigdecimal::{BigDecimal, FromPrimitive};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::models::{OvertimeRequest, OvertimeRequestInput, RequestStatus};
use crate::error::AppError;
use crate::services::workflow::{RequestPolicy, WorkflowRecord};

impl WorkflowRecord for OvertimeRequest {
    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }
}

/// Validation and derivation for extra-hours requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct OvertimePolicy;

impl RequestPolicy for OvertimePolicy {
    type Input = OvertimeRequestInput;
    type Record = OvertimeRequest;

    fn kind(&self) -> &'static str {
        "overtime"
    }

    fn validate(&self, input: &Self::Input, now: DateTime<Utc>) -> Result<(), AppError> {
        if input.start_time >= input.end_time {
            return Err(AppError::InvalidRange(format!(
                "start time {} must be before end time {}",
                input.start_time, input.end_time
            )));
        }
        if input.overtime_date < now.date_naive() {
            return Err(AppError::PastDate(input.overtime_date.to_string()));
        }
        Ok(())
    }

    fn build(&self, input: Self::Input, now: DateTime<Utc>) -> Self::Record {
        // Whole-hour truncation, matching the attendance ledger.
        let total_hours = (input.end_time - input.start_time).num_hours() as f64;
        let total_amount = input
            .hourly_rate
            .as_ref()
            .and_then(|rate| BigDecimal::from_f64(total_hours).map(|h| rate * h));

        OvertimeRequest {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            overtime_date: input.overtime_date,
            start_time: input.start_time,
            end_time: input.end_time,
            request_type: input.request_type,
            status: RequestStatus::Pending,
            reason: input.reason,
            total_hours,
            hourly_rate: input.hourly_rate,
            total_amount,
            is_paid: false,
            paid_at: None,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}
