use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::models::{RequestStatus, TimeOffRequest, TimeOffRequestInput};
use crate::error::AppError;
use crate::services::workflow::{RequestPolicy, WorkflowRecord};

const HOURS_PER_LEAVE_DAY: f64 = 8.0;

impl WorkflowRecord for TimeOffRequest {
    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }
}

/// Validation and derivation for leave requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOffPolicy;

impl RequestPolicy for TimeOffPolicy {
    type Input = TimeOffRequestInput;
    type Record = TimeOffRequest;

    fn kind(&self) -> &'static str {
        "time-off"
    }

    fn validate(&self, input: &Self::Input, now: DateTime<Utc>) -> Result<(), AppError> {
        // Same-day ranges are rejected along with inverted ones.
        if input.start_date >= input.end_date {
            return Err(AppError::InvalidRange(format!(
                "start date {} must be before end date {}",
                input.start_date, input.end_date
            )));
        }
        if input.start_date < now {
            return Err(AppError::PastDate(input.start_date.to_string()));
        }
        Ok(())
    }

    fn build(&self, input: Self::Input, now: DateTime<Utc>) -> Self::Record {
        // Inclusive day count: a Mar 10 - Mar 12 request covers 3 days.
        let total_days = (input.end_date - input.start_date).num_days() + 1;
        let total_hours = input
            .total_hours
            .unwrap_or(total_days as f64 * HOURS_PER_LEAVE_DAY);

        TimeOffRequest {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            start_date: input.start_date,
            end_date: input.end_date,
            request_type: input.request_type,
            status: RequestStatus::Pending,
            reason: input.reason,
            total_days,
            total_hours,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            attachment_id: input.attachment_id,
            is_half_day: input.is_half_day,
            half_day_type: input.half_day_type,
            created_at: now,
            updated_at: now,
        }
    }
}
