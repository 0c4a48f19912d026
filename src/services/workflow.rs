use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::models::{DateRange, Page, PageQuery, RequestStatus, UserId};
use crate::error::AppError;
use crate::services::clock::Clock;

/// Minimum surface the workflow needs from a stored request.
pub trait WorkflowRecord {
    fn id(&self) -> Uuid;
    fn status(&self) -> RequestStatus;
}

/// Per-kind validation and derived-field computation. Everything else about
/// the Pending → Approved/Rejected lifecycle is shared.
pub trait RequestPolicy {
    type Input;
    type Record: WorkflowRecord;

    /// Human-readable kind for log lines, e.g. "time-off".
    fn kind(&self) -> &'static str;

    /// Fail-fast validation; runs before anything is written.
    fn validate(&self, input: &Self::Input, now: DateTime<Utc>) -> Result<(), AppError>;

    /// Build the Pending record with its derived fields.
    fn build(&self, input: Self::Input, now: DateTime<Utc>) -> Self::Record;
}

/// Terminal transition applied by `decide`. Constructed only by the
/// workflow, so `rejection_reason` is present exactly for rejections.
#[derive(Debug, Clone)]
pub struct Decision {
    pub status: RequestStatus,
    pub approved_by: UserId,
    pub approved_at: DateTime<Utc>,
    pub rejection_reason: Option<String>,
}

/// Persistence contract shared by the time-off and overtime repositories.
///
/// `decide` and `cancel` must be single conditional updates guarded by
/// `status = 'pending'` and return `None` on a miss; two concurrent callers
/// can therefore never both transition the same request.
pub trait RequestStore<R: WorkflowRecord>: Send + Sync {
    fn insert(&self, record: R) -> impl Future<Output = Result<R, AppError>> + Send;

    fn find(&self, id: Uuid) -> impl Future<Output = Result<Option<R>, AppError>> + Send;

    fn decide(
        &self,
        id: Uuid,
        decision: Decision,
    ) -> impl Future<Output = Result<Option<R>, AppError>> + Send;

    fn cancel(
        &self,
        id: Uuid,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<R>, AppError>> + Send;

    /// Requests for the user whose own range overlaps the window
    /// (inclusive endpoints), newest first.
    fn list_overlapping(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> impl Future<Output = Result<Page<R>, AppError>> + Send;
}

/// The shared Pending → Approved/Rejected state machine, instantiated once
/// per request kind with its policy and store.
pub struct RequestWorkflow<P, S> {
    policy: P,
    store: S,
    clock: Arc<dyn Clock>,
}

impl<P, S> RequestWorkflow<P, S>
where
    P: RequestPolicy,
    S: RequestStore<P::Record>,
{
    pub fn new(policy: P, store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            store,
            clock,
        }
    }

    /// Validate, derive, and persist a new Pending request.
    ///
    /// Submission is deliberately permissive about overlap with the user's
    /// existing requests; the overlap predicate is only applied when listing.
    pub async fn submit(&self, input: P::Input) -> Result<P::Record, AppError> {
        let now = self.clock.now();
        self.policy.validate(&input, now)?;
        self.store.insert(self.policy.build(input, now)).await
    }

    pub async fn approve(&self, id: Uuid, approver: UserId) -> Result<P::Record, AppError> {
        let decision = Decision {
            status: RequestStatus::Approved,
            approved_by: approver,
            approved_at: self.clock.now(),
            rejection_reason: None,
        };
        match self.store.decide(id, decision).await? {
            Some(record) => Ok(record),
            None => Err(self.transition_miss(id).await?),
        }
    }

    pub async fn reject(
        &self,
        id: Uuid,
        approver: UserId,
        reason: String,
    ) -> Result<P::Record, AppError> {
        let decision = Decision {
            status: RequestStatus::Rejected,
            approved_by: approver,
            approved_at: self.clock.now(),
            rejection_reason: Some(reason),
        };
        match self.store.decide(id, decision).await? {
            Some(record) => Ok(record),
            None => Err(self.transition_miss(id).await?),
        }
    }

    /// Owner withdraws their own still-pending request.
    pub async fn cancel(&self, id: Uuid, user_id: &UserId) -> Result<P::Record, AppError> {
        match self.store.cancel(id, user_id, self.clock.now()).await? {
            Some(record) => Ok(record),
            None => match self.store.find(id).await? {
                // A pending row that did not match belongs to someone else;
                // don't reveal it.
                Some(record) if record.status() == RequestStatus::Pending => Err(
                    AppError::NotFound(format!("{} request {}", self.policy.kind(), id)),
                ),
                Some(record) => Err(AppError::InvalidState(format!(
                    "{} request is {}, expected pending",
                    self.policy.kind(),
                    record.status()
                ))),
                None => Err(AppError::NotFound(format!(
                    "{} request {}",
                    self.policy.kind(),
                    id
                ))),
            },
        }
    }

    pub async fn list(
        &self,
        user_id: &UserId,
        range: &DateRange,
        page: &PageQuery,
    ) -> Result<Page<P::Record>, AppError> {
        self.store.list_overlapping(user_id, range, page).await
    }

    /// A conditional transition found no pending row: either the request is
    /// gone or someone else already decided it. The losing caller of a
    /// concurrent race lands here and never overwrites the earlier decision.
    async fn transition_miss(&self, id: Uuid) -> Result<AppError, AppError> {
        Ok(match self.store.find(id).await? {
            Some(record) => {
                log::info!(
                    "{} request {} not transitioned: status is {}",
                    self.policy.kind(),
                    id,
                    record.status()
                );
                AppError::InvalidState(format!(
                    "{} request is {}, expected pending",
                    self.policy.kind(),
                    record.status()
                ))
            }
            None => AppError::NotFound(format!("{} request {}", self.policy.kind(), id)),
        })
    }
}
