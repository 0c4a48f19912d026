use chrono::{DateTime, Utc};
use futures::future::{self, BoxFuture, FutureExt};

use crate::database::models::UserId;

/// Write-only view of the employee directory.
///
/// The tracker pushes `last_clocked_in` updates through this on a successful
/// clock-in and never reads back. Failures here must not fail the clock-in.
pub trait EmployeeDirectory: Send + Sync {
    fn record_clock_in(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> BoxFuture<'_, anyhow::Result<()>>;
}

/// Directory that drops notifications, for deployments where the directory
/// integration is wired elsewhere and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDirectory;

impl EmployeeDirectory for NoopDirectory {
    fn record_clock_in(&self, _user_id: UserId, _at: DateTime<Utc>) -> BoxFuture<'_, anyhow::Result<()>> {
        future::ready(Ok(())).boxed()
    }
}
