//! Retry decorator for resource queries
//!
//! Transient failures are retried with linear backoff; anything else, or the
//! last transient failure, is returned to the caller.

use std::time::Duration;

use tracing::warn;

use crate::domain::entities::AwsContext;
use crate::domain::ports::{RemoteResource, ResourceKind, ResourceQueryError, ResourceQueryService};

pub struct RetryingResourceQuery<Q> {
    inner: Q,
    retries: u32,
    backoff: Duration,
}

impl<Q: ResourceQueryService> RetryingResourceQuery<Q> {
    pub fn new(inner: Q, retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            retries,
            backoff,
        }
    }
}

impl<Q: ResourceQueryService> ResourceQueryService for RetryingResourceQuery<Q> {
    fn list(
        &self,
        kind: ResourceKind,
        aws: &AwsContext,
    ) -> Result<Vec<RemoteResource>, ResourceQueryError> {
        let mut attempt = 0;
        loop {
            match self.inner.list(kind, aws) {
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(%kind, attempt, "resource query failed, retrying: {}", err);
                    std::thread::sleep(self.backoff * attempt);
                }
                other => return other,
            }
        }
    }
}
