use super::pending::LookupCanceller;
use super::{FailurePolicy, LookupError, PendingLookup, ResolverError};
use crate::sync::Arc;
use futures::future::{BoxFuture, FusedFuture, FutureExt};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::sync::CancellationToken;
use tracing::*;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A future that resolves to the first lookup value satisfying a predicate.
///
/// Lookups are observed in the order in which they complete. Lookups that decline (`Ok(None)`),
/// whose value fails the predicate, or that fail altogether are recorded and skipped. As soon as
/// a value is accepted every lookup still running is cancelled.
///
/// When several lookups are ready on the same wake-up, the one that was handed over first wins.
///
/// If no lookup is accepted the result is `Ok(None)`. Under `FailurePolicy::Strict` the last
/// failure is returned instead, but only if every single lookup failed.
///
/// Dropping a `FirstSatisfying` before it completes cancels all of its outstanding lookups.
///
pub struct FirstSatisfying<T> {
    lookups: Vec<Option<PendingLookup<T>>>,
    predicate: Predicate<T>,
    policy: FailurePolicy,
    cancel_token: CancellationToken,
    cancellers: Arc<Vec<LookupCanceller>>,
    cancelled: BoxFuture<'static, ()>,
    answered: usize,
    failures: usize,
    last_error: Option<LookupError>,
    done: bool,
}

/// Cancels a `FirstSatisfying` from anywhere, even after it has been moved into a task.
///
/// Every lookup handed to the resolution is cancelled right away, whether or not the
/// resolution itself is being polled.
///
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
    lookups: Arc<Vec<LookupCanceller>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
        for lookup in self.lookups.iter() {
            lookup.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl<T> FirstSatisfying<T>
where
    T: Send + 'static,
{
    /// Accept the first value that any lookup produces.
    pub fn new<I>(lookups: I) -> Self
    where
        I: IntoIterator<Item = PendingLookup<T>>,
    {
        let cancel_token = CancellationToken::new();
        let cancelled = {
            let token = cancel_token.clone();
            async move { token.cancelled().await }.boxed()
        };

        let lookups: Vec<Option<PendingLookup<T>>> = lookups.into_iter().map(Some).collect();
        let cancellers = lookups
            .iter()
            .flatten()
            .map(PendingLookup::canceller)
            .collect();

        Self {
            lookups,
            cancellers: Arc::new(cancellers),
            predicate: Box::new(|_: &T| true),
            policy: FailurePolicy::default(),
            cancel_token,
            cancelled,
            answered: 0,
            failures: 0,
            last_error: None,
            done: false,
        }
    }

    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<T> FirstSatisfying<T> {
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.cancel_token.clone(),
            lookups: self.cancellers.clone(),
        }
    }

    /// The number of lookups that have not completed yet.
    pub fn outstanding(&self) -> usize {
        self.lookups.iter().filter(|l| l.is_some()).count()
    }

    fn cancel_outstanding(&mut self) {
        for lookup in self.lookups.iter_mut().filter_map(Option::take) {
            lookup.cancel();
        }
    }

    fn finish(&mut self) -> Result<Option<T>, ResolverError> {
        match self.last_error.take() {
            Some(last) if self.policy == FailurePolicy::Strict && self.answered == 0 => {
                Err(ResolverError::AllLookupsFailed {
                    failures: self.failures,
                    last,
                })
            }
            Some(last) => {
                debug!(
                    "No lookup was accepted, {} of them failed. Last failure: {}",
                    self.failures, last
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

impl<T> Unpin for FirstSatisfying<T> {}

impl<T> Future for FirstSatisfying<T> {
    type Output = Result<Option<T>, ResolverError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        assert!(!this.done, "FirstSatisfying polled after completion");

        if this.cancelled.poll_unpin(cx).is_ready() {
            debug!(
                "Resolution cancelled with {} lookups outstanding",
                this.outstanding()
            );
            this.cancel_outstanding();
            this.done = true;
            return Poll::Ready(Err(ResolverError::Cancelled));
        }

        for idx in 0..this.lookups.len() {
            let result = match this.lookups[idx].as_mut().map(|l| l.poll_unpin(cx)) {
                Some(Poll::Ready(result)) => result,
                _ => continue,
            };
            this.lookups[idx] = None;

            match result {
                Ok(Some(value)) if (this.predicate)(&value) => {
                    trace!("Lookup #{} was accepted", idx);
                    this.cancel_outstanding();
                    this.done = true;
                    return Poll::Ready(Ok(Some(value)));
                }
                Ok(_) => {
                    trace!("Lookup #{} declined", idx);
                    this.answered += 1;
                }
                Err(err) => {
                    debug!("Lookup #{} failed: {}", idx, err);
                    this.failures += 1;
                    this.last_error = Some(err);
                }
            }
        }

        if this.lookups.iter().all(Option::is_none) {
            this.done = true;
            return Poll::Ready(this.finish());
        }

        Poll::Pending
    }
}

impl<T> FusedFuture for FirstSatisfying<T> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

impl<T> Drop for FirstSatisfying<T> {
    fn drop(&mut self) {
        if !self.done {
            self.cancel_outstanding();
        }
    }
}

impl<T> std::fmt::Debug for FirstSatisfying<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstSatisfying")
            .field("outstanding", &self.outstanding())
            .field("policy", &self.policy)
            .field("failures", &self.failures)
            .field("done", &self.done)
            .finish()
    }
}
