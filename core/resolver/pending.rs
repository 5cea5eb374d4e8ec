use super::LookupError;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

/// The outcome of a single lookup: `Ok(None)` means the lookup declined to answer.
pub type LookupResult<T> = Result<Option<T>, LookupError>;

/// A lookup that has been started and may still be running.
///
/// Cancelling a `PendingLookup` is best-effort: its token is cancelled, and if it was spawned on
/// the runtime its task is aborted. Cancelling a lookup that already completed does nothing.
///
pub struct PendingLookup<T> {
    future: BoxFuture<'static, LookupResult<T>>,
    token: CancellationToken,
    abort_handle: Option<AbortHandle>,
}

impl<T> PendingLookup<T>
where
    T: Send + 'static,
{
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = LookupResult<T>> + Send + 'static,
    {
        Self::with_cancellation(|_token| future)
    }

    /// Build a lookup that gets to observe its own cancellation token, so it can stop work it
    /// has handed off elsewhere.
    ///
    pub fn with_cancellation<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = LookupResult<T>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let future = until_cancelled(token.clone(), f(token.clone())).boxed();
        Self {
            future,
            token,
            abort_handle: None,
        }
    }

    /// Run the lookup as its own task on the current tokio runtime.
    ///
    /// Panics if called outside of a runtime, like `tokio::spawn`.
    ///
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = LookupResult<T>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let handle = tokio::spawn(until_cancelled(token.clone(), future));
        let abort_handle = handle.abort_handle();
        let future = async move {
            match handle.await {
                Ok(result) => result,
                Err(err) => Err(err.into()),
            }
        }
        .boxed();

        Self {
            future,
            token,
            abort_handle: Some(abort_handle),
        }
    }

    pub fn ready(value: Option<T>) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    pub fn failed(err: LookupError) -> Self {
        Self::new(futures::future::ready(Err(err)))
    }
}

impl<T> PendingLookup<T> {
    pub fn cancel(&self) {
        self.canceller().cancel()
    }

    /// Something that cancels this lookup later on, without holding on to the lookup itself.
    pub(crate) fn canceller(&self) -> LookupCanceller {
        LookupCanceller {
            token: self.token.clone(),
            abort_handle: self.abort_handle.clone(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl<T> Future for PendingLookup<T> {
    type Output = LookupResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.poll_unpin(cx)
    }
}

impl<T> std::fmt::Debug for PendingLookup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLookup")
            .field("cancelled", &self.is_cancelled())
            .field("spawned", &self.abort_handle.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LookupCanceller {
    token: CancellationToken,
    abort_handle: Option<AbortHandle>,
}

impl LookupCanceller {
    pub(crate) fn cancel(&self) {
        self.token.cancel();
        if let Some(handle) = &self.abort_handle {
            handle.abort();
        }
    }
}

async fn until_cancelled<T, F>(token: CancellationToken, future: F) -> LookupResult<T>
where
    F: Future<Output = LookupResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(LookupError::Cancelled),
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn ready_lookups_resolve_to_their_value() {
        assert_matches!(PendingLookup::ready(Some(1)).await, Ok(Some(1)));
        assert_matches!(PendingLookup::<u8>::ready(None).await, Ok(None));
    }

    #[tokio::test]
    async fn cancelled_lookups_resolve_to_a_cancellation_error() {
        let lookup = PendingLookup::<u8>::new(futures::future::pending());
        lookup.cancel();
        assert!(lookup.is_cancelled());
        assert_matches!(lookup.await, Err(LookupError::Cancelled));
    }

    #[tokio::test]
    async fn lookups_can_watch_their_own_cancellation() {
        let (tx, rx) = oneshot::channel();
        let lookup = PendingLookup::<u8>::with_cancellation(|token| {
            tokio::spawn(async move {
                token.cancelled().await;
                tx.send(()).unwrap();
            });
            futures::future::pending::<LookupResult<u8>>()
        });
        lookup.cancel();
        rx.await.unwrap();
    }

    #[tokio::test]
    async fn cancelling_a_spawned_lookup_aborts_its_task() {
        let (guard_tx, guard_rx) = oneshot::channel::<()>();
        let lookup = PendingLookup::<u8>::spawn(async move {
            let _guard = guard_tx;
            futures::future::pending::<()>().await;
            Ok(None)
        });

        lookup.cancel();
        assert_matches!(lookup.await, Err(LookupError::Cancelled));
        assert!(guard_rx.await.is_err());
    }

    #[tokio::test]
    async fn panics_in_spawned_lookups_are_failures() {
        let lookup = PendingLookup::<u8>::spawn(async {
            let blow_up = true;
            if blow_up {
                panic!("provider blew up");
            }
            Ok(None)
        });
        assert_matches!(lookup.await, Err(LookupError::Panicked(_)));
    }
}
