// ── Per-call invocation context ──

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

/// Carries the caller's cancellation signal into every remote call.
///
/// Cancellation is cooperative: a cancelled context abandons the in-flight
/// request and reports [`CoreError::Cancelled`], making no assumption about
/// whether the remote side applied it.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive one remote call, racing it against cancellation.
    pub async fn run<T, F>(&self, call: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, vellum_api::Error>>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            result = call => result.map_err(CoreError::from),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn completed_call_passes_through() {
        let ctx = CallContext::new();
        let value = ctx.run(async { Ok::<_, vellum_api::Error>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn pre_cancelled_context_never_polls_the_call() {
        let ctx = CallContext::new();
        ctx.cancellation().cancel();
        let result = ctx
            .run(async { Ok::<_, vellum_api::Error>(7) })
            .await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_abandons_in_flight_call() {
        let ctx = CallContext::new();
        let token = ctx.cancellation().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, vellum_api::Error>(())
            })
            .await;
        assert!(matches!(result, Err(CoreError::Cancelled)));
    }

    #[tokio::test]
    async fn api_errors_are_classified() {
        let ctx = CallContext::new();
        let result: Result<(), _> = ctx
            .run(async { Err(vellum_api::Error::Timeout { timeout_secs: 3 }) })
            .await;
        assert!(matches!(result, Err(CoreError::Timeout { timeout_secs: 3 })));
    }
}
