//! Expired Session Cleanup
//!
//! Lazy expiry in [`CheckSessionUseCase`](super::CheckSessionUseCase) keeps
//! answers correct; the sweeper only bounds memory held by sessions that are
//! never presented again.

use std::sync::Arc;
use std::time::Duration;

use kernel::clock::Clock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// One-shot removal of every expired session
pub struct CleanupExpiredSessionsUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> CleanupExpiredSessionsUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_store,
            clock,
        }
    }

    /// Returns the number of sessions removed
    pub async fn execute(&self) -> AuthResult<u64> {
        let removed = self.session_store.remove_expired(self.clock.now()).await?;
        if removed > 0 {
            tracing::info!(sessions_removed = removed, "Cleaned up expired sessions");
        }
        Ok(removed)
    }
}

/// Run the cleanup on a fixed period until `shutdown` is cancelled
pub fn spawn_session_sweeper<S>(
    use_case: CleanupExpiredSessionsUseCase<S>,
    period: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    tracing::debug!("Session sweeper shutting down");
                    return;
                }

                _ = ticker.tick() => {
                    if let Err(e) = use_case.execute().await {
                        tracing::warn!(error = %e, "Session sweep failed");
                    }
                }
            }
        }
    })
}
