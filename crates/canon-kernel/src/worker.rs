//! Worker-task realization with deadline and cancellation.
//!
//! Realization can delegate to compute-heavy mesh generation; running it
//! inline would block a caller's event loop on a deeply subdivided form.
//! This module runs the synchronous realize path on a blocking worker and
//! races it against an optional deadline and a cancellation token.
//!
//! Only realization is cancellable. Validation is bounded and fast, so the
//! worker path never splits it out.

use crate::declaration::Declaration;
use crate::engine::{CanonEngine, RealizeOptions};
use crate::error::CanonError;
use crate::realize::RealizeResult;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Resource limits for one worker-task realization.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealizeBudget {
    /// Wall-clock deadline; `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl RealizeBudget {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Caller-held cancellation handle.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel the paired realization, if it is still running.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Worker-held cancellation token.
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Resolve once cancellation is requested; pend forever if the handle
    /// is dropped without cancelling.
    async fn cancelled(mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Create a connected cancellation pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Run `engine.realize` on a blocking worker, racing deadline and
/// cancellation.
///
/// The realize call itself is unchanged — same bypass contract, same
/// rejection results. A deadline or cancellation surfaces as a `CanonError`,
/// never as a domain finding: these are runtime conditions of the caller's
/// budget, not judgments about the declaration.
pub async fn realize_on_worker(
    engine: Arc<CanonEngine>,
    decl: Arc<Declaration>,
    opts: RealizeOptions,
    budget: RealizeBudget,
    token: CancelToken,
) -> Result<RealizeResult, CanonError> {
    let started = Instant::now();
    let job = tokio::task::spawn_blocking(move || engine.realize(&decl, opts));

    tokio::select! {
        joined = job => match joined {
            Ok(result) => result,
            Err(join_error) => Err(CanonError::Worker(join_error.to_string())),
        },
        _ = token.cancelled() => Err(CanonError::RealizationCancelled),
        _ = deadline_elapsed(budget.timeout) => Err(CanonError::RealizationTimeout {
            elapsed_ms: started.elapsed().as_millis() as u64,
        }),
    }
}

async fn deadline_elapsed(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}
