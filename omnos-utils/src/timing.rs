//! Wall-clock timing of operations.
//!
//! Each helper runs the operation to completion and reports how long it took
//! in whole milliseconds. The operation's output is discarded. An error from
//! a fallible operation is returned as-is, with no duration.
//!
//! The async helpers read `tokio::time::Instant`, so under a paused test clock
//! they report virtual time.

use std::future::Future;
use std::time::Duration;

use tracing::{Instrument, trace, trace_span};

use crate::telemetry::spans;

/// Await `fut` and return the elapsed milliseconds.
pub async fn time<F>(fut: F) -> u64
where
    F: Future,
{
    async {
        let start = tokio::time::Instant::now();
        fut.await;
        finish(start.elapsed())
    }
    .instrument(trace_span!(spans::TIMING))
    .await
}

/// Await a fallible `fut` and return the elapsed milliseconds.
///
/// # Errors
/// Returns the future's own error unchanged.
pub async fn try_time<F, T, E>(fut: F) -> Result<u64, E>
where
    F: Future<Output = Result<T, E>>,
{
    async {
        let start = tokio::time::Instant::now();
        fut.await?;
        Ok(finish(start.elapsed()))
    }
    .instrument(trace_span!(spans::TIMING))
    .await
}

/// Run `op` on the current thread and return the elapsed milliseconds.
pub fn time_blocking<F, T>(op: F) -> u64
where
    F: FnOnce() -> T,
{
    let _span = trace_span!(spans::TIMING).entered();
    let start = std::time::Instant::now();
    op();
    finish(start.elapsed())
}

/// Run a fallible `op` on the current thread and return the elapsed
/// milliseconds.
///
/// # Errors
/// Returns the operation's own error unchanged.
pub fn try_time_blocking<F, T, E>(op: F) -> Result<u64, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let _span = trace_span!(spans::TIMING).entered();
    let start = std::time::Instant::now();
    op()?;
    Ok(finish(start.elapsed()))
}

fn finish(elapsed: Duration) -> u64 {
    let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    trace!(elapsed_ms = ms, "operation finished");
    ms
}
