//! Cooperative sleep.

use std::time::Duration;

/// Suspend the current task for at least `ms` milliseconds.
///
/// Other tasks on the runtime keep running. There is no cancellation hook;
/// dropping the returned future is the only way to stop early.
pub async fn delay(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
