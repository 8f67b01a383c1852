//! Deadlines for calls into external stores
//!
//! A store that hangs must surface as "unavailable" instead of holding the
//! request open.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The bounded operation did not finish in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation exceeded its deadline of {0:?}")]
pub struct DeadlineElapsed(pub Duration);

/// Run `fut` to completion or give up after `limit`
///
/// The future is dropped on expiry, which cancels it.
pub async fn bounded<F, T>(limit: Duration, fut: F) -> Result<T, DeadlineElapsed>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| DeadlineElapsed(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let value = bounded(Duration::from_secs(1), async { 42 }).await;
        assert_eq!(value, Ok(42));
    }

    #[tokio::test]
    async fn test_elapsed() {
        let limit = Duration::from_millis(10);
        let result = bounded(limit, tokio::time::sleep(Duration::from_secs(5))).await;
        assert_eq!(result, Err(DeadlineElapsed(limit)));
    }
}
