//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::error::FoundryError;

/// Wrap a vendor call with a deadline.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, FoundryError>>,
) -> Result<T, FoundryError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(FoundryError::Timeout(duration.as_millis() as u64)),
    }
}
