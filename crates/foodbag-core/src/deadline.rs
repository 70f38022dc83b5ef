//! Deadline enforcement for storage operations.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::AppError;
use crate::result::AppResult;

/// Run a storage operation with an upper bound on its duration.
///
/// A timed-out operation surfaces as an internal error. The future is dropped,
/// which rolls back any open transaction it held; it is never retried here.
pub async fn within<T, F>(limit: Duration, operation: &'static str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation = operation,
                timeout_ms = limit.as_millis() as u64,
                "Storage operation timed out"
            );
            Err(AppError::internal(format!(
                "{operation} timed out after {}ms",
                limit.as_millis()
            )))
        }
    }
}
