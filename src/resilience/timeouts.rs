//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap the upstream fetch-and-buffer step with a deadline
//! - Cancel the in-flight upstream call when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors internally
//! - Timed-out fetches still surface as a 500 proxy error

use std::future::Future;
use std::time::Duration;

use crate::error::ProxyError;

/// Run `fut`, failing with [`ProxyError::Timeout`] if it outlives `deadline`.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> Result<T, ProxyError>
where
    F: Future<Output = Result<T, ProxyError>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProxyError::Timeout(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, ProxyError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_expires() {
        let result = with_deadline(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ProxyError>(())
        })
        .await;
        assert!(matches!(result, Err(ProxyError::Timeout(d)) if d == Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> =
            with_deadline(Duration::from_secs(1), async { Err(ProxyError::MissingParameter) }).await;
        assert!(matches!(result, Err(ProxyError::MissingParameter)));
    }
}
