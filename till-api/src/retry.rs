use std::future::Future;
use till_core::error::RepositoryError;

const WRITE_ATTEMPTS: u32 = 3;

/// Bounded retry for write operations that died in the storage layer. The
/// repository performs no retries of its own; a failed attempt has already
/// rolled back, so re-running the whole operation is safe. NotFound is never
/// retried.
pub(crate) async fn with_retries<T, F, Fut>(mut op: F) -> Result<T, RepositoryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RepositoryError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(RepositoryError::Storage(err)) if attempt < WRITE_ATTEMPTS => {
                tracing::warn!(attempt, error = %err, "storage failure, retrying write");
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_storage_failures_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_retries(|| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(RepositoryError::Storage(anyhow::anyhow!("transient")))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(RepositoryError::not_found("order", 1)) }
        })
        .await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_bounded_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(RepositoryError::Storage(anyhow::anyhow!("still down"))) }
        })
        .await;

        assert!(!result.unwrap_err().is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), WRITE_ATTEMPTS);
    }
}
