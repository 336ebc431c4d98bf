// Retry with exponential backoff

use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Run `operation` up to `max_attempts` times, sleeping 2^attempt seconds
/// (capped at 32s) between failures.
pub async fn with_retry<F, T, E>(mut operation: F, max_attempts: u32) -> Result<T, E>
where
    F: FnMut() -> futures::future::BoxFuture<'static, Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(error);
                }

                let delay = Duration::from_secs(2u64.pow(attempt.min(5)));
                warn!(attempt, error = %error, "operation failed, retrying after {:?}", delay);
                sleep(delay).await;
            }
        }
    }
}
