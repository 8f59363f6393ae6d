// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::ControlFlow;
use std::time::Duration;

use super::{OnRetryArgs, RetryOptions};
use crate::guard::invoke_callback;
use crate::{Attempt, BoxError, Error, Result};

/// Invokes `operation` until it succeeds, the retry budget is used up, or a failure is
/// classified as not retryable.
///
/// The operation receives the current [`Attempt`]. Its failures are normalized with
/// [`Error::from_operation`] and then:
///
/// 1. If the failed attempt was the last one allowed, the call fails with
///    [`Error::RetryExhausted`] carrying the number of retries and the final failure.
/// 2. If the [`retry_if`][RetryOptions::retry_if] predicate rejects the failure, the call
///    fails with that failure unwrapped.
/// 3. Otherwise the [`on_retry`][RetryOptions::on_retry] callback is notified, the task
///    sleeps for the backoff delay and the next attempt starts.
///
/// Must be awaited within a Tokio runtime with the time driver enabled.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use flowpath::retry::{RetryOptions, retry};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), flowpath::Error> {
/// let options = RetryOptions::new().max_retry_attempts(2).base_delay(Duration::from_millis(1));
///
/// let value = retry(&options, |attempt| async move {
///     if attempt.index() < 2 {
///         Err("not yet")
///     } else {
///         Ok(attempt.index())
///     }
/// })
/// .await?;
///
/// assert_eq!(value, 2);
/// # Ok(())
/// # }
/// ```
pub async fn retry<T, E, F, Fut>(options: &RetryOptions, mut operation: F) -> Result<T>
where
    F: FnMut(Attempt) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<BoxError>,
{
    let mut attempt = Attempt::first(options.max_attempts);

    loop {
        let error = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => Error::from_operation(error),
        };

        match options.evaluate_failure(error, attempt) {
            ControlFlow::Continue(next) => {
                tokio::time::sleep(next.delay).await;
                attempt = next.attempt;
            }
            ControlFlow::Break(error) => return Err(error),
        }
    }
}

/// State carried into the next iteration of the retry loop.
struct ContinueRetry {
    attempt: Attempt,
    delay: Duration,
}

impl RetryOptions {
    fn evaluate_failure(&self, error: Error, attempt: Attempt) -> ControlFlow<Error, ContinueRetry> {
        let Some(next_attempt) = attempt.increment(self.max_attempts) else {
            tracing::event!(
                name: "flowpath.retry.exhausted",
                tracing::Level::WARN,
                attempt.index = attempt.index(),
                error = %error,
                "retry attempts exhausted"
            );
            return ControlFlow::Break(Error::retry_exhausted(self.max_attempts, error));
        };

        if !self.retry_if.call(&error) {
            return ControlFlow::Break(error);
        }

        let delay = self.backoff.delay(attempt.index());

        tracing::event!(
            name: "flowpath.retry",
            tracing::Level::WARN,
            attempt.index = attempt.index(),
            retry.delay = delay.as_secs_f32(),
            error = %error,
            "attempt failed, retrying"
        );

        if let Some(on_retry) = &self.on_retry {
            invoke_callback("on_retry", || on_retry.call(&error, OnRetryArgs { attempt, retry_delay: delay }));
        }

        ControlFlow::Continue(ContinueRetry {
            attempt: next_attempt,
            delay,
        })
    }
}
