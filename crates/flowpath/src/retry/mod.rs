// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Retrying fallible async operations with fixed or exponential backoff.
//!
//! [`retry`] invokes an operation up to `max_retry_attempts + 1` times, sleeping between
//! attempts according to the configured [`Backoff`][crate::Backoff]. [`RetryOptions`]
//! configures the retry budget, delays, the retryability predicate and a notification
//! callback.
//!
//! # Terminal failures
//!
//! Callers can tell apart the two ways a retried operation gives up:
//!
//! - The budget ran out: the call fails with [`Error::RetryExhausted`][crate::Error::RetryExhausted],
//!   which carries the number of retries and the final failure as its source. This also
//!   applies to `max_retry_attempts(0)`, so a single failed attempt is wrapped too.
//! - The [`retry_if`][RetryOptions::retry_if] predicate rejected a failure while retries
//!   were still available: that failure is returned unwrapped.
//!
//! # Defaults
//!
//! | Parameter | Default Value | Configured By |
//! |-----------|---------------|---------------|
//! | Max retry attempts | `3` (4 total) | [`max_retry_attempts`][RetryOptions::max_retry_attempts] |
//! | Base delay | `1000ms` | [`base_delay`][RetryOptions::base_delay] |
//! | Backoff strategy | `Constant` | [`backoff`][RetryOptions::backoff], [`exponential`][RetryOptions::exponential] |
//! | Max delay | `None` | [`max_delay`][RetryOptions::max_delay] |
//! | Retry predicate | always retry | [`retry_if`][RetryOptions::retry_if] |
//!
//! # Logs
//!
//! - `flowpath.retry` (WARN): emitted before each retry delay, with `attempt.index` and
//!   `retry.delay` (seconds).
//! - `flowpath.retry.exhausted` (WARN): emitted when the retry budget is used up.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use flowpath::retry::{RetryOptions, retry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let options = RetryOptions::new()
//!     .max_retry_attempts(2)
//!     .base_delay(Duration::from_millis(10))
//!     .retry_if(|error| error.to_string() == "Retryable");
//!
//! let error = retry(&options, |attempt| async move {
//!     if attempt.is_first() {
//!         Err::<(), _>("Retryable")
//!     } else {
//!         Err("Non-retryable")
//!     }
//! })
//! .await
//! .unwrap_err();
//!
//! // rejected by the predicate, so not wrapped
//! assert_eq!(error.to_string(), "Non-retryable");
//! # }
//! ```

mod args;
mod callbacks;
pub(crate) mod constants;
mod engine;
mod options;

pub use args::OnRetryArgs;
pub(crate) use callbacks::{OnRetry, RetryIf};
pub use engine::retry;
pub use options::RetryOptions;
