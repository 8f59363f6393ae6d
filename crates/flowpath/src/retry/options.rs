// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use super::constants::{DEFAULT_BACKOFF, DEFAULT_BASE_DELAY, DEFAULT_RETRY_ATTEMPTS};
use super::{OnRetry, OnRetryArgs, RetryIf};
use crate::backoff::DelayBackoff;
use crate::{Backoff, Error};

/// Configures how [`retry`][super::retry()] re-invokes a failing operation.
///
/// Options are immutable once handed to [`retry`][super::retry()] and can be reused across
/// any number of calls. Cloning is cheap; callbacks are shared.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use flowpath::retry::RetryOptions;
///
/// let options = RetryOptions::new()
///     .max_retry_attempts(5)
///     .base_delay(Duration::from_millis(200))
///     .exponential(true)
///     .retry_if(|error| !error.is_invalid_argument())
///     .on_retry(|error, args| {
///         eprintln!("attempt {} failed: {error}, retrying in {:?}", args.attempt(), args.retry_delay());
///     });
/// # let _ = options;
/// ```
#[derive(Debug, Clone)]
pub struct RetryOptions {
    pub(crate) max_attempts: u32,
    pub(crate) backoff: DelayBackoff,
    pub(crate) retry_if: RetryIf,
    pub(crate) on_retry: Option<OnRetry>,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            backoff: DelayBackoff {
                backoff: DEFAULT_BACKOFF,
                base_delay: DEFAULT_BASE_DELAY,
                max_delay: None,
            },
            retry_if: RetryIf::always(),
            on_retry: None,
        }
    }
}

impl RetryOptions {
    /// Creates options with the default retry policy.
    ///
    /// | Parameter | Default |
    /// |-----------|---------|
    /// | Max retry attempts | `3` (4 invocations in total) |
    /// | Base delay | `1000ms` |
    /// | Backoff | [`Backoff::Constant`] |
    /// | Max delay | none |
    /// | Retry predicate | every failure is retryable |
    /// | Retry callback | none |
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of retries made after the initial attempt.
    ///
    /// With `max_retry_attempts(n)` the operation is invoked at most `n + 1` times. Zero
    /// means a single attempt; its failure is still reported as
    /// [`Error::RetryExhausted`].
    ///
    /// **Default**: 3
    #[must_use]
    pub fn max_retry_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay between attempts.
    ///
    /// With [`Backoff::Exponential`] this is the delay before the first retry.
    ///
    /// **Default**: 1000ms
    #[must_use]
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.backoff.base_delay = delay;
        self
    }

    /// Sets the backoff strategy.
    ///
    /// **Default**: [`Backoff::Constant`]
    #[must_use]
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff.backoff = backoff;
        self
    }

    /// Switches between exponential (`true`) and constant (`false`) backoff.
    #[must_use]
    pub fn exponential(self, exponential: bool) -> Self {
        self.backoff(if exponential { Backoff::Exponential } else { Backoff::Constant })
    }

    /// Caps the delay between attempts.
    ///
    /// **Default**: none
    #[must_use]
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.backoff.max_delay = Some(max_delay);
        self
    }

    /// Sets the predicate deciding whether a failure is retried.
    ///
    /// When the predicate rejects a failure before the retry budget is used up, that
    /// failure is returned as is, without the [`Error::RetryExhausted`] wrapper.
    ///
    /// **Default**: every failure is retryable
    #[must_use]
    pub fn retry_if(mut self, predicate: impl Fn(&Error) -> bool + Send + Sync + 'static) -> Self {
        self.retry_if = RetryIf::new(predicate);
        self
    }

    /// Sets a callback invoked after each failed attempt that will be retried.
    ///
    /// The callback runs before the delay. A panic inside the callback is caught and logged;
    /// it never interrupts the retry loop.
    ///
    /// **Default**: none
    #[must_use]
    pub fn on_retry(mut self, callback: impl Fn(&Error, OnRetryArgs) + Send + Sync + 'static) -> Self {
        self.on_retry = Some(OnRetry::new(callback));
        self
    }

    /// Returns the configured number of retries.
    #[must_use]
    pub fn get_max_retry_attempts(&self) -> u32 {
        self.max_attempts
    }
}
