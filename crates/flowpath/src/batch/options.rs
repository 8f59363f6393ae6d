// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::time::Duration;

use super::constants::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY};
use super::{OnProgress, ProgressArgs};
use crate::retry::RetryOptions;
use crate::{Backoff, Error, Result};

/// Configures how [`batch`][super::batch()] processes a collection.
///
/// `R` is the type produced for each item; it appears in the options because the
/// [`on_progress`][Self::on_progress] callback observes each result.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use flowpath::batch::BatchOptions;
///
/// let options = BatchOptions::<String>::new()
///     .concurrency(4)
///     .retries(2)
///     .retry_delay(Duration::from_millis(250))
///     .exponential_backoff(true)
///     .timeout(Duration::from_secs(5))
///     .on_progress(|args| println!("{}/{} done", args.completed(), args.total()));
/// # let _ = options;
/// ```
pub struct BatchOptions<R> {
    pub(crate) concurrency: Option<usize>,
    pub(crate) retry: RetryOptions,
    pub(crate) timeout: Option<Duration>,
    pub(crate) on_progress: Option<OnProgress<R>>,
}

impl<R> Default for BatchOptions<R> {
    fn default() -> Self {
        Self {
            concurrency: None,
            retry: RetryOptions::new()
                .max_retry_attempts(DEFAULT_RETRIES)
                .base_delay(DEFAULT_RETRY_DELAY),
            timeout: None,
            on_progress: None,
        }
    }
}

impl<R> Clone for BatchOptions<R> {
    fn clone(&self) -> Self {
        Self {
            concurrency: self.concurrency,
            retry: self.retry.clone(),
            timeout: self.timeout,
            on_progress: self.on_progress.clone(),
        }
    }
}

impl<R> fmt::Debug for BatchOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchOptions")
            .field("concurrency", &self.concurrency)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field("on_progress", &self.on_progress)
            .finish()
    }
}

impl<R> BatchOptions<R> {
    /// Creates options that process every item at once, without retries or timeouts.
    ///
    /// | Parameter | Default |
    /// |-----------|---------|
    /// | Concurrency | unbounded |
    /// | Retries | `0` |
    /// | Retry delay | `1000ms` |
    /// | Exponential backoff | `false` |
    /// | Timeout | none |
    /// | Progress callback | none |
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many items are processed at the same time.
    ///
    /// Items are dispatched in consecutive groups of this size and a group starts only once
    /// every item of the previous group has settled. Zero is rejected when the batch runs.
    ///
    /// **Default**: unbounded
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Removes the concurrency limit so that all items start together.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.concurrency = None;
        self
    }

    /// Sets how many times a failed item is retried.
    ///
    /// With retries enabled, an item that fails on every attempt is reported as
    /// [`Error::RetryExhausted`]. Without retries the item's failure is reported as is.
    ///
    /// **Default**: 0
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retry = self.retry.max_retry_attempts(retries);
        self
    }

    /// Sets the delay between attempts of a single item.
    ///
    /// **Default**: 1000ms
    #[must_use]
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry = self.retry.base_delay(delay);
        self
    }

    /// Doubles the delay after each failed attempt of an item.
    ///
    /// **Default**: `false`
    #[must_use]
    pub fn exponential_backoff(mut self, exponential: bool) -> Self {
        self.retry = self.retry.exponential(exponential);
        self
    }

    /// Bounds every attempt of every item by `timeout`.
    ///
    /// An attempt that does not complete in time fails with [`Error::Timeout`] and is
    /// retried like any other failure.
    ///
    /// **Default**: none
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a callback invoked each time an item settles.
    ///
    /// The callback observes the running count of settled items along with the item's
    /// result or final failure. A panic inside the callback is caught and logged.
    ///
    /// **Default**: none
    #[must_use]
    pub fn on_progress(mut self, callback: impl Fn(ProgressArgs<'_, R>) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(OnProgress::new(callback));
        self
    }

    /// Returns the concurrency limit, or `None` when unbounded.
    #[must_use]
    pub fn get_concurrency(&self) -> Option<usize> {
        self.concurrency
    }

    /// Returns the number of retries per item.
    #[must_use]
    pub fn get_retries(&self) -> u32 {
        self.retry.get_max_retry_attempts()
    }

    /// Returns the per-attempt timeout, if any.
    #[must_use]
    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the backoff applied between attempts of an item.
    #[must_use]
    pub fn get_backoff(&self) -> Backoff {
        self.retry.backoff.backoff
    }

    /// Checks the options for values the batch engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the concurrency limit is zero or the timeout is
    /// zero.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            return Err(Error::invalid_argument("concurrency", "concurrency must be at least 1"));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::invalid_argument("timeout", "timeout must be greater than zero"));
        }

        Ok(())
    }
}
