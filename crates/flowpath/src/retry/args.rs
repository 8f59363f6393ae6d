// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use crate::Attempt;

/// Arguments for the [`on_retry`][super::RetryOptions::on_retry] callback.
///
/// Describes the attempt that just failed and the delay that follows it.
#[derive(Debug, Clone, Copy)]
pub struct OnRetryArgs {
    pub(super) attempt: Attempt,
    pub(super) retry_delay: Duration,
}

impl OnRetryArgs {
    /// Returns the attempt that failed.
    #[must_use]
    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// Returns the delay before the next attempt starts.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}
