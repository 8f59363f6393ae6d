// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::min;
use std::time::Duration;

/// Defines how the delay between retry attempts evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Backoff {
    /// The same delay before every retry.
    ///
    /// **Example with `1s` base delay:** `1s, 1s, 1s, 1s, ...`
    #[default]
    Constant,

    /// The delay doubles with every retry: before retry `k` (0-based) the wait is
    /// `base_delay * 2^k`.
    ///
    /// **Example with `1s` base delay:** `1s, 2s, 4s, 8s, ...`
    Exponential,
}

/// Computes the sequence of delays applied between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DelayBackoff {
    pub backoff: Backoff,
    pub base_delay: Duration,
    pub max_delay: Option<Duration>,
}

impl DelayBackoff {
    /// Returns the delay to wait after the failure of attempt `attempt_index`.
    pub fn delay(&self, attempt_index: u32) -> Duration {
        let delay = match self.backoff {
            Backoff::Constant => self.base_delay,
            Backoff::Exponential => self.base_delay.saturating_mul(2_u32.saturating_pow(attempt_index)),
        };

        self.max_delay.map_or(delay, |max| min(delay, max))
    }

    /// Returns an iterator over the delays of consecutive retries.
    #[cfg(test)]
    pub fn delays(self) -> impl Iterator<Item = Duration> {
        (0..).map(move |attempt| self.delay(attempt))
    }
}
