// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Serializable retry and batch settings.
//!
//! These records mirror [`RetryOptions`] and [`BatchOptions`] for settings loaded from
//! configuration files. Every field is optional when deserializing and durations are
//! expressed in milliseconds. Callbacks and predicates cannot be serialized; attach them
//! to the options after conversion.
//!
//! ```
//! use flowpath::batch::BatchOptions;
//! use flowpath::config::BatchConfig;
//!
//! let config: BatchConfig = serde_json::from_str(r#"{ "concurrency": 8, "retries": 2 }"#).unwrap();
//! let options = BatchOptions::<String>::try_from(config)?;
//!
//! assert_eq!(options.get_concurrency(), Some(8));
//! assert_eq!(options.get_retries(), 2);
//! # Ok::<(), flowpath::Error>(())
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::batch::BatchOptions;
use crate::batch::constants::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY};
use crate::retry::RetryOptions;
use crate::retry::constants::{DEFAULT_BACKOFF, DEFAULT_BASE_DELAY, DEFAULT_RETRY_ATTEMPTS};
use crate::{Backoff, Error};

/// Serializable form of [`RetryOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Number of retries after the initial attempt (default: 3).
    pub attempts: u32,

    /// Delay between attempts in milliseconds (default: 1000).
    pub delay: u64,

    /// Whether the delay doubles after every failed attempt (default: false).
    pub exponential: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: millis(DEFAULT_BASE_DELAY),
            exponential: DEFAULT_BACKOFF == Backoff::Exponential,
        }
    }
}

impl From<RetryConfig> for RetryOptions {
    fn from(config: RetryConfig) -> Self {
        Self::new()
            .max_retry_attempts(config.attempts)
            .base_delay(Duration::from_millis(config.delay))
            .exponential(config.exponential)
    }
}

/// Serializable form of [`BatchOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of items in flight; `None` means unbounded (default: unbounded).
    pub concurrency: Option<usize>,

    /// Retries per item (default: 0).
    pub retries: u32,

    /// Delay between attempts of an item in milliseconds (default: 1000).
    pub retry_delay: u64,

    /// Whether the retry delay doubles after every failed attempt (default: false).
    pub exponential_backoff: bool,

    /// Per-attempt timeout in milliseconds; `None` disables it (default: none).
    pub timeout: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            retries: DEFAULT_RETRIES,
            retry_delay: millis(DEFAULT_RETRY_DELAY),
            exponential_backoff: false,
            timeout: None,
        }
    }
}

impl<R> TryFrom<BatchConfig> for BatchOptions<R> {
    type Error = Error;

    fn try_from(config: BatchConfig) -> Result<Self, Self::Error> {
        let mut options = Self::new()
            .retries(config.retries)
            .retry_delay(Duration::from_millis(config.retry_delay))
            .exponential_backoff(config.exponential_backoff);

        if let Some(concurrency) = config.concurrency {
            options = options.concurrency(concurrency);
        }

        if let Some(timeout) = config.timeout {
            options = options.timeout(Duration::from_millis(timeout));
        }

        options.validate()?;
        Ok(options)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
