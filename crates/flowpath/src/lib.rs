// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Retry with backoff and bounded-concurrency batch processing for async operations.
//!
//! The crate offers two building blocks for running unreliable async work:
//!
//! - [`retry`][retry::retry()] re-invokes a failing operation with a fixed or exponentially
//!   growing delay, optionally filtering which failures are worth retrying.
//! - [`batch`][batch::batch()] processes a collection with at most `N` items in flight,
//!   bounding every attempt with a timeout and retrying failed items. Results are returned
//!   in input order.
//!
//! Both are built on the smaller helpers [`timeout()`] and [`chunk()`], which are exported as
//! well.
//!
//! # Runtime
//!
//! Delays and timeouts use the [Tokio](https://docs.rs/tokio) time driver, so the futures
//! returned by this crate must be polled inside a Tokio runtime with time enabled. Nothing is
//! spawned: all work is driven by the task that awaits the returned future, and dropping
//! that future cancels any attempt in progress.
//!
//! # Errors
//!
//! Operations may fail with any type convertible into [`BoxError`]. Failures are normalized
//! into [`Error`], whose variants distinguish invalid arguments, timeouts, exhausted retry
//! budgets and failures of the operation itself.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use flowpath::batch::{BatchOptions, batch};
//! use flowpath::retry::{RetryOptions, retry};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), flowpath::Error> {
//! let options = RetryOptions::new().max_retry_attempts(3).base_delay(Duration::from_millis(10));
//! let greeting = retry(&options, |_attempt| async { Ok::<_, std::io::Error>("hello") }).await?;
//! assert_eq!(greeting, "hello");
//!
//! let options = BatchOptions::new().concurrency(2).timeout(Duration::from_secs(1));
//! let squares = batch(1..=4, &options, |n, _index| async move { Ok::<_, String>(n * n) }).await?;
//! assert_eq!(squares, vec![1, 4, 9, 16]);
//! # Ok(())
//! # }
//! ```
//!
//! # Logs
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events for retries, batch groups and
//! failing items. A panic inside a user callback is caught and reported as a
//! `flowpath.callback_panicked` event at ERROR level.
//!
//! # Features
//!
//! - `serde`: Enables the [`config`] module with serializable retry and batch settings.

mod attempt;
mod backoff;
mod chunk;
mod define_fn_wrapper;
mod error;
mod guard;
mod timeout;

pub(crate) use define_fn_wrapper::define_fn_wrapper;

pub use attempt::Attempt;
pub use backoff::Backoff;
pub use chunk::chunk;
pub use error::{BoxError, Error, Result};
pub use timeout::timeout;

pub mod batch;
pub mod retry;

#[cfg(any(feature = "serde", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod config;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
pub(crate) mod testing;
