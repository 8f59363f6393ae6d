// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Processing collections with bounded concurrency, per-attempt timeouts and retries.
//!
//! [`batch`] runs an async function over every item of a collection. Items are dispatched in
//! consecutive groups of [`concurrency`][BatchOptions::concurrency] items, so at most that
//! many are in flight, and a group starts only after the previous one has fully settled.
//! Results come back in input order.
//!
//! When an item fails for good, the rest of its group still runs to completion, then the
//! batch fails with that item's failure and no further group is started. If several items
//! of a group fail, the one that failed first is reported.
//!
//! # Defaults
//!
//! | Parameter | Default Value | Configured By |
//! |-----------|---------------|---------------|
//! | Concurrency | unbounded | [`concurrency`][BatchOptions::concurrency] |
//! | Retries per item | `0` | [`retries`][BatchOptions::retries] |
//! | Retry delay | `1000ms` | [`retry_delay`][BatchOptions::retry_delay] |
//! | Exponential backoff | `false` | [`exponential_backoff`][BatchOptions::exponential_backoff] |
//! | Timeout per attempt | none | [`timeout`][BatchOptions::timeout] |
//!
//! # Logs
//!
//! - `flowpath.batch.group` (DEBUG): emitted when a group is dispatched, with `group.index`
//!   and `group.size`.
//! - `flowpath.batch.item_failed` (DEBUG): emitted when an item settles with a failure.
//!
//! Retried items additionally emit the logs of the [`retry`][crate::retry] module.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use flowpath::batch::{BatchOptions, batch};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), flowpath::Error> {
//! let options = BatchOptions::new()
//!     .concurrency(2)
//!     .retries(1)
//!     .retry_delay(Duration::from_millis(5))
//!     .timeout(Duration::from_secs(1))
//!     .on_progress(|args| println!("{}/{}", args.completed(), args.total()));
//!
//! let lengths = batch(["a", "bb", "ccc"], &options, |word, _| async move { Ok::<_, String>(word.len()) }).await?;
//!
//! assert_eq!(lengths, vec![1, 2, 3]);
//! # Ok(())
//! # }
//! ```

mod args;
mod callbacks;
pub(crate) mod constants;
mod engine;
mod options;

pub use args::ProgressArgs;
pub(crate) use callbacks::OnProgress;
pub use engine::batch;
pub use options::BatchOptions;
