// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::Error;

/// Arguments for the [`on_progress`][super::BatchOptions::on_progress] callback.
///
/// A snapshot taken right after one item settled, either with its result or with its final
/// failure (after any retries).
#[derive(Debug)]
pub struct ProgressArgs<'a, R> {
    pub(super) completed: usize,
    pub(super) total: usize,
    pub(super) index: usize,
    pub(super) outcome: Result<&'a R, &'a Error>,
}

impl<'a, R> ProgressArgs<'a, R> {
    /// Returns how many items have settled so far, including this one.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Returns the number of items in the batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the input position of the item that settled.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the item's result if it succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&'a R> {
        self.outcome.ok()
    }

    /// Returns the item's failure if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&'a Error> {
        self.outcome.err()
    }

    /// Returns the outcome of the item.
    #[must_use]
    pub fn outcome(&self) -> Result<&'a R, &'a Error> {
        self.outcome
    }
}
