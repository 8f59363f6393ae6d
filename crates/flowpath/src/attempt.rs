// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Display;

/// Identifies a single invocation of a retried operation.
///
/// Attempts are indexed from 0: the initial call is attempt 0, the first retry is
/// attempt 1, and so on. An operation with `max_retry_attempts(n)` sees at most `n + 1`
/// attempts and the final one reports [`is_last`][Attempt::is_last].
///
/// # Examples
///
/// ```
/// use flowpath::Attempt;
///
/// let attempt = Attempt::new(0, false);
/// assert!(attempt.is_first());
/// assert!(!attempt.is_last());
/// assert_eq!(attempt.index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    index: u32,
    is_last: bool,
}

impl Default for Attempt {
    fn default() -> Self {
        Self::new(0, true)
    }
}

impl Attempt {
    /// Creates a new attempt with the given 0-based index.
    #[must_use]
    pub fn new(index: u32, is_last: bool) -> Self {
        Self { index, is_last }
    }

    /// Returns the first attempt for an operation allowed `max_retries` retries.
    pub(crate) fn first(max_retries: u32) -> Self {
        Self::new(0, max_retries == 0)
    }

    /// Returns true if this is the initial attempt.
    #[must_use]
    pub fn is_first(self) -> bool {
        self.index == 0
    }

    /// Returns true if no further attempts will be made after this one fails.
    #[must_use]
    pub fn is_last(self) -> bool {
        self.is_last
    }

    /// Returns the 0-based attempt index.
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Advances to the next attempt, or returns `None` when the retry budget is used up.
    #[cfg_attr(test, mutants::skip)] // causes test timeouts
    pub(crate) fn increment(self, max_retries: u32) -> Option<Self> {
        if self.index >= max_retries {
            return None;
        }

        let next = self.index.saturating_add(1);
        Some(Self::new(next, next == max_retries))
    }
}

impl Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.index.fmt(f)
    }
}
