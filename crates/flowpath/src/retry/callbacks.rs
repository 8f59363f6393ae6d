// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::OnRetryArgs;
use crate::Error;

crate::define_fn_wrapper!(RetryIf(Fn(error: &Error) -> bool));
crate::define_fn_wrapper!(OnRetry(Fn(error: &Error, args: OnRetryArgs)));

impl RetryIf {
    /// Creates a predicate that treats every failure as retryable.
    pub(crate) fn always() -> Self {
        Self::new(|_| true)
    }
}
