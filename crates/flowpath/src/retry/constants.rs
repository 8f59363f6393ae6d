// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use crate::Backoff;

/// Default number of retries after the initial attempt.
pub(crate) const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default base delay between attempts.
pub(crate) const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Fixed delays unless exponential growth is requested.
pub(crate) const DEFAULT_BACKOFF: Backoff = Backoff::Constant;
