// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// Items are not retried unless requested.
pub(crate) const DEFAULT_RETRIES: u32 = 0;

/// Default delay between attempts of a single item.
pub(crate) const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
