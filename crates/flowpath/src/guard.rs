// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Invokes a user callback, catching and logging any panic it raises.
///
/// Notification callbacks (`on_retry`, `on_progress`) must never abort the retry loop or
/// the batch that invoked them.
pub(crate) fn invoke_callback(callback: &'static str, f: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        tracing::event!(
            name: "flowpath.callback_panicked",
            tracing::Level::ERROR,
            callback.name = callback,
            panic.message = panic_message(payload.as_ref()),
            "user callback panicked"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
