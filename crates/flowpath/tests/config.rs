// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "serde")]

//! Integration tests for loading engine settings from configuration.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use flowpath::batch::{BatchOptions, batch};
use flowpath::config::{BatchConfig, RetryConfig};
use flowpath::retry::{RetryOptions, retry};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn retry_config_drives_retry() {
    let config: RetryConfig = serde_json::from_str(r#"{ "attempts": 2, "delay": 10, "exponential": true }"#).unwrap();
    let options = RetryOptions::from(config);
    let calls = AtomicU32::new(0);
    let origin = Instant::now();

    let error = retry(&options, |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err::<(), _>("unavailable") }
    })
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(error.attempts(), Some(2));
    // 10ms + 20ms
    assert!(origin.elapsed() >= Duration::from_millis(30) && origin.elapsed() < Duration::from_millis(35));
}

#[tokio::test(start_paused = true)]
async fn batch_config_drives_batch() {
    let config: BatchConfig = serde_json::from_str(r#"{ "concurrency": 2, "timeout": 50 }"#).unwrap();
    let options = BatchOptions::try_from(config).unwrap();

    let error = batch([10_u64, 100], &options, |delay, _| async move {
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok::<_, String>(delay)
    })
    .await
    .unwrap_err();

    assert_eq!(error.to_string(), "Timeout of 50ms exceeded");
}

#[test]
fn invalid_batch_config_is_rejected() {
    let config: BatchConfig = serde_json::from_str(r#"{ "concurrency": 0 }"#).unwrap();

    let error = BatchOptions::<()>::try_from(config).unwrap_err();

    assert_eq!(error.to_string(), "invalid argument 'concurrency': concurrency must be at least 1");
}

#[test]
fn mistyped_field_fails_to_parse() {
    let result = serde_json::from_str::<RetryConfig>(r#"{ "exponential": "sometimes" }"#);

    assert!(result.is_err());
}
