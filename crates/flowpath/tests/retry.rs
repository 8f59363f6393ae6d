// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the retry engine using only public API.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flowpath::retry::{RetryOptions, retry};
use flowpath::{Backoff, Error};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn fails_k_times_then_succeeds() {
    for failures in 0..=3 {
        let calls = AtomicU32::new(0);
        let options = RetryOptions::new().max_retry_attempts(3).base_delay(Duration::from_millis(10));

        let value = retry(&options, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt.index() < failures {
                    Err(format!("failure {}", attempt.index()))
                } else {
                    Ok("recovered")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), failures + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn always_failing_operation_exhausts_budget() {
    for max_attempts in [0, 1, 4] {
        let calls = AtomicU32::new(0);
        let options = RetryOptions::new()
            .max_retry_attempts(max_attempts)
            .base_delay(Duration::from_millis(1));

        let error = retry(&options, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>("permanent") }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), max_attempts + 1);
        assert!(error.is_retry_exhausted());
        assert_eq!(error.attempts(), Some(max_attempts));
    }
}

#[tokio::test(start_paused = true)]
async fn exhausted_error_reports_attempts_and_cause() {
    let calls = AtomicU32::new(0);
    let options = RetryOptions::new().max_retry_attempts(2).base_delay(Duration::from_millis(10));

    let error = retry(&options, |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err::<(), _>("Always fails") }
    })
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(matches!(error, Error::RetryExhausted { attempts: 2, .. }));
    assert_eq!(error.to_string(), "all retry attempts failed: Always fails after 2 attempts");
    assert_eq!(error.last_error().map(ToString::to_string).as_deref(), Some("Always fails"));
    assert_eq!(
        std::error::Error::source(&error).map(ToString::to_string).as_deref(),
        Some("Always fails")
    );
}

#[tokio::test(start_paused = true)]
async fn non_retryable_failure_is_returned_unwrapped() {
    let calls = AtomicU32::new(0);
    let options = RetryOptions::new()
        .max_retry_attempts(3)
        .base_delay(Duration::from_millis(10))
        .retry_if(|error| error.to_string() == "Retryable");

    let error = retry(&options, |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt.is_first() {
                Err::<(), _>("Retryable")
            } else {
                Err("Non-retryable")
            }
        }
    })
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!error.is_retry_exhausted());
    assert_eq!(error.to_string(), "Non-retryable");
}

#[tokio::test(start_paused = true)]
async fn constant_backoff_waits_base_delay() {
    let options = RetryOptions::new().max_retry_attempts(3).base_delay(Duration::from_millis(100));
    let starts = Mutex::new(Vec::new());
    let origin = Instant::now();

    let _ = retry(&options, |_| {
        starts.lock().unwrap().push(origin.elapsed());
        async { Err::<(), _>("fail") }
    })
    .await;

    let starts = starts.into_inner().unwrap();
    assert_eq!(starts.len(), 4);
    for pair in starts.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= Duration::from_millis(100) && gap < Duration::from_millis(105), "{gap:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn exponential_backoff_doubles_delay() {
    let options = RetryOptions::new()
        .max_retry_attempts(3)
        .base_delay(Duration::from_millis(100))
        .backoff(Backoff::Exponential);
    let starts = Mutex::new(Vec::new());
    let origin = Instant::now();

    let _ = retry(&options, |_| {
        starts.lock().unwrap().push(origin.elapsed());
        async { Err::<(), _>("fail") }
    })
    .await;

    let starts = starts.into_inner().unwrap();
    let expected = [100, 200, 400];
    for (pair, expected) in starts.windows(2).zip(expected) {
        let gap = pair[1] - pair[0];
        let expected = Duration::from_millis(expected);
        assert!(gap >= expected && gap < expected + Duration::from_millis(5), "{gap:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn max_delay_caps_exponential_growth() {
    let options = RetryOptions::new()
        .max_retry_attempts(4)
        .base_delay(Duration::from_millis(100))
        .exponential(true)
        .max_delay(Duration::from_millis(250));
    let delays = Arc::new(Mutex::new(Vec::new()));
    let delays_clone = Arc::clone(&delays);
    let options = options.on_retry(move |_, args| delays_clone.lock().unwrap().push(args.retry_delay()));

    let _ = retry(&options, |_| async { Err::<(), _>("fail") }).await;

    assert_eq!(
        *delays.lock().unwrap(),
        [100, 200, 250, 250].map(Duration::from_millis).to_vec()
    );
}

#[tokio::test(start_paused = true)]
async fn on_retry_receives_failure_and_attempt() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let options = RetryOptions::new()
        .max_retry_attempts(2)
        .base_delay(Duration::from_millis(10))
        .on_retry(move |error, args| {
            seen_clone
                .lock()
                .unwrap()
                .push((error.to_string(), args.attempt().index(), args.retry_delay()));
        });

    let _ = retry(&options, |attempt| async move { Err::<(), _>(format!("failure {attempt}")) }).await;

    // no notification for the final failure
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("failure 0".to_string(), 0, Duration::from_millis(10)),
            ("failure 1".to_string(), 1, Duration::from_millis(10)),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn panicking_on_retry_is_swallowed() {
    let calls = AtomicU32::new(0);
    let options = RetryOptions::new()
        .max_retry_attempts(2)
        .base_delay(Duration::from_millis(10))
        .on_retry(|_, _| panic!("callback bug"));

    let value = retry(&options, |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { if attempt.index() < 2 { Err("flaky") } else { Ok(attempt.index()) } }
    })
    .await
    .unwrap();

    assert_eq!(value, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn timeout_inside_retry_is_retried() {
    let options = RetryOptions::new()
        .max_retry_attempts(1)
        .base_delay(Duration::from_millis(10))
        .retry_if(Error::is_timeout);

    let value = retry(&options, |attempt| {
        flowpath::timeout(Duration::from_millis(50), async move {
            if attempt.is_first() {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Ok::<_, std::io::Error>(attempt.index())
        })
    })
    .await
    .unwrap();

    assert_eq!(value, 1);
}

#[tokio::test(start_paused = true)]
async fn options_are_reusable() {
    let options = RetryOptions::new().max_retry_attempts(1).base_delay(Duration::from_millis(10));

    for _ in 0..2 {
        let calls = AtomicU32::new(0);
        let _ = retry(&options, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>("fail") }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
