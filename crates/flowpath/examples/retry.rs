// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Retrying a flaky operation with exponential backoff and a retry predicate.

use std::io::{Error, ErrorKind};
use std::time::Duration;

use flowpath::retry::{RetryOptions, retry};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), flowpath::Error> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let options = RetryOptions::new()
        .max_retry_attempts(4)
        .base_delay(Duration::from_millis(50))
        .exponential(true)
        .max_delay(Duration::from_millis(300))
        .retry_if(|error| !error.to_string().contains("permission"))
        .on_retry(|error, args| {
            println!("attempt {} failed ({error}), next try in {:?}", args.attempt(), args.retry_delay());
        });

    let output = retry(&options, |attempt| fetch_record(attempt.index())).await?;
    println!("fetched: {output}");

    // non-retryable failures come back unwrapped
    match retry(&options, |_| async { Err::<String, _>(Error::new(ErrorKind::PermissionDenied, "permission denied")) }).await {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("gave up immediately: {e}"),
    }

    Ok(())
}

// Fails for the first three attempts
async fn fetch_record(attempt: u32) -> Result<String, Error> {
    if attempt < 3 {
        Err(Error::new(ErrorKind::ConnectionReset, "connection reset"))
    } else {
        Ok(format!("record fetched on attempt {attempt}"))
    }
}
