// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Building retry and batch options from JSON settings.

use std::time::Duration;

use flowpath::batch::{BatchOptions, batch};
use flowpath::config::{BatchConfig, RetryConfig};
use flowpath::retry::{RetryOptions, retry};

const SETTINGS: &str = r#"{
    "retry": { "attempts": 2, "delay": 25 },
    "batch": { "concurrency": 3, "retries": 1, "retry_delay": 10, "timeout": 500 }
}"#;

#[derive(serde::Deserialize)]
struct Settings {
    retry: RetryConfig,
    batch: BatchConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings: Settings = serde_json::from_str(SETTINGS)?;

    let retry_options = RetryOptions::from(settings.retry);
    let greeting = retry(&retry_options, |attempt| async move {
        if attempt.is_first() { Err("warming up") } else { Ok("ready") }
    })
    .await?;
    println!("service is {greeting}");

    let batch_options = BatchOptions::try_from(settings.batch)?;
    let squares = batch(1..=9_u64, &batch_options, |n, _| async move {
        tokio::time::sleep(Duration::from_millis(n)).await;
        Ok::<_, String>(n * n)
    })
    .await?;
    println!("squares: {squares:?}");

    Ok(())
}
