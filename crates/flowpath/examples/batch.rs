// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Processing a list of jobs with bounded concurrency, timeouts, retries and progress reporting.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use flowpath::batch::{BatchOptions, batch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), flowpath::Error> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let jobs = vec!["alpha", "beta", "gamma", "delta", "epsilon"];
    let beta_attempts = AtomicU32::new(0);

    let options = BatchOptions::new()
        .concurrency(2)
        .retries(2)
        .retry_delay(Duration::from_millis(20))
        .timeout(Duration::from_millis(200))
        .on_progress(|args| match args.outcome() {
            Ok(len) => println!("[{}/{}] job {} -> {len}", args.completed(), args.total(), args.index()),
            Err(e) => println!("[{}/{}] job {} failed: {e}", args.completed(), args.total(), args.index()),
        });

    let lengths = batch(jobs, &options, |job, index| {
        let flaky = job == "beta" && beta_attempts.fetch_add(1, Ordering::SeqCst) == 0;
        async move {
            tokio::time::sleep(Duration::from_millis(10 * (index as u64 + 1))).await;
            if flaky {
                Err(format!("job {job} hit a transient failure"))
            } else {
                Ok(job.len())
            }
        }
    })
    .await?;

    println!("results in input order: {lengths:?}");

    Ok(())
}
