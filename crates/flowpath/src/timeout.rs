// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use crate::{BoxError, Error, Result};

/// Races a fallible future against a timer.
///
/// Resolves with the future's output if it completes within `duration`, otherwise fails with
/// [`Error::Timeout`]. When the timer wins, the future is dropped and its eventual result is
/// never observed. Failures of the future itself are normalized with
/// [`Error::from_operation`].
///
/// Must be awaited within a Tokio runtime with the time driver enabled.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let slow = async {
///     tokio::time::sleep(Duration::from_secs(60)).await;
///     Ok::<_, std::io::Error>("done")
/// };
///
/// let error = flowpath::timeout(Duration::from_millis(10), slow).await.unwrap_err();
/// assert_eq!(error.to_string(), "Timeout of 10ms exceeded");
/// # }
/// ```
pub async fn timeout<T, E, F>(duration: Duration, future: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<BoxError>,
{
    match tokio::time::timeout(duration, future).await {
        Ok(output) => output.map_err(Error::from_operation),
        Err(_elapsed) => Err(Error::Timeout { timeout: duration }),
    }
}
