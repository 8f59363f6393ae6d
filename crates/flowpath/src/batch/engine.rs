// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;

use super::{BatchOptions, OnProgress, ProgressArgs};
use crate::guard::invoke_callback;
use crate::retry::retry;
use crate::{Attempt, BoxError, Error, Result, chunk, timeout};

/// Processes every item of a collection, bounding how many are in flight at once.
///
/// `process` is called with a clone of the item and its input position for every attempt.
/// Items are dispatched in consecutive groups of [`concurrency`][BatchOptions::concurrency]
/// items; a group is fully settled before the next one starts. Each attempt is bounded by
/// the configured [`timeout`][BatchOptions::timeout] and failed items are retried according
/// to [`retries`][BatchOptions::retries].
///
/// On success the results are returned in input order, regardless of the order in which
/// items completed.
///
/// Must be awaited within a Tokio runtime with the time driver enabled. All items are driven
/// by the calling task; nothing is spawned.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if the options are invalid. No item is processed.
/// - The final failure of the first item to fail, once every item of its group has settled.
///   Later groups are not started. With retries enabled this is [`Error::RetryExhausted`]
///   wrapping the last attempt's failure.
///
/// # Examples
///
/// ```
/// use flowpath::batch::{BatchOptions, batch};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), flowpath::Error> {
/// let options = BatchOptions::new().concurrency(2);
///
/// let doubled = batch([1, 2, 3, 4, 5], &options, |item, _index| async move { Ok::<_, String>(item * 2) }).await?;
///
/// assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
/// # Ok(())
/// # }
/// ```
pub async fn batch<T, R, E, F, Fut>(items: impl IntoIterator<Item = T>, options: &BatchOptions<R>, process: F) -> Result<Vec<R>>
where
    T: Clone,
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: Into<BoxError>,
{
    options.validate()?;

    let items: Vec<(usize, T)> = items.into_iter().enumerate().collect();
    let total = items.len();

    if total == 0 {
        return Ok(Vec::new());
    }

    let group_size = options.concurrency.map_or(total, |limit| limit.min(total));
    let mut run = BatchRun::new(total);

    for (group_index, group) in chunk(items, group_size)?.into_iter().enumerate() {
        tracing::event!(
            name: "flowpath.batch.group",
            tracing::Level::DEBUG,
            group.index = group_index,
            group.size = group.len(),
            "dispatching batch group"
        );

        let mut in_flight: FuturesUnordered<_> = group
            .into_iter()
            .map(|(index, item)| {
                let outcome = options.process_item(&process, item, index);
                async move { (index, outcome.await) }
            })
            .collect();

        while let Some((index, outcome)) = in_flight.next().await {
            run.settle(index, outcome, options.on_progress.as_ref());
        }

        if let Some(error) = run.first_failure.take() {
            return Err(error);
        }
    }

    Ok(run.into_results())
}

impl<R> BatchOptions<R> {
    async fn process_item<T, E, F, Fut>(&self, process: &F, item: T, index: usize) -> Result<R>
    where
        T: Clone,
        F: Fn(T, usize) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Into<BoxError>,
    {
        let attempt = move |_: Attempt| self.run_attempt(process(item.clone(), index));

        if self.retry.max_attempts == 0 {
            attempt(Attempt::first(0)).await
        } else {
            retry(&self.retry, attempt).await
        }
    }

    async fn run_attempt<E, Fut>(&self, attempt: Fut) -> Result<R>
    where
        Fut: Future<Output = std::result::Result<R, E>>,
        E: Into<BoxError>,
    {
        match self.timeout {
            Some(duration) => timeout(duration, attempt).await,
            None => attempt.await.map_err(Error::from_operation),
        }
    }
}

/// Bookkeeping for a running batch.
struct BatchRun<R> {
    results: Vec<Option<R>>,
    completed: usize,
    first_failure: Option<Error>,
}

impl<R> BatchRun<R> {
    fn new(total: usize) -> Self {
        Self {
            results: std::iter::repeat_with(|| None).take(total).collect(),
            completed: 0,
            first_failure: None,
        }
    }

    fn settle(&mut self, index: usize, outcome: Result<R>, on_progress: Option<&OnProgress<R>>) {
        self.completed += 1;
        let completed = self.completed;
        let total = self.results.len();

        match outcome {
            Ok(value) => {
                let value = &*self.results[index].insert(value);
                notify(on_progress, ProgressArgs {
                    completed,
                    total,
                    index,
                    outcome: Ok(value),
                });
            }
            Err(error) => {
                tracing::event!(
                    name: "flowpath.batch.item_failed",
                    tracing::Level::DEBUG,
                    item.index = index,
                    error = %error,
                    "batch item failed"
                );

                notify(on_progress, ProgressArgs {
                    completed,
                    total,
                    index,
                    outcome: Err(&error),
                });

                if self.first_failure.is_none() {
                    self.first_failure = Some(error);
                }
            }
        }
    }

    fn into_results(self) -> Vec<R> {
        debug_assert!(self.first_failure.is_none());
        debug_assert_eq!(self.completed, self.results.len());

        self.results.into_iter().flatten().collect()
    }
}

fn notify<R>(on_progress: Option<&OnProgress<R>>, args: ProgressArgs<'_, R>) {
    if let Some(on_progress) = on_progress {
        invoke_callback("on_progress", || on_progress.call(args));
    }
}
