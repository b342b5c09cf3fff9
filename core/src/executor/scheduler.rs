use std::future::Future;

use super::client::{execute_query, Endpoint};
use super::progress::{ProgressEvent, ProgressTx};
use crate::model::{ExecutedQueryPair, ReplayQuery};

pub const DEFAULT_CONCURRENCY: usize = 5;

#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    pub local: Endpoint,
    pub production: Endpoint,
    /// Batch size; a batch of `C` queries performs up to `2C` simultaneous
    /// network calls.
    pub concurrency: usize,
    /// Optional observer; receives `(completed, total)` after each batch.
    pub progress: Option<ProgressTx>,
}

impl ExecuteOptions {
    pub fn new(local: Endpoint, production: Endpoint) -> Self {
        Self {
            local,
            production,
            concurrency: DEFAULT_CONCURRENCY,
            progress: None,
        }
    }
}

/// Bounded-parallel map: run `f` over `items` in consecutive batches of at
/// most `batch_size`, collecting outputs in input order. Every item of a
/// batch runs concurrently; the next batch starts only once the whole batch
/// has settled, which bounds peak fan-out and serializes progress.
pub async fn map_batched<'a, T, R, F, Fut>(
    items: &'a [T],
    batch_size: usize,
    f: F,
    mut on_batch: impl FnMut(usize, usize),
) -> Vec<R>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = R> + 'a,
{
    let batch_size = batch_size.max(1);
    let total = items.len();
    let mut out = Vec::with_capacity(total);
    for chunk in items.chunks(batch_size) {
        let batch = futures::future::join_all(chunk.iter().map(&f)).await;
        out.extend(batch);
        on_batch(out.len(), total);
    }
    out
}

async fn execute_pair(
    http: &reqwest::Client,
    query: &ReplayQuery,
    opts: &ExecuteOptions,
) -> ExecutedQueryPair {
    // The two sides of one query are themselves concurrent.
    let (local_response, production_response) = futures::future::join(
        execute_query(http, &opts.local, query),
        execute_query(http, &opts.production, query),
    )
    .await;

    ExecutedQueryPair {
        query: query.clone(),
        local_response,
        production_response,
    }
}

/// Fire every query at both endpoints in batches of `opts.concurrency`,
/// returning one pair per input query in input order.
///
/// No retries: a failed fetch surfaces as an ordinary comparable response, so
/// transient network blips show up as diffs rather than aborting the run.
pub async fn execute_all(
    http: &reqwest::Client,
    queries: &[ReplayQuery],
    opts: &ExecuteOptions,
) -> Vec<ExecutedQueryPair> {
    tracing::debug!(
        target: "replay.exec",
        stage = "batch.start",
        queries = queries.len(),
        concurrency = opts.concurrency,
    );

    map_batched(
        queries,
        opts.concurrency,
        |query| execute_pair(http, query, opts),
        |completed, total| {
            tracing::debug!(target: "replay.exec", stage = "batch.done", completed, total);
            if let Some(tx) = &opts.progress {
                let _ = tx.send(ProgressEvent { completed, total });
            }
        },
    )
    .await
}
