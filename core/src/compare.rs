//! Comparison orchestrator: sequential post-processing of executed pairs.

use serde::Serialize;

use crate::diff::{compare_responses, DiffStrategy};
use crate::model::{ExecutedQueryPair, QueryResult};

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub with_diffs: usize,
    pub without_diffs: usize,
}

/// Diff every pair once, producing the final per-query verdicts plus an
/// aggregate summary. Diffing is CPU-bound and cheap next to the network
/// stage, so this runs sequentially.
pub fn compare_all(
    pairs: Vec<ExecutedQueryPair>,
    strategy: DiffStrategy,
) -> (Vec<QueryResult>, Summary) {
    let mut results = Vec::with_capacity(pairs.len());
    let mut with_diffs = 0usize;

    for pair in pairs {
        let comparison = compare_responses(&pair.local_response, &pair.production_response, strategy);
        if comparison.has_diff {
            with_diffs += 1;
        }
        results.push(QueryResult {
            query: pair.query,
            local_response: pair.local_response,
            production_response: pair.production_response,
            has_diff: comparison.has_diff,
            diff: comparison.diff,
        });
    }

    let summary = Summary {
        total: results.len(),
        with_diffs,
        without_diffs: results.len() - with_diffs,
    };

    tracing::debug!(
        target: "replay.compare",
        total = summary.total,
        with_diffs = summary.with_diffs,
        strategy = ?strategy,
    );

    (results, summary)
}
