//! Response diff engine.
//!
//! Two interchangeable strategies over the same contract: a line/hunk diff in
//! the unified-diff tradition (primary, wired into reporting) and a
//! JSON-path-addressed structural diff. Both are pure functions over the two
//! normalized response values.

mod lines;
mod structural;

use serde::Serialize;
use serde_json::{json, Value};

use crate::model::QueryResponse;

pub use lines::{line_diff, DiffHunk, DiffLine, DiffLineKind, LineDiff, DEFAULT_CONTEXT};
pub use structural::{structural_diff, DiffChange, DiffChangeKind, StructuralDiff, MAX_CHANGES};

/// Diff strategy, selected once at the orchestrator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffStrategy {
    /// Line-level LCS diff grouped into hunks over pretty-printed JSON.
    #[default]
    Lines,
    /// Flat list of JSON-path-addressed changes.
    Structural,
}

/// Serializes to the wire shape the report template expects: either
/// `{hunks, localJson, productionJson}` or `{changes, totalChanges, truncated}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DiffResult {
    Lines(LineDiff),
    Structural(StructuralDiff),
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub has_diff: bool,
    pub diff: Option<DiffResult>,
}

/// Reduce a response to its single comparable value: payload if present, else
/// error string, else a synthetic `{"success": <bool>}` object. A JSON `null`
/// payload counts as absent.
fn normalize(response: &QueryResponse) -> Value {
    match &response.data {
        Some(v) if !v.is_null() => v.clone(),
        _ => match &response.error {
            Some(e) => Value::String(e.clone()),
            None => json!({ "success": response.success }),
        },
    }
}

fn to_json_string(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

/// Decide equality of two responses and, if unequal, explain the difference
/// with the selected strategy.
///
/// The fast path serializes both normalized values once and compares the
/// strings; identical responses never pay for a recursive walk.
pub fn compare_responses(
    local: &QueryResponse,
    production: &QueryResponse,
    strategy: DiffStrategy,
) -> Comparison {
    let local_value = normalize(local);
    let production_value = normalize(production);

    if to_json_string(&local_value) == to_json_string(&production_value) {
        return Comparison {
            has_diff: false,
            diff: None,
        };
    }

    let diff = match strategy {
        DiffStrategy::Lines => {
            DiffResult::Lines(line_diff(&local_value, &production_value, DEFAULT_CONTEXT))
        }
        DiffStrategy::Structural => DiffResult::Structural(structural_diff(
            &local_value,
            &production_value,
            MAX_CHANGES,
        )),
    };

    Comparison {
        has_diff: true,
        diff: Some(diff),
    }
}
