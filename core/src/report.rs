//! Report assembly: a JSON report object injected into an HTML template.
//!
//! The template is the caller's asset; this module owns the data shape and
//! the injection contract (`window.DATA` before `</head>`).

use std::path::Path;

use serde_json::{json, Value};

use crate::compare::Summary;
use crate::error::ReplayError;
use crate::model::QueryResult;

/// Build the report data object. Results with diffs sort first (stable, so
/// the orchestrator's order is preserved within each group).
pub fn build_report(results: &[QueryResult], summary: &Summary, command: &str) -> Value {
    let mut ordered: Vec<&QueryResult> = results.iter().collect();
    ordered.sort_by_key(|r| !r.has_diff);

    let items: Vec<Value> = ordered
        .iter()
        .map(|r| {
            json!({
                "query": {
                    "operationName": r.query.operation_name,
                    "executionId": r.query.execution_id,
                    "timestamp": r.query.timestamp,
                    "variables": r.query.variables,
                },
                "hasDiff": r.has_diff,
                "diff": r.diff,
            })
        })
        .collect();

    json!({
        "generatedAt": chrono::Utc::now().to_rfc3339(),
        "command": command,
        "summary": summary,
        "results": items,
    })
}

/// Inject the report into the template as a `window.DATA` script. The script
/// lands right before `</head>` when the marker exists, at the end otherwise.
pub fn render_html(template: &str, report: &Value) -> Result<String, ReplayError> {
    let data = serde_json::to_string(report)
        .map_err(|e| ReplayError::Report(format!("failed to serialize report data: {e}")))?;
    let script = format!("<script>window.DATA = {data};</script>\n");

    match template.find("</head>") {
        Some(idx) => {
            let mut html = String::with_capacity(template.len() + script.len());
            html.push_str(&template[..idx]);
            html.push_str(&script);
            html.push_str(&template[idx..]);
            Ok(html)
        }
        None => Ok(format!("{template}{script}")),
    }
}

pub fn write_report(path: &Path, html: &str) -> Result<(), ReplayError> {
    std::fs::write(path, html)?;
    tracing::debug!(target: "replay.report", stage = "written", path = %path.display());
    Ok(())
}
