use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::DiffResult;

/// A previously captured request, served by the replay source API.
///
/// Field names follow the source API's wire format. Queries are read-only
/// inputs; identity is the execution id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayQuery {
    pub request_body: String,
    pub operation_type: Option<String>,
    pub operation_name: String,
    pub execution_id: String,
    pub variables: String,
    pub source_system: String,
    pub response_length: u64,
    pub response_hash: Option<String>,
    pub errors: Option<String>,
    pub timestamp: i64,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Outcome of executing one query against one endpoint.
///
/// `success == false` with no `error` means the HTTP exchange completed with a
/// non-2xx status; a populated `error` means the exchange itself failed and was
/// swallowed at the single-query boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl QueryResponse {
    /// Transport-level failure converted to data, per the no-propagation rule.
    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            status_code: None,
        }
    }
}

/// A query bound to its two responses, produced once per input query by the
/// scheduler and consumed once by the diff stage.
#[derive(Debug, Clone)]
pub struct ExecutedQueryPair {
    pub query: ReplayQuery,
    pub local_response: QueryResponse,
    pub production_response: QueryResponse,
}

/// Final per-query verdict. `diff` is populated exactly when `has_diff` is
/// true.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub query: ReplayQuery,
    pub local_response: QueryResponse,
    pub production_response: QueryResponse,
    pub has_diff: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
}
