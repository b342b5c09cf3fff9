use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

use crate::model::{QueryResponse, ReplayQuery};

/// The capture pipeline tags replayed operations with this prefix; the origin
/// server must see the real operation name.
const REPLAY_PREFIX: &str = "REPLAY-";

/// One side of the comparison: a GraphQL endpoint plus its opaque
/// Authorization header value.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub url: String,
    pub authorization: String,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            authorization: authorization.into(),
        }
    }
}

/// Execute one query against one endpoint.
///
/// Never returns an error: any transport failure (connection refused, timeout,
/// TLS, undecodable body) is converted to `success=false` so a single endpoint
/// failure cannot abort the batch or the sibling call. On a completed
/// exchange, `success` reflects the HTTP status class and the decoded JSON
/// body is always stored: upstream GraphQL error envelopes flow into diffing
/// like any other payload.
pub async fn execute_query(
    http: &reqwest::Client,
    endpoint: &Endpoint,
    query: &ReplayQuery,
) -> QueryResponse {
    // Recorded variables that fail to parse downgrade to an empty object; the
    // query must still be attempted.
    let variables: Value =
        serde_json::from_str(&query.variables).unwrap_or_else(|_| json!({}));

    let operation_name = query
        .operation_name
        .strip_prefix(REPLAY_PREFIX)
        .unwrap_or(&query.operation_name);

    let body = json!({
        "query": query.request_body,
        "variables": variables,
        "operationName": operation_name,
    });

    tracing::debug!(
        target: "replay.exec",
        stage = "query.in",
        url = %endpoint.url,
        operation = %operation_name,
        execution_id = %query.execution_id,
    );

    let sent = http
        .post(&endpoint.url)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, &endpoint.authorization)
        .json(&body)
        .send()
        .await;

    let response = match sent {
        Ok(resp) => {
            let status = resp.status();
            match resp.json::<Value>().await {
                Ok(data) => QueryResponse {
                    success: status.is_success(),
                    data: Some(data),
                    error: None,
                    status_code: Some(status.as_u16()),
                },
                Err(err) => QueryResponse::failed(err.to_string()),
            }
        }
        Err(err) => QueryResponse::failed(err.to_string()),
    };

    tracing::debug!(
        target: "replay.exec",
        stage = "query.out",
        url = %endpoint.url,
        operation = %operation_name,
        success = response.success,
        status = ?response.status_code,
    );

    response
}
