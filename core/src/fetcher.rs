//! Captured-query ingestion from the replay source API.
//!
//! Anything that goes wrong here is fatal to the run: without queries there
//! is nothing to compare.

use crate::error::ReplayError;
use crate::model::ReplayQuery;

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub replay_api_url: String,
    /// Inclusive range bounds, `YYYY-MM-DD`.
    pub initial_date: String,
    pub final_date: String,
    pub limit: usize,
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    let mut out: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        out.push_str("...");
    }
    out
}

/// Fetch the captured queries for a date range. The source API owns filtering
/// and ordering; no further ordering or dedup is applied here.
pub async fn fetch_queries(
    http: &reqwest::Client,
    opts: &FetchOptions,
) -> Result<Vec<ReplayQuery>, ReplayError> {
    tracing::debug!(
        target: "replay.fetch",
        stage = "queries.in",
        url = %opts.replay_api_url,
        initial_date = %opts.initial_date,
        final_date = %opts.final_date,
        limit = opts.limit,
    );

    let limit = opts.limit.to_string();
    let response = http
        .get(&opts.replay_api_url)
        .query(&[
            ("initialDate", opts.initial_date.as_str()),
            ("finalDate", opts.final_date.as_str()),
            ("limit", limit.as_str()),
        ])
        .send()
        .await
        .map_err(|e| ReplayError::Fetch(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ReplayError::Fetch(e.to_string()))?;

    if !status.is_success() {
        return Err(ReplayError::Fetch(format!(
            "status {}: {}",
            status.as_u16(),
            preview_body(&body)
        )));
    }

    let queries: Vec<ReplayQuery> = serde_json::from_str(&body).map_err(|e| {
        ReplayError::Fetch(format!(
            "failed to decode response body: {} | body={}",
            e,
            preview_body(&body)
        ))
    })?;

    tracing::debug!(
        target: "replay.fetch",
        stage = "queries.out",
        status = %status,
        queries = queries.len(),
    );

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn opts(url: String) -> FetchOptions {
        FetchOptions {
            replay_api_url: url,
            initial_date: "2026-08-01".to_string(),
            final_date: "2026-08-29".to_string(),
            limit: 100,
        }
    }

    #[tokio::test]
    async fn forwards_date_range_and_limit() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/queries")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("initialDate".into(), "2026-08-01".into()),
                Matcher::UrlEncoded("finalDate".into(), "2026-08-29".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{
                    "requestBody": "query Me { me { id } }",
                    "operationType": "query",
                    "operationName": "Me",
                    "executionId": "exec-1",
                    "variables": "{}",
                    "sourceSystem": "gateway",
                    "responseLength": 10,
                    "responseHash": null,
                    "errors": null,
                    "timestamp": 1700000000
                }]"#,
            )
            .create_async()
            .await;

        let queries = fetch_queries(
            &reqwest::Client::new(),
            &opts(format!("{}/queries", server.url())),
        )
        .await
        .unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].operation_name, "Me");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_fatal() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/queries")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("replay source down")
            .create_async()
            .await;

        let err = fetch_queries(
            &reqwest::Client::new(),
            &opts(format!("{}/queries", server.url())),
        )
        .await
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("replay source down"));
    }

    #[tokio::test]
    async fn undecodable_body_is_fatal() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/queries")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{\"not\": \"a list\"}")
            .create_async()
            .await;

        let err = fetch_queries(
            &reqwest::Client::new(),
            &opts(format!("{}/queries", server.url())),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("failed to decode"));
    }

    #[test]
    fn preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= BODY_PREVIEW_LIMIT + 3);
        assert_eq!(preview_body("   "), "<empty body>");
    }
}
