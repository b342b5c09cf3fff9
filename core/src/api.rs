//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `replay_core::api` instead of reaching into internal modules.

pub use crate::compare::{compare_all, Summary};
pub use crate::config::{load_default, AppConfig, LoggingConfig};
pub use crate::diff::{
    compare_responses, Comparison, DiffChange, DiffChangeKind, DiffHunk, DiffLine, DiffLineKind,
    DiffResult, DiffStrategy, LineDiff, StructuralDiff,
};
pub use crate::error::ReplayError;
pub use crate::executor::{
    execute_all, execute_query, Endpoint, ExecuteOptions, ProgressEvent, ProgressTx,
};
pub use crate::fetcher::{fetch_queries, FetchOptions};
pub use crate::model::{ExecutedQueryPair, QueryResponse, QueryResult, ReplayQuery};
pub use crate::report::{build_report, render_html, write_report};
