use thiserror::Error;

/// Pre-flight failures. Anything that happens per query is encoded into a
/// [`crate::model::QueryResponse`] instead and never surfaces here.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("config error: {0}")]
    Config(String),
    #[error("failed to fetch queries: {0}")]
    Fetch(String),
    #[error("report error: {0}")]
    Report(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
