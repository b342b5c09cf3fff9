use clap::Parser;
use replay_core::api::DiffStrategy;

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default)]
pub enum Strategy {
    /// Line-level diff grouped into hunks (what the report renders).
    #[default]
    Lines,
    /// Flat list of JSON-path-addressed changes.
    Structural,
}

impl From<Strategy> for DiffStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Lines => DiffStrategy::Lines,
            Strategy::Structural => DiffStrategy::Structural,
        }
    }
}

/// Replay captured GraphQL queries and compare local vs production responses.
#[derive(Parser, Debug)]
#[command(name = "gql-replay", version)]
pub struct Args {
    /// Start date (YYYY-MM-DD)
    #[arg(short, long, default_value_t = today())]
    pub initial_date: String,

    /// End date (YYYY-MM-DD)
    #[arg(short, long, default_value_t = today())]
    pub final_date: String,

    /// Maximum number of queries to fetch
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,

    /// Output HTML file path
    #[arg(short, long, default_value = "./report.html")]
    pub output: String,

    /// Number of concurrent queries per batch (each performs two calls)
    #[arg(short, long, default_value_t = 5)]
    pub concurrency: usize,

    /// Diff strategy
    #[arg(long, value_enum, default_value_t = Strategy::Lines)]
    pub strategy: Strategy,
}
