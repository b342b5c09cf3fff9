//! Dual-endpoint query execution under a bounded concurrency cap.

mod client;
mod progress;
mod scheduler;

pub use client::{execute_query, Endpoint};
pub use progress::{ProgressEvent, ProgressTx};
pub use scheduler::{execute_all, map_batched, ExecuteOptions, DEFAULT_CONCURRENCY};
