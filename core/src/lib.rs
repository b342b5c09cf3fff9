pub mod api;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod executor;
pub mod fetcher;
pub mod model;
pub mod report;
