use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use replay_core::api::{
    build_report, compare_all, execute_all, fetch_queries, render_html, write_report, AppConfig,
    Endpoint, ExecuteOptions, FetchOptions, ReplayError,
};
use tokio::sync::mpsc;

use crate::cli::Args;

const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} queries ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  "),
    );
    bar
}

pub async fn run(args: Args, cfg: AppConfig) -> Result<i32, ReplayError> {
    let command = std::env::args().collect::<Vec<_>>().join(" ");
    let http = reqwest::Client::new();

    println!(
        "Fetching queries from {} to {}...",
        args.initial_date, args.final_date
    );
    let queries = fetch_queries(
        &http,
        &FetchOptions {
            replay_api_url: cfg.replay_api_url.clone(),
            initial_date: args.initial_date.clone(),
            final_date: args.final_date.clone(),
            limit: args.limit,
        },
    )
    .await?;

    if queries.is_empty() {
        println!("No queries found for the specified date range.");
        return Ok(0);
    }
    println!("Found {} queries", queries.len());
    tracing::info!(
        target: "replay.app",
        queries = queries.len(),
        concurrency = args.concurrency,
        "starting replay run"
    );

    println!("Executing queries against local and production...");
    let bar = progress_bar(queries.len());
    let (tx, mut rx) = mpsc::unbounded_channel::<replay_core::api::ProgressEvent>();
    let bar_task = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while let Some(ev) = rx.recv().await {
                bar.set_position(ev.completed as u64);
            }
        })
    };

    let opts = ExecuteOptions {
        local: Endpoint::new(cfg.local_graphql_url.clone(), cfg.local_auth.clone()),
        production: Endpoint::new(
            cfg.production_graphql_url.clone(),
            cfg.production_auth.clone(),
        ),
        concurrency: args.concurrency,
        progress: Some(tx),
    };
    let pairs = execute_all(&http, &queries, &opts).await;
    drop(opts);
    let _ = bar_task.await;
    bar.finish_and_clear();

    println!("Comparing responses...");
    let (results, summary) = compare_all(pairs, args.strategy.into());
    println!(
        "Results: {} queries with diffs, {} identical",
        summary.with_diffs, summary.without_diffs
    );

    println!("Generating report: {}", args.output);
    let report = build_report(&results, &summary, &command);
    let html = render_html(REPORT_TEMPLATE, &report)?;
    write_report(Path::new(&args.output), &html)?;

    if summary.with_diffs > 0 {
        println!(
            "{} queries have differences between local and production.",
            summary.with_diffs
        );
    } else {
        println!("All queries returned identical results!");
    }

    Ok(0)
}
