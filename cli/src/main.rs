use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;

use replay_core::api::ReplayError;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, ReplayError> {
    let args = cli::Args::parse();
    let cfg = replay_core::config::load_default()?;
    init_tracing(&cfg.logging).map_err(ReplayError::Config)?;

    app::run(args, cfg).await
}

fn exit_code_for_error(e: &ReplayError) -> i32 {
    // 0: success
    // 11: config error
    // 21: query ingestion failure
    // 30: report writing failure
    // 50: internal/uncategorized
    match e {
        ReplayError::Config(_) => 11,
        ReplayError::Fetch(_) => 21,
        ReplayError::Report(_) | ReplayError::Io(_) => 30,
        ReplayError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &replay_core::config::LoggingConfig) -> Result<(), String> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let file_layer = match logging.directory.as_deref().map(str::trim) {
        Some(dir) if !dir.is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| format!("create log dir failed: {e}"))?;
            let file_name = format!("gql-replay.{}.log", std::process::id());
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
        }
        _ => None,
    };

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
