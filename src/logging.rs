use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Keeps the non-blocking writer alive for the lifetime of the process.
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

/// File logging for the player. Stdout belongs to the TUI, so everything
/// goes to a daily-rolling file under the data directory.
pub fn init_player(data_dir: &Path, filter: Option<String>) -> LogGuard {
    let log_dir = data_dir.join("logs");
    let log_dir = match fs::create_dir_all(&log_dir) {
        Ok(()) => log_dir,
        Err(_) => std::env::temp_dir().join("spindle-logs"),
    };
    let _ = fs::create_dir_all(&log_dir);

    let file_appender = tracing_appender::rolling::daily(&log_dir, "spindle.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(file_layer);
    let _ = subscriber.try_init();

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    LogGuard(Some(guard))
}

/// Stdout logging for the content service.
pub fn init_server(filter: Option<String>) -> LogGuard {
    let subscriber = tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(fmt::layer());
    let _ = subscriber.try_init();
    LogGuard(None)
}

fn env_filter(filter: Option<String>) -> EnvFilter {
    match filter {
        Some(s) if !s.trim().is_empty() => EnvFilter::new(s),
        _ => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
    }
}
