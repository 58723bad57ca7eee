//! Logging utilities for the Slotify application.
//!
//! Console output always goes through a `fmt` layer. When a log directory is
//! configured a second, non-ANSI layer writes a daily rolling file through
//! `tracing-appender`. `RUST_LOG` wins over the configured level.

use slotify_config::LoggingConfig;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for the rolling log file.
const LOG_FILE_PREFIX: &str = "slotify.log";

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level, console only.
pub fn init_with_level(level: Level) {
    let _ = init_from_config(&LoggingConfig {
        level: level.to_string().to_lowercase(),
        directory: None,
    });
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{level},tower_http=info,sqlx=warn")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from the `[logging]` config section.
///
/// The returned guard flushes the file writer on drop and must live as long
/// as the process. `None` when no file layer was installed.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = build_filter(&config.level);

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: a global subscriber may already be set (tests, repeated init)
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(file_layer)
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (file: {})",
            config.level,
            config.directory.as_deref().unwrap_or("none")
        );
    }

    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, INFO on success and ERROR on failure, and hand it back.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
