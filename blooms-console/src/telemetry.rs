use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use blooms_store::Config;

/// Send tracing output to `<data_dir>/<logging.directory>/<logging.file_name>`.
///
/// Stdout belongs to the menus, so nothing is logged to the terminal. `RUST_LOG`
/// takes precedence over the configured filter. Keep the returned guard alive
/// until exit or buffered lines are lost.
pub fn init(config: &Config) -> std::io::Result<WorkerGuard> {
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = rolling::never(&log_dir, Path::new(&config.logging.file_name));
    let (writer, guard) = non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
