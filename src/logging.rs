use crate::config::HarnessConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Install the global subscriber.
///
/// Standard output carries the protocol lines the orchestrator scrapes, so
/// console logs always go to stderr. The returned guard must outlive the run
/// when file logging is enabled.
pub fn init_logging(config: &HarnessConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let (file_layer, guard): (Option<Box<dyn Layer<Registry> + Send + Sync>>, _) =
        if config.file_logging {
            let file_appender = match config.rotation.as_str() {
                "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
                "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
                _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
            };
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = if config.use_json {
                fmt::layer()
                    .json()
                    .with_target(true) // Keep target in JSON for structured queries
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed()
            } else {
                fmt::layer()
                    .with_target(false)
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed()
            };
            (Some(layer), Some(guard))
        } else {
            (None, None)
        };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();

    guard
}
