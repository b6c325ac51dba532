//! Logging setup.
//!
//! `RUST_LOG` wins when set. Otherwise `DEBUG_LOGGING=1` enables debug output
//! for this crate and everything else stays at the given default.
//!
//! Interactive terminal hosts own stdout, so they log to a file with
//! [`init_file`]. Everything else can use [`init_stderr`].

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::Result;

/// Filter used when `DEBUG_LOGGING` is set.
pub const DEBUG_FILTER: &str = "info,spark_stopwatch=debug";

fn build_filter(default_filter: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if std::env::var("DEBUG_LOGGING").is_ok() {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::new(default_filter)
    }
}

/// Log to stderr. A subscriber that is already installed is left in place.
pub fn init_stderr(default_filter: &str) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(build_filter(default_filter))
        .try_init();
}

/// Log to `dir/file_name` through a non-blocking writer.
///
/// The returned guard must be held until shutdown so buffered lines are
/// flushed.
pub fn init_file(dir: &Path, file_name: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(build_filter("info"))
        .try_init();

    tracing::info!(log_file = ?dir.join(file_name), "logging initialized");
    Ok(guard)
}
