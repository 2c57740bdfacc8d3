use std::{env, fs, path::Path};

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::PROJECT_NAME;

pub const LOG_FILE: &str = concat!(env!("CARGO_PKG_NAME"), ".log");

/// `MAILFORM_LOG_LEVEL` wins over `RUST_LOG`; both fall back to `info`.
pub fn env_filter() -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(tracing::Level::INFO.into());
    match env::var(format!("{}_LOG_LEVEL", PROJECT_NAME.clone())) {
        Ok(directives) => builder.parse_lossy(directives),
        Err(_) => builder.from_env_lossy(),
    }
}

/// Log to `<data_dir>/mailform.log`. The terminal belongs to the form, so
/// nothing goes to stdout or stderr. Keep the guard alive until exit.
pub fn init(data_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(data_dir)?;
    let appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(guard)
}
