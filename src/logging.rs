//! Log setup
//!
//! The terminal is owned by the TUI, so logs go to a file.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Default log file (~/.local/share/cinelist/cinelist.log)
pub fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("cinelist"))
        .unwrap_or_default()
        .join("cinelist.log")
}

/// `RUST_LOG` wins; otherwise 0 = info, 1 = debug, 2+ = trace for this crate
pub fn filter_directive(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "cinelist=info",
        1 => "cinelist=debug,hyper=warn,reqwest=info",
        _ => "cinelist=trace,debug",
    }
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init_logging(verbose_level: u8, log_file: &Path) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose_level)));

    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(log_dir)?;
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path: {}", log_file.display()))?;

    let appender = tracing_appender::rolling::never(log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()?;

    Ok(guard)
}
