use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{Level, debug, info};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Installs the global subscriber. Structured runs write JSON events to
/// `telemetry.jsonl` under the telemetry directory; other runs log to stderr.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if logging.belief_details {
        unsafe {
            std::env::set_var("HANABI_BELIEF_DETAILS", "1");
        }
    }

    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if !logging.enable_structured {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        debug!(target: "hanabi_cli", run_id, "logging to stderr");
        return Ok(None);
    }

    let telemetry_dir = &outputs.telemetry_dir;
    fs::create_dir_all(telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join("telemetry.jsonl");
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when running inside tests.
    let _ = tracing::subscriber::set_global_default(subscriber);
    info!(target: "hanabi_cli", run_id, path = %telemetry_path.display(), "telemetry started");

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}
