//! Log setup for the binaries.
//!
//! The engine owns the terminal, so logs never go to stderr. Set
//! `ANSI_STAGE_LOG=<path>` to append them to a file; `RUST_LOG` filters as
//! usual.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive; hold it until exit.
#[derive(Debug)]
pub struct TelemetryGuard {
    guard: Option<WorkerGuard>,
}

impl TelemetryGuard {
    fn disabled() -> Self {
        Self { guard: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.guard.is_some()
    }
}

pub fn init_tracing(default_level: &str) -> TelemetryGuard {
    let Some(path) = log_file_path_from_env() else {
        return TelemetryGuard::disabled();
    };

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "Warning: failed to open log file {}: {}",
                path.display(),
                err
            );
            return TelemetryGuard::disabled();
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let (writer, guard) = tracing_appender::non_blocking(file);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .is_ok();

    if installed {
        TelemetryGuard { guard: Some(guard) }
    } else {
        TelemetryGuard::disabled()
    }
}

fn log_file_path_from_env() -> Option<PathBuf> {
    std::env::var("ANSI_STAGE_LOG")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
