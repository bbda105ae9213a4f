//! Engine configuration.

use std::env;
use std::time::Duration;

use crate::input::RepeatPolicy;
use crate::types::{DEFAULT_IDLE_MS, DEFAULT_MAX_CATCH_UP_TICKS, DEFAULT_UPDATE_HZ};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Tick rate of the update handler.
    pub update_hz: f64,
    /// Ticks allowed per loop iteration before backlog is dropped.
    pub max_catch_up_ticks: u32,
    /// Accumulate each frame and transmit it in one flush.
    pub buffered: bool,
    pub repeat_policy: RepeatPolicy,
    /// Upper bound on the sleep taken after an idle iteration.
    pub idle: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_hz: DEFAULT_UPDATE_HZ as f64,
            max_catch_up_ticks: DEFAULT_MAX_CATCH_UP_TICKS,
            buffered: true,
            repeat_policy: RepeatPolicy::Suppress,
            idle: Duration::from_millis(DEFAULT_IDLE_MS),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `ANSI_STAGE_*` environment variables.
    ///
    /// Unparseable or out-of-range values keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(hz) = env::var("ANSI_STAGE_UPDATE_HZ")
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|hz| hz.is_finite() && *hz > 0.0)
        {
            config.update_hz = hz;
        }

        if let Some(n) = env::var("ANSI_STAGE_MAX_CATCH_UP")
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
        {
            config.max_catch_up_ticks = n;
        }

        if let Some(ms) = env::var("ANSI_STAGE_IDLE_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            config.idle = Duration::from_millis(ms);
        }

        if env_flag("ANSI_STAGE_UNBUFFERED") == Some(true) {
            config.buffered = false;
        }

        if env_flag("ANSI_STAGE_SUPPRESS_REPEATS") == Some(false) {
            config.repeat_policy = RepeatPolicy::Allow;
        }

        config
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let v = env::var(name).ok()?;
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
