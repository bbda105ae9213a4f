//! State handed to game handlers.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::core::Scene;
use crate::grid::Grid;
use crate::input::{KeyDecoder, KeyPress};
use crate::step::{period_from_hz, FixedStep};
use crate::types::Size;

/// Loop state owned by the engine and lent to every handler.
#[derive(Debug)]
pub struct Context {
    scene: Scene,
    board: Grid,
    keys: KeyDecoder,
    step: FixedStep,
    update_hz: f64,
    running: bool,
    output_dirty: bool,
    viewport: Option<Size>,
}

impl Context {
    pub fn new(config: &EngineConfig) -> Self {
        let (update_hz, period) = match period_from_hz(config.update_hz) {
            Some(period) => (config.update_hz, period),
            None => {
                let fallback = EngineConfig::default().update_hz;
                warn!(hz = config.update_hz, "invalid update rate, using default");
                (fallback, period_from_hz(fallback).unwrap_or(Duration::from_millis(100)))
            }
        };
        Self {
            scene: Scene::new(),
            board: Grid::default(),
            keys: KeyDecoder::with_policy(config.repeat_policy),
            step: FixedStep::new(period, config.max_catch_up_ticks),
            update_hz,
            running: false,
            output_dirty: false,
            viewport: None,
        }
    }

    /// Stop the loop after the current iteration.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request a render this iteration.
    pub fn mark_dirty(&mut self) {
        self.output_dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.output_dirty
    }

    /// Change the tick rate. Rates that are not finite and positive are
    /// rejected and the current rate is kept.
    pub fn set_update_rate(&mut self, hz: f64) -> bool {
        match period_from_hz(hz) {
            Some(period) => {
                debug!(hz, ?period, "update rate changed");
                self.update_hz = hz;
                self.step.set_period(period);
                true
            }
            None => {
                warn!(hz, "rejected update rate");
                false
            }
        }
    }

    pub fn update_rate(&self) -> f64 {
        self.update_hz
    }

    pub fn tick_period(&self) -> Duration {
        self.step.period()
    }

    /// Last viewport seen by the loop; `None` before the first iteration.
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Grid {
        &mut self.board
    }

    /// Run a polled byte through the key decoder.
    pub fn feed_key(&mut self, byte: u8) -> Option<KeyPress> {
        self.keys.feed(byte)
    }

    pub fn key_decoder(&self) -> &KeyDecoder {
        &self.keys
    }

    pub(crate) fn start(&mut self) {
        self.running = true;
        self.step.reset();
    }

    /// Record a new viewport. Returns true when it differs from the last one.
    pub(crate) fn observe_viewport(&mut self, size: Size) -> bool {
        if self.viewport == Some(size) {
            return false;
        }
        self.viewport = Some(size);
        self.board.resize(size);
        self.output_dirty = true;
        true
    }

    pub(crate) fn step_mut(&mut self) -> &mut FixedStep {
        &mut self.step
    }

    pub(crate) fn step(&self) -> &FixedStep {
        &self.step
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.output_dirty = false;
    }

    /// Release the scene and board.
    pub(crate) fn release(&mut self) {
        self.running = false;
        self.scene = Scene::new();
        self.board = Grid::default();
        self.keys.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RepeatPolicy;

    #[test]
    fn invalid_configured_rate_falls_back_to_default() {
        let config = EngineConfig {
            update_hz: 0.0,
            ..EngineConfig::default()
        };
        let ctx = Context::new(&config);
        assert_eq!(ctx.update_rate(), 10.0);
        assert_eq!(ctx.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn set_update_rate_converts_hz_to_period() {
        let mut ctx = Context::new(&EngineConfig::default());
        assert!(ctx.set_update_rate(20.0));
        assert_eq!(ctx.tick_period(), Duration::from_millis(50));
        assert!(!ctx.set_update_rate(0.0));
        assert_eq!(ctx.tick_period(), Duration::from_millis(50));
    }

    #[test]
    fn key_decoder_follows_configured_repeat_policy() {
        let config = EngineConfig {
            repeat_policy: RepeatPolicy::Allow,
            ..EngineConfig::default()
        };
        let mut ctx = Context::new(&config);
        assert_eq!(ctx.key_decoder().policy(), RepeatPolicy::Allow);

        assert!(!ctx.feed_key(b'x').map(|p| p.repeat).unwrap_or(true));
        assert!(!ctx.feed_key(b'x').map(|p| p.repeat).unwrap_or(true));
    }

    #[test]
    fn viewport_change_resizes_board_and_marks_dirty() {
        let mut ctx = Context::new(&EngineConfig::default());
        assert!(ctx.observe_viewport(Size::new(80, 24)));
        assert!(ctx.is_dirty());
        assert_eq!(ctx.board().size(), Size::new(80, 24));

        ctx.clear_dirty();
        assert!(!ctx.observe_viewport(Size::new(80, 24)));
        assert!(!ctx.is_dirty());
    }
}
