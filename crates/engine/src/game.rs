//! Handlers a program plugs into the loop.

use std::time::Duration;

use anyhow::Result;

use crate::context::Context;
use crate::input::{should_quit, KeyPress};
use crate::term::OutputSink;
use crate::types::Size;

/// Callbacks driven by [`Engine`](crate::Engine).
///
/// Per iteration the engine calls, in order: `on_input` (at most once),
/// `on_resize` (when the viewport changed), `on_tick` (zero or more times at
/// the configured rate) and `on_render` (only when output is dirty).
pub trait Game {
    /// Build the scene. Runs once, after both capabilities are up.
    fn on_init(&mut self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// One raw polled byte. The default decodes it and forwards whole keys
    /// to [`Game::on_key`].
    fn on_input(&mut self, ctx: &mut Context, byte: u8) {
        if let Some(press) = ctx.feed_key(byte) {
            self.on_key(ctx, press);
        }
    }

    /// One decoded key. The default quits on the quit keys.
    fn on_key(&mut self, ctx: &mut Context, press: KeyPress) {
        if should_quit(press.key) {
            ctx.quit();
        }
    }

    fn on_resize(&mut self, _ctx: &mut Context, _size: Size) {}

    /// One fixed-duration simulation step.
    fn on_tick(&mut self, _ctx: &mut Context, _dt: Duration) {}

    /// Draw a frame. The default draws the scene; the engine flushes after.
    fn on_render(&mut self, ctx: &Context, sink: &mut dyn OutputSink, elapsed: Duration) {
        ctx.scene().draw(sink, elapsed);
    }

    fn on_shutdown(&mut self, _ctx: &mut Context) {}
}
