//! The fixed-tick loop.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::context::Context;
use crate::error::EngineError;
use crate::game::Game;
use crate::input::InputSource;
use crate::term::OutputSink;

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// A byte was polled and handed to the game.
    pub input: bool,
    /// The viewport changed (or was seen for the first time).
    pub resized: bool,
    /// Update ticks run this iteration.
    pub ticks: u32,
    /// A frame was rendered and flushed.
    pub rendered: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Acquired {
    input: bool,
    output: bool,
    game: bool,
}

/// Single-threaded cooperative loop over an input and an output capability.
pub struct Engine<I, O, C = SystemClock> {
    input: I,
    output: O,
    clock: C,
    config: EngineConfig,
    ctx: Context,
    last_time: Option<Duration>,
    acquired: Acquired,
}

impl<I: InputSource, O: OutputSink> Engine<I, O, SystemClock> {
    pub fn new(input: I, output: O, config: EngineConfig) -> Self {
        Self::with_clock(input, output, config, SystemClock::new())
    }
}

impl<I: InputSource, O: OutputSink, C: Clock> Engine<I, O, C> {
    pub fn with_clock(input: I, output: O, config: EngineConfig, clock: C) -> Self {
        let ctx = Context::new(&config);
        Self {
            input,
            output,
            clock,
            config,
            ctx,
            last_time: None,
            acquired: Acquired::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn is_running(&self) -> bool {
        self.ctx.is_running()
    }

    /// Take back the capabilities, e.g. after [`Engine::shutdown`].
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }

    /// Bring up input, then output, then the game.
    ///
    /// On failure the parts already acquired stay recorded so
    /// [`Engine::shutdown`] releases exactly those.
    pub fn initialize<G: Game>(&mut self, game: &mut G) -> Result<(), EngineError> {
        info!(
            update_hz = self.ctx.update_rate(),
            buffered = self.config.buffered,
            "initializing engine"
        );

        self.input
            .initialize()
            .map_err(EngineError::InputInit)
            .inspect_err(|e| warn!(error = %e, "initialization failed"))?;
        self.acquired.input = true;

        self.output
            .initialize()
            .map_err(EngineError::OutputInit)
            .inspect_err(|e| warn!(error = %e, "initialization failed"))?;
        self.acquired.output = true;
        self.output.set_buffered(self.config.buffered);

        game.on_init(&mut self.ctx)
            .map_err(EngineError::ClientInit)
            .inspect_err(|e| warn!(error = %e, "initialization failed"))?;
        self.acquired.game = true;

        self.ctx.start();
        self.last_time = Some(self.clock.now());
        Ok(())
    }

    /// Run one iteration: poll input, check the viewport, tick, render.
    pub fn step<G: Game>(&mut self, game: &mut G) -> StepReport {
        let mut report = StepReport::default();

        // 1. Input: at most one byte per iteration.
        if let Some(byte) = self.input.try_poll() {
            game.on_input(&mut self.ctx, byte);
            report.input = true;
        }

        // 2. Viewport.
        let size = self.output.viewport();
        if self.ctx.observe_viewport(size) {
            debug!(w = size.w, h = size.h, "viewport changed");
            game.on_resize(&mut self.ctx, size);
            self.ctx.mark_dirty();
            report.resized = true;
        }

        // 3. Fixed-tick update, then let every object consume its flags.
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_time.unwrap_or(now));
        self.last_time = Some(now);

        let ticks = self.ctx.step_mut().advance(elapsed);
        let dt = self.ctx.tick_period();
        for _ in 0..ticks {
            game.on_tick(&mut self.ctx, dt);
        }
        report.ticks = ticks;

        if self.ctx.scene_mut().think(elapsed) {
            self.ctx.mark_dirty();
        }

        // 4. Render only when something changed.
        if self.ctx.is_dirty() {
            trace!(?elapsed, "rendering frame");
            game.on_render(&self.ctx, &mut self.output, elapsed);
            self.output.flush();
            self.ctx.clear_dirty();
            report.rendered = true;
        }

        report
    }

    /// Release whatever was acquired, in reverse order: game, output, input.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn shutdown<G: Game>(&mut self, game: &mut G) {
        let acquired = std::mem::take(&mut self.acquired);

        if acquired.game {
            game.on_shutdown(&mut self.ctx);
        }
        if acquired.output {
            if let Err(e) = self.output.shutdown() {
                warn!(error = %e, "output shutdown failed");
            }
        }
        if acquired.input {
            if let Err(e) = self.input.shutdown() {
                warn!(error = %e, "input shutdown failed");
            }
        }
        if acquired.game || acquired.output || acquired.input {
            info!("engine shut down");
        }
        self.ctx.release();
    }

    /// Initialize, loop until the game quits, shut down.
    ///
    /// Shutdown runs exactly once on every path, including a failed
    /// initialization.
    pub fn run<G: Game>(&mut self, game: &mut G) -> Result<(), EngineError> {
        if let Err(e) = self.initialize(game) {
            self.shutdown(game);
            return Err(e);
        }

        while self.ctx.is_running() {
            let report = self.step(game);
            if self.ctx.is_running() && !report.input {
                self.idle();
            }
        }

        self.shutdown(game);
        Ok(())
    }

    /// Sleep until the next tick is due, bounded by the idle limit so input
    /// stays responsive.
    fn idle(&self) {
        let wait = self.ctx.step().until_next().min(self.config.idle);
        if !wait.is_zero() {
            self.clock.sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::core::BorderObject;
    use crate::input::ScriptedInput;
    use crate::term::MemorySink;
    use crate::types::{Rect, Size};

    #[derive(Default)]
    struct Counter {
        ticks: u32,
        renders: u32,
        resizes: Vec<Size>,
    }

    impl Game for Counter {
        fn on_init(&mut self, ctx: &mut Context) -> anyhow::Result<()> {
            ctx.scene_mut().add(BorderObject::new(Rect::from_xywh(0, 0, 4, 4)));
            Ok(())
        }

        fn on_tick(&mut self, _ctx: &mut Context, _dt: Duration) {
            self.ticks += 1;
        }

        fn on_resize(&mut self, _ctx: &mut Context, size: Size) {
            self.resizes.push(size);
        }

        fn on_render(&mut self, ctx: &Context, sink: &mut dyn OutputSink, elapsed: Duration) {
            self.renders += 1;
            ctx.scene().draw(sink, elapsed);
        }
    }

    fn engine(
        input: ScriptedInput,
        clock: &ManualClock,
    ) -> Engine<ScriptedInput, MemorySink, ManualClock> {
        Engine::with_clock(
            input,
            MemorySink::new(Size::new(10, 5)),
            EngineConfig::default(),
            clock.clone(),
        )
    }

    #[test]
    fn first_step_discovers_viewport_and_renders() {
        let clock = ManualClock::new();
        let mut game = Counter::default();
        let mut eng = engine(ScriptedInput::new(), &clock);
        eng.initialize(&mut game).unwrap();

        let report = eng.step(&mut game);
        assert!(report.resized);
        assert!(report.rendered);
        assert_eq!(game.resizes, vec![Size::new(10, 5)]);
        assert_eq!(eng.output().flush_count(), 1);
        assert!(eng.output().is_buffered());
    }

    #[test]
    fn nothing_changed_means_no_flush() {
        let clock = ManualClock::new();
        let mut game = Counter::default();
        let mut eng = engine(ScriptedInput::new(), &clock);
        eng.initialize(&mut game).unwrap();
        eng.step(&mut game);

        for _ in 0..10 {
            clock.advance(Duration::from_millis(100));
            let report = eng.step(&mut game);
            assert_eq!(report.ticks, 1);
            assert!(!report.rendered);
        }
        assert_eq!(eng.output().flush_count(), 1);
        assert_eq!(game.renders, 1);
    }

    #[test]
    fn ticks_are_rate_limited() {
        let clock = ManualClock::new();
        let mut game = Counter::default();
        let mut eng = engine(ScriptedInput::new(), &clock);
        eng.initialize(&mut game).unwrap();

        clock.advance(Duration::from_millis(350));
        let report = eng.step(&mut game);
        assert_eq!(report.ticks, 3);
        assert_eq!(game.ticks, 3);

        clock.advance(Duration::from_millis(40));
        assert_eq!(eng.step(&mut game).ticks, 0);
        clock.advance(Duration::from_millis(10));
        assert_eq!(eng.step(&mut game).ticks, 1);
    }

    #[test]
    fn resize_triggers_handler_and_render() {
        let clock = ManualClock::new();
        let mut game = Counter::default();
        let mut eng = engine(ScriptedInput::new(), &clock);
        eng.initialize(&mut game).unwrap();
        eng.step(&mut game);

        eng.output_mut().set_viewport(Size::new(20, 8));
        let report = eng.step(&mut game);
        assert!(report.resized);
        assert!(report.rendered);
        assert_eq!(game.resizes.last(), Some(&Size::new(20, 8)));
        assert_eq!(eng.context().board().size(), Size::new(20, 8));
    }

    #[test]
    fn quit_key_stops_run_and_shuts_down() {
        let clock = ManualClock::new();
        let mut input = ScriptedInput::new();
        input.push_idle();
        input.push_idle();
        input.push_bytes(b"q");
        let mut game = Counter::default();
        let mut eng = engine(input, &clock);

        assert!(eng.run(&mut game).is_ok());
        assert!(!eng.is_running());
        assert!(!eng.input().is_initialized());
        assert!(!eng.output().is_initialized());
        assert!(eng.context().scene().is_empty());
    }

    #[test]
    fn output_init_failure_releases_input_only() {
        let clock = ManualClock::new();
        let mut game = Counter::default();
        let mut eng = Engine::with_clock(
            ScriptedInput::new(),
            MemorySink::failing(Size::new(10, 5)),
            EngineConfig::default(),
            clock,
        );

        let err = eng.run(&mut game).unwrap_err();
        assert!(matches!(err, EngineError::OutputInit(_)));
        assert_eq!(err.exit_code(), crate::error::EXIT_INIT_FAILURE);
        assert!(!eng.input().is_initialized());
        assert_eq!(game.renders, 0);
    }

    #[test]
    fn idle_sleep_is_bounded_by_next_tick() {
        let clock = ManualClock::new();
        let mut game = Counter::default();
        let mut eng = engine(ScriptedInput::new(), &clock);
        eng.initialize(&mut game).unwrap();

        eng.idle();
        assert_eq!(clock.now(), Duration::from_millis(5));
    }

    mod lifecycle {
        use std::cell::RefCell;
        use std::rc::Rc;

        use super::*;
        use crate::types::{Color, Size};

        type Log = Rc<RefCell<Vec<&'static str>>>;

        struct LoggedInput {
            inner: ScriptedInput,
            log: Log,
        }

        impl InputSource for LoggedInput {
            fn initialize(&mut self) -> anyhow::Result<()> {
                self.inner.initialize()
            }

            fn shutdown(&mut self) -> anyhow::Result<()> {
                self.log.borrow_mut().push("input");
                self.inner.shutdown()
            }

            fn try_poll(&mut self) -> Option<u8> {
                self.inner.try_poll()
            }

            fn blocking_read(&mut self) -> Option<u8> {
                self.inner.blocking_read()
            }
        }

        struct LoggedOutput {
            inner: MemorySink,
            log: Log,
        }

        impl OutputSink for LoggedOutput {
            fn initialize(&mut self) -> anyhow::Result<()> {
                self.inner.initialize()
            }

            fn shutdown(&mut self) -> anyhow::Result<()> {
                self.log.borrow_mut().push("output");
                self.inner.shutdown()
            }

            fn viewport(&self) -> Size {
                self.inner.viewport()
            }

            fn set_fore_color(&mut self, color: Color) {
                self.inner.set_fore_color(color)
            }

            fn set_back_color(&mut self, color: Color) {
                self.inner.set_back_color(color)
            }

            fn move_to(&mut self, x: i16, y: i16) {
                self.inner.move_to(x, y)
            }

            fn print(&mut self, text: &str) {
                self.inner.print(text)
            }

            fn draw_box(&mut self, x: i16, y: i16, w: i16, h: i16) {
                self.inner.draw_box(x, y, w, h)
            }

            fn reset(&mut self) {
                self.inner.reset()
            }

            fn clear(&mut self) {
                self.inner.clear()
            }

            fn set_buffered(&mut self, buffered: bool) {
                self.inner.set_buffered(buffered)
            }

            fn is_buffered(&self) -> bool {
                self.inner.is_buffered()
            }

            fn flush(&mut self) {
                self.inner.flush()
            }
        }

        struct LoggedGame {
            log: Log,
            fail_init: bool,
        }

        impl Game for LoggedGame {
            fn on_init(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
                if self.fail_init {
                    anyhow::bail!("scene setup failed");
                }
                Ok(())
            }

            fn on_shutdown(&mut self, _ctx: &mut Context) {
                self.log.borrow_mut().push("game");
            }
        }

        struct Rig {
            log: Log,
            engine: Engine<LoggedInput, LoggedOutput, ManualClock>,
            game: LoggedGame,
        }

        fn rig(input: ScriptedInput, output: MemorySink, fail_init: bool) -> Rig {
            let log = Log::default();
            let engine = Engine::with_clock(
                LoggedInput {
                    inner: input,
                    log: log.clone(),
                },
                LoggedOutput {
                    inner: output,
                    log: log.clone(),
                },
                EngineConfig::default(),
                ManualClock::new(),
            );
            let game = LoggedGame {
                log: log.clone(),
                fail_init,
            };
            Rig { log, engine, game }
        }

        fn viewport() -> Size {
            Size::new(10, 5)
        }

        #[test]
        fn normal_quit_releases_in_reverse_order_once() {
            let mut r = rig(ScriptedInput::from_bytes(b"q"), MemorySink::new(viewport()), false);

            assert!(r.engine.run(&mut r.game).is_ok());
            assert_eq!(*r.log.borrow(), vec!["game", "output", "input"]);

            r.engine.shutdown(&mut r.game);
            assert_eq!(r.log.borrow().len(), 3);

            let (input, output) = r.engine.into_parts();
            assert!(!input.inner.is_initialized());
            assert!(!output.inner.is_initialized());
        }

        #[test]
        fn input_failure_releases_nothing() {
            let mut r = rig(ScriptedInput::failing(), MemorySink::new(viewport()), false);

            let err = r.engine.run(&mut r.game).unwrap_err();
            assert!(matches!(err, EngineError::InputInit(_)));
            assert!(r.log.borrow().is_empty());
            assert!(!r.engine.output().inner.is_initialized());
        }

        #[test]
        fn output_failure_releases_input_only() {
            let mut r = rig(ScriptedInput::new(), MemorySink::failing(viewport()), false);

            let err = r.engine.run(&mut r.game).unwrap_err();
            assert!(matches!(err, EngineError::OutputInit(_)));
            assert_eq!(*r.log.borrow(), vec!["input"]);
        }

        #[test]
        fn game_failure_releases_output_then_input() {
            let mut r = rig(ScriptedInput::new(), MemorySink::new(viewport()), true);

            let err = r.engine.run(&mut r.game).unwrap_err();
            assert!(matches!(err, EngineError::ClientInit(_)));
            assert_eq!(err.exit_code(), crate::error::EXIT_INIT_FAILURE);
            assert_eq!(*r.log.borrow(), vec!["output", "input"]);

            r.engine.shutdown(&mut r.game);
            assert_eq!(*r.log.borrow(), vec!["output", "input"]);
        }
    }
}
