//! Engine loop - fixed-tick scheduling, viewport tracking, redraw gating
//!
//! The engine owns an [`InputSource`](input::InputSource), an
//! [`OutputSink`](term::OutputSink) and a [`Context`] (scene, board, loop
//! flags), and drives a [`Game`] through a single-threaded loop.
//!
//! # Loop Phases
//!
//! Every iteration runs these phases in order while the game is running:
//!
//! 1. **Input**: one non-blocking poll; a byte goes to [`Game::on_input`]
//! 2. **Viewport**: a size change calls [`Game::on_resize`] and marks output dirty
//! 3. **Update**: [`Game::on_tick`] at the configured rate, then every scene
//!    object thinks; any change marks output dirty
//! 4. **Render**: only if dirty, [`Game::on_render`] then one flush
//!
//! # Timing
//!
//! Ticks come from a fixed-step accumulator ([`FixedStep`]) with bounded
//! catch-up. The rate is set in Hz ([`EngineConfig::update_hz`] or
//! [`Context::set_update_rate`]) and converted to a period.
//!
//! # Lifecycle
//!
//! [`Engine::run`] acquires input, output, then the game, and on every exit
//! path releases only what was acquired, in reverse order. A failed
//! initialization is returned as an [`EngineError`] with a negative exit code.
//!
//! # Example
//!
//! ```
//! use ansi_stage_engine::{Context, Engine, EngineConfig, Game, ManualClock};
//! use ansi_stage_engine::input::ScriptedInput;
//! use ansi_stage_engine::term::MemorySink;
//! use ansi_stage_engine::types::Size;
//!
//! struct QuitOnKey;
//! impl Game for QuitOnKey {}
//!
//! let mut engine = Engine::with_clock(
//!     ScriptedInput::from_bytes(b"q"),
//!     MemorySink::new(Size::new(80, 24)),
//!     EngineConfig::default(),
//!     ManualClock::new(),
//! );
//! assert!(engine.run(&mut QuitOnKey).is_ok());
//! ```

pub mod clock;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod step;

pub use ansi_stage_core as core;
pub use ansi_stage_input as input;
pub use ansi_stage_term as term;
pub use ansi_stage_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use context::Context;
pub use engine::{Engine, StepReport};
pub use error::{exit_code, EngineError, EXIT_INIT_FAILURE, EXIT_OK};
pub use game::Game;
pub use grid::Grid;
pub use step::{period_from_hz, FixedStep};
