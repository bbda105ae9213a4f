//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of the loop. It defines the
//! [`InputSource`] capability, a crossterm-backed source that re-encodes key
//! events into the engine's single-byte protocol, a scripted source for
//! headless runs, and the [`KeyDecoder`] state machine that turns the byte
//! stream back into [`types::Key`]s.

pub mod map;
pub mod source;
pub mod terminal;

pub use ansi_stage_types as types;

pub use map::{map_direct, map_extended, should_quit, KeyDecoder, KeyPress, RepeatPolicy};
pub use source::{InputSource, ScriptedInput};
pub use terminal::{encode_key, TerminalInput};
