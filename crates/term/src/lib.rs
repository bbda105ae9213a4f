//! Terminal output module.
//!
//! This is the drawing side of the engine: a small output capability
//! ([`OutputSink`]) with two implementations.
//!
//! - [`AnsiOutput`] encodes primitives as ANSI escape sequences via crossterm
//!   and writes them to a terminal, either immediately or as one buffered
//!   write per frame.
//! - [`MemorySink`] rasterises the same primitives into a [`FrameBuffer`]
//!   with no I/O, so scenes and the loop can be tested headless.

pub mod fb;
pub mod memory;
pub mod renderer;
pub mod sink;

pub use ansi_stage_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use memory::MemorySink;
pub use renderer::AnsiOutput;
pub use sink::{for_each_box_cell, Command, OutputSink};
