//! Scene object model - pure, deterministic, and testable
//!
//! This module contains the drawable objects a program puts on screen.
//! It has **no dependency** on terminal I/O: objects draw through the
//! [`OutputSink`](term::OutputSink) capability, which makes them:
//!
//! - **Deterministic**: state only changes through setters and `think`
//! - **Testable**: every object can be drawn into a headless sink
//! - **Cheap to redraw**: dirty flags tell the loop whether a frame is needed
//!
//! # Module Structure
//!
//! - [`object`]: the four object variants and their dirty-flag bookkeeping
//! - [`scene`]: the closed [`SceneObject`] sum type and the owning [`Scene`]
//!
//! # Object Contract
//!
//! - **think(elapsed) -> bool**: consume pending dirty flags, rebuild derived
//!   state (border rects, trail history), report whether anything visible
//!   changed. Never touches the sink.
//! - **draw(sink, elapsed)**: emit the current state with color, cursor, box
//!   and text primitives only, then reset colors. Never mutates.
//!
//! Composite objects draw their owned sub-object first and then layer their
//! own primitives on top.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use ansi_stage_core::{LabeledBoxObject, Scene};
//! use ansi_stage_core::term::{MemorySink, OutputSink};
//! use ansi_stage_core::types::{Point, Size};
//!
//! let mut scene = Scene::new();
//! scene.add(LabeledBoxObject::new("Hello World", Point::new(4, 4)));
//!
//! let dt = Duration::from_millis(100);
//! assert!(scene.think(dt));
//! assert!(!scene.think(dt));
//!
//! let mut sink = MemorySink::new(Size::new(40, 10));
//! scene.draw(&mut sink, dt);
//! assert_eq!(sink.frame().text_at(6, 5, 11), "Hello World");
//! ```

pub mod object;
pub mod scene;

pub use ansi_stage_term as term;
pub use ansi_stage_types as types;

pub use object::{
    BorderObject, LabeledBoxObject, SnakeTrailObject, StyledObject, LABEL_HEIGHT, LABEL_PADDING,
    TRAIL_HEAD_GLYPH,
};
pub use scene::{ObjectId, Scene, SceneObject};
