//! ansi-stage (workspace facade crate).
//!
//! Re-exports the engine crates under one name and hosts the demo program
//! the binaries run.

pub use ansi_stage_core as core;
pub use ansi_stage_engine as engine;
pub use ansi_stage_input as input;
pub use ansi_stage_term as term;
pub use ansi_stage_types as types;

pub mod demo;
pub mod single_shot;
pub mod telemetry;
