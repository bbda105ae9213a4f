//! Interactive demo on the real terminal.
//!
//! Exits 0 on quit and -1 if the terminal cannot be set up.

use ansi_stage::demo::Demo;
use ansi_stage::engine::{exit_code, Engine, EngineConfig};
use ansi_stage::input::TerminalInput;
use ansi_stage::telemetry::init_tracing;
use ansi_stage::term::AnsiOutput;

fn main() {
    let telemetry = init_tracing("info");

    let config = EngineConfig::from_env();
    let mut engine = Engine::new(TerminalInput::new(), AnsiOutput::new(), config);
    let mut demo = Demo::new();

    let result = engine.run(&mut demo);
    if let Err(e) = &result {
        eprintln!("Unable to initialize engine! ({})", e);
    }

    let code = exit_code(&result);
    // process::exit skips destructors; flush the log writer first.
    drop(telemetry);
    std::process::exit(code);
}
