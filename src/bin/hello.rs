//! Single-shot screen: draw once, wait for any key, exit.
//!
//! No loop and no ticks, so a blocking read is fine here.

use anyhow::Result;

use ansi_stage::engine::{EXIT_INIT_FAILURE, EXIT_OK};
use ansi_stage::input::{InputSource, TerminalInput};
use ansi_stage::single_shot;
use ansi_stage::telemetry::init_tracing;
use ansi_stage::term::{AnsiOutput, OutputSink};

fn main() {
    let telemetry = init_tracing("info");

    let mut input = TerminalInput::new();
    let mut output = AnsiOutput::new();

    let mut code = EXIT_INIT_FAILURE;
    let input_ready = report(input.initialize());
    let output_ready = input_ready && report(output.initialize());
    if output_ready {
        single_shot::draw(&mut output);
        single_shot::wait_for_key(&mut input);
        code = EXIT_OK;
    }

    if output_ready {
        if let Err(e) = output.shutdown() {
            tracing::warn!(error = %e, "output shutdown failed");
        }
    }
    if input_ready {
        if let Err(e) = input.shutdown() {
            tracing::warn!(error = %e, "input shutdown failed");
        }
    }
    if code != EXIT_OK {
        eprintln!("Unable to initialize engine!");
    }

    drop(telemetry);
    std::process::exit(code);
}

fn report(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "initialization failed");
            false
        }
    }
}
