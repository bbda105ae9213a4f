//! The draw-once screen behind the `hello` binary.

use tracing::warn;

use crate::demo::{BORDER_COLOR, TITLE, TITLE_COLOR, TITLE_POSITION};
use crate::input::InputSource;
use crate::term::OutputSink;

pub const INSTRUCTIONS: &str = "Instructions.";
pub const EXIT_HINT: &str = "-hit any key to exit-";

/// Draw the whole screen as one buffered frame.
pub fn draw(out: &mut dyn OutputSink) {
    let size = out.viewport();
    out.set_buffered(true);

    out.set_fore_color(BORDER_COLOR);
    out.draw_box(0, 0, size.w, size.h);
    out.reset();

    let width = TITLE.chars().count() as i16 + 4;
    out.set_fore_color(TITLE_COLOR);
    out.draw_box(TITLE_POSITION.x, TITLE_POSITION.y, width, 3);
    out.move_to(TITLE_POSITION.x + 2, TITLE_POSITION.y + 1);
    out.print(TITLE);
    out.reset();

    out.move_to(2, size.h - 3);
    out.print(INSTRUCTIONS);
    out.move_to(3, size.h - 2);
    out.print(EXIT_HINT);

    out.flush();
}

/// Block for one key. A source that runs dry or fails is logged, not fatal.
pub fn wait_for_key(input: &mut dyn InputSource) -> Option<u8> {
    let byte = input.blocking_read();
    if byte.is_none() {
        warn!("input ended before a key was read");
    }
    byte
}
