//! MemorySink: a headless [`OutputSink`] that rasterises into a framebuffer.
//!
//! Buffered primitives are held as [`Command`]s and applied in order on
//! flush, so the visible framebuffer only ever shows whole frames. Useful for
//! tests and for running the engine without a terminal.

use anyhow::{bail, Result};

use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::sink::{for_each_box_cell, Command, OutputSink};
use crate::types::{Color, Point, Rect, Size, BLACK, WHITE};

#[derive(Debug, Clone)]
pub struct MemorySink {
    fb: FrameBuffer,
    viewport: Size,
    pending: Vec<Command>,
    buffered: bool,
    fore: Color,
    back: Color,
    cursor: Point,
    flushes: usize,
    initialized: bool,
    fail_initialize: bool,
}

impl MemorySink {
    pub fn new(viewport: Size) -> Self {
        Self {
            fb: FrameBuffer::new(dim(viewport.w), dim(viewport.h)),
            viewport,
            pending: Vec::new(),
            buffered: false,
            fore: WHITE,
            back: BLACK,
            cursor: Point::default(),
            flushes: 0,
            initialized: false,
            fail_initialize: false,
        }
    }

    /// A sink whose `initialize` fails.
    pub fn failing(viewport: Size) -> Self {
        Self {
            fail_initialize: true,
            ..Self::new(viewport)
        }
    }

    /// Simulate a terminal resize. Visible content is blanked.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
        self.fb.resize(dim(size.w), dim(size.h));
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn pending(&self) -> &[Command] {
        &self.pending
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn fore_color(&self) -> Color {
        self.fore
    }

    pub fn back_color(&self) -> Color {
        self.back
    }

    fn submit(&mut self, command: Command) {
        if self.buffered {
            self.pending.push(command);
        } else {
            self.apply(command);
        }
    }

    fn style(&self) -> CellStyle {
        CellStyle {
            fg: self.fore,
            bg: self.back,
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::SetForeColor(c) => self.fore = c,
            Command::SetBackColor(c) => self.back = c,
            Command::MoveTo(p) => self.cursor = p,
            Command::Print(text) => {
                let style = self.style();
                let Point { x, y } = self.cursor;
                let mut cx = x as i32;
                for ch in text.chars() {
                    self.fb.put_char(cx, y as i32, ch, style);
                    cx += 1;
                }
                self.cursor.x = cx.min(i16::MAX as i32) as i16;
            }
            Command::DrawBox(rect) => {
                let style = self.style();
                let fb = &mut self.fb;
                for_each_box_cell(rect, |p, ch| fb.put_char(p.x as i32, p.y as i32, ch, style));
            }
            Command::Reset => {
                self.fore = WHITE;
                self.back = BLACK;
            }
            Command::Clear => self.fb.clear(Cell {
                ch: ' ',
                style: self.style(),
            }),
        }
    }
}

impl OutputSink for MemorySink {
    fn initialize(&mut self) -> Result<()> {
        if self.fail_initialize {
            bail!("memory sink configured to fail initialization");
        }
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.pending.clear();
        self.initialized = false;
        Ok(())
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_fore_color(&mut self, color: Color) {
        self.submit(Command::SetForeColor(color));
    }

    fn set_back_color(&mut self, color: Color) {
        self.submit(Command::SetBackColor(color));
    }

    fn move_to(&mut self, x: i16, y: i16) {
        self.submit(Command::MoveTo(Point::new(x, y)));
    }

    fn print(&mut self, text: &str) {
        self.submit(Command::Print(text.to_string()));
    }

    fn draw_box(&mut self, x: i16, y: i16, w: i16, h: i16) {
        self.submit(Command::DrawBox(Rect::from_xywh(x, y, w, h)));
    }

    fn reset(&mut self) {
        self.submit(Command::Reset);
    }

    fn clear(&mut self) {
        self.submit(Command::Clear);
    }

    fn set_buffered(&mut self, buffered: bool) {
        if self.buffered && !buffered {
            self.flush();
        }
        self.buffered = buffered;
    }

    fn is_buffered(&self) -> bool {
        self.buffered
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for command in pending {
            self.apply(command);
        }
        self.flushes += 1;
    }
}

fn dim(v: i16) -> u16 {
    v.max(0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_mode_applies_primitives_right_away() {
        let mut sink = MemorySink::new(Size::new(10, 3));
        sink.move_to(2, 1);
        sink.print("ok");
        assert_eq!(sink.frame().text_at(2, 1, 2), "ok");
        assert_eq!(sink.flush_count(), 0);
    }

    #[test]
    fn buffered_frame_is_invisible_until_flush() {
        let mut sink = MemorySink::new(Size::new(10, 3));
        sink.set_buffered(true);
        sink.draw_box(0, 0, 10, 3);
        sink.move_to(1, 1);
        sink.print("frame");
        assert_eq!(sink.frame().row_text(0), "          ");
        assert_eq!(sink.pending().len(), 3);

        sink.flush();
        assert_eq!(sink.frame().row_text(0), "┌────────┐");
        assert_eq!(sink.frame().row_text(1), "│frame   │");
        assert!(sink.pending().is_empty());
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn colors_apply_to_cells_and_reset_restores_defaults() {
        let red = Color::new(255, 0, 0);
        let mut sink = MemorySink::new(Size::new(4, 1));
        sink.set_fore_color(red);
        sink.print("a");
        sink.reset();
        sink.print("b");
        assert_eq!(sink.frame().get(0, 0).unwrap().style.fg, red);
        assert_eq!(sink.frame().get(1, 0).unwrap().style.fg, WHITE);
        assert_eq!(sink.fore_color(), WHITE);
    }

    #[test]
    fn print_clips_left_of_origin() {
        let mut sink = MemorySink::new(Size::new(4, 1));
        sink.move_to(-2, 0);
        sink.print("abcd");
        assert_eq!(sink.frame().row_text(0), "cd  ");
    }

    #[test]
    fn failing_sink_reports_initialize_error() {
        let mut sink = MemorySink::failing(Size::new(4, 1));
        assert!(sink.initialize().is_err());
        assert!(!sink.is_initialized());
    }

    #[test]
    fn viewport_reflects_resizes() {
        let mut sink = MemorySink::new(Size::new(4, 1));
        sink.set_viewport(Size::new(8, 2));
        assert_eq!(sink.viewport(), Size::new(8, 2));
        assert_eq!(sink.frame().width(), 8);
    }
}
