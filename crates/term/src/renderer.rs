//! AnsiOutput: an [`OutputSink`] that emits ANSI escape sequences.
//!
//! Every primitive is encoded with crossterm into an internal byte buffer.
//! In immediate mode the buffer is written out after each primitive; in
//! buffered mode it only reaches the device on [`OutputSink::flush`], so a
//! whole frame lands as one contiguous write.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal, Command as TermCommand, QueueableCommand,
};
use tracing::warn;

use crate::sink::{for_each_box_cell, OutputSink};
use crate::types::{Color, Point, Rect, Size, FALLBACK_VIEWPORT};

pub struct AnsiOutput<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
    buffered: bool,
    cursor: Point,
    fixed_viewport: Option<Size>,
}

impl AnsiOutput<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for AnsiOutput<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> AnsiOutput<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            buffered: false,
            cursor: Point::default(),
            fixed_viewport: None,
        }
    }

    /// Report a fixed viewport instead of querying the terminal.
    pub fn with_viewport(mut self, size: Size) -> Self {
        self.fixed_viewport = Some(size);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Bytes accumulated and not yet written.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    fn queue(&mut self, command: impl TermCommand) {
        if let Err(e) = self.buf.queue(command) {
            warn!(error = %e, "failed to encode terminal command");
        }
    }

    fn after_primitive(&mut self) {
        if !self.buffered {
            self.write_out();
        }
    }

    fn write_out(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        if let Err(e) = self.flush_buf() {
            warn!(error = %e, bytes = self.buf.len(), "terminal write failed");
        }
        self.buf.clear();
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputSink for AnsiOutput<W> {
    fn initialize(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.buf.clear();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        // Drop any half-built frame; the screen is about to be torn down.
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        self.buf.clear();
        Ok(())
    }

    fn viewport(&self) -> Size {
        if let Some(size) = self.fixed_viewport {
            return size;
        }
        match terminal::size() {
            Ok((w, h)) => Size::new(clamp_dim(w), clamp_dim(h)),
            Err(e) => {
                warn!(error = %e, "terminal size query failed");
                FALLBACK_VIEWPORT
            }
        }
    }

    fn set_fore_color(&mut self, color: Color) {
        self.queue(SetForegroundColor(to_term_color(color)));
        self.after_primitive();
    }

    fn set_back_color(&mut self, color: Color) {
        self.queue(SetBackgroundColor(to_term_color(color)));
        self.after_primitive();
    }

    fn move_to(&mut self, x: i16, y: i16) {
        self.cursor = Point::new(x, y);
        if x >= 0 && y >= 0 {
            self.queue(cursor::MoveTo(x as u16, y as u16));
            self.after_primitive();
        }
    }

    fn print(&mut self, text: &str) {
        let Point { x, y } = self.cursor;
        let count = text.chars().count();
        self.cursor.x = x.saturating_add(count.min(i16::MAX as usize) as i16);
        if y < 0 {
            return;
        }

        if x >= 0 {
            self.queue(Print(text));
        } else {
            // Clip the part left of column 0.
            let skip = (-(x as i32)) as usize;
            if skip >= count {
                return;
            }
            let visible: String = text.chars().skip(skip).collect();
            self.queue(cursor::MoveTo(0, y as u16));
            self.queue(Print(visible));
        }
        self.after_primitive();
    }

    fn draw_box(&mut self, x: i16, y: i16, w: i16, h: i16) {
        let mut cells = Vec::new();
        for_each_box_cell(Rect::from_xywh(x, y, w, h), |p, ch| cells.push((p, ch)));
        if cells.is_empty() {
            return;
        }
        for (p, ch) in cells {
            self.queue(cursor::MoveTo(p.x as u16, p.y as u16));
            self.queue(Print(ch));
        }
        self.after_primitive();
    }

    fn reset(&mut self) {
        self.queue(ResetColor);
        self.queue(SetAttribute(Attribute::Reset));
        self.after_primitive();
    }

    fn clear(&mut self) {
        self.queue(terminal::Clear(terminal::ClearType::All));
        self.after_primitive();
    }

    fn set_buffered(&mut self, buffered: bool) {
        if self.buffered && !buffered {
            self.write_out();
        }
        self.buffered = buffered;
    }

    fn is_buffered(&self) -> bool {
        self.buffered
    }

    fn flush(&mut self) {
        self.write_out();
    }
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn clamp_dim(v: u16) -> i16 {
    v.min(i16::MAX as u16) as i16
}
