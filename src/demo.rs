//! Interactive demo: a framed screen, a labeled box, and a steerable cursor
//! that leaves a trail, plus a status overlay.
//!
//! Layout (recomputed on every resize):
//!
//! - cyan border around the whole viewport
//! - red "Hello World" box at `(4, 4)`
//! - the cursor roams inside the border, above the two overlay rows
//! - overlay rows at `h - 3` and `h - 2`

use std::time::Duration;

use anyhow::Result;

use crate::core::{BorderObject, LabeledBoxObject, ObjectId, SnakeTrailObject};
use crate::engine::{Context, Game};
use crate::input::{should_quit, KeyPress};
use crate::term::OutputSink;
use crate::types::{Color, Direction, Key, Point, Rect, Size};

pub const BORDER_COLOR: Color = Color::new(0, 255, 255);
pub const TITLE_COLOR: Color = Color::new(255, 0, 0);
pub const TRAIL_COLOR: Color = Color::new(255, 255, 0);

pub const TITLE: &str = "Hello World";
pub const TITLE_POSITION: Point = Point::new(4, 4);

/// Rows reserved at the bottom for the overlay (two text rows + border).
const OVERLAY_ROWS: i16 = 3;

const MIN_RATE_HZ: f64 = 1.0;
const MAX_RATE_HZ: f64 = 60.0;

pub const INSTRUCTIONS: &str = "arrows: steer  space: stop  +/-: speed  q: quit";

#[derive(Debug, Default)]
pub struct Demo {
    border: Option<ObjectId>,
    label: Option<ObjectId>,
    cursor: Option<ObjectId>,
    heading: Option<Direction>,
    status: String,
    needs_clear: bool,
}

impl Demo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn border_id(&self) -> Option<ObjectId> {
        self.border
    }

    pub fn label_id(&self) -> Option<ObjectId> {
        self.label
    }

    pub fn cursor_id(&self) -> Option<ObjectId> {
        self.cursor
    }

    fn describe(press: &KeyPress) -> String {
        match press.key {
            Key::Char(c) => format!("key '{}'", c),
            Key::Unmapped(b) => format!("unmapped key 0x{:02X}", b),
            Key::UnmappedExtended(b) => format!("unmapped key 0xE0 0x{:02X}", b),
            other => format!("key {}", other.name()),
        }
    }
}

/// Movement bounds for a viewport: inside the border, above the overlay.
pub fn cursor_bounds(size: Size) -> Rect {
    Rect::from_xywh(1, 1, size.w - 2, size.h - 2 - OVERLAY_ROWS)
}

impl Game for Demo {
    fn on_init(&mut self, ctx: &mut Context) -> Result<()> {
        let scene = ctx.scene_mut();

        let mut border = BorderObject::new(Rect::default());
        border.set_fore_color(BORDER_COLOR);
        self.border = Some(scene.add(border));

        let mut cursor = SnakeTrailObject::new(Rect::default(), Point::default());
        cursor.set_fore_color(TRAIL_COLOR);
        self.cursor = Some(scene.add(cursor));

        // Added after the cursor so the label stays on top of its trail.
        let mut label = LabeledBoxObject::new(TITLE, TITLE_POSITION);
        label.set_fore_color(TITLE_COLOR);
        self.label = Some(scene.add(label));

        self.status = "press a key".to_string();
        Ok(())
    }

    fn on_key(&mut self, ctx: &mut Context, press: KeyPress) {
        if should_quit(press.key) {
            ctx.quit();
            return;
        }

        if let Some(dir) = press.key.direction() {
            self.heading = Some(dir);
        }
        match press.key {
            Key::Char(' ') => self.heading = None,
            Key::Char('+') => {
                let hz = (ctx.update_rate() + 1.0).min(MAX_RATE_HZ);
                ctx.set_update_rate(hz);
                ctx.mark_dirty();
            }
            Key::Char('-') => {
                let hz = (ctx.update_rate() - 1.0).max(MIN_RATE_HZ);
                ctx.set_update_rate(hz);
                ctx.mark_dirty();
            }
            _ => {}
        }

        if !press.repeat {
            self.status = Self::describe(&press);
            ctx.mark_dirty();
        }
    }

    fn on_resize(&mut self, ctx: &mut Context, size: Size) {
        let scene = ctx.scene_mut();
        if let Some(border) = self.border.and_then(|id| scene.border_mut(id)) {
            border.set_rect(Rect::new(Point::new(0, 0), size));
        }
        if let Some(cursor) = self.cursor.and_then(|id| scene.trail_mut(id)) {
            let bounds = cursor_bounds(size);
            cursor.set_bounds(bounds);
            let center = bounds.origin.offset(bounds.size.w / 2, bounds.size.h / 2);
            let head = cursor.head();
            cursor.move_by(center.x - head.x, center.y - head.y);
        }
        self.heading = None;
        self.needs_clear = true;
    }

    fn on_tick(&mut self, ctx: &mut Context, _dt: Duration) {
        let Some(dir) = self.heading else {
            return;
        };
        let Some(id) = self.cursor else {
            return;
        };

        let moved_to = ctx.scene_mut().trail_mut(id).and_then(|cursor| {
            if cursor.step(dir) {
                Some(cursor.head())
            } else {
                None
            }
        });
        match moved_to {
            Some(head) => ctx.board_mut().set(head, 1),
            None => self.heading = None,
        }
    }

    fn on_render(&mut self, ctx: &Context, sink: &mut dyn OutputSink, elapsed: Duration) {
        if std::mem::take(&mut self.needs_clear) {
            sink.clear();
        }
        ctx.scene().draw(sink, elapsed);

        let Some(size) = ctx.viewport() else {
            return;
        };
        let width = (size.w - 4).max(0) as usize;
        let info = format!(
            "{}  rate: {} Hz  visited: {}",
            self.status,
            ctx.update_rate(),
            ctx.board().count_nonzero()
        );

        sink.reset();
        sink.move_to(2, size.h - 3);
        sink.print(&fit(INSTRUCTIONS, width));
        sink.move_to(2, size.h - 2);
        sink.print(&fit(&info, width));
    }
}

/// Truncate or pad with spaces to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}
