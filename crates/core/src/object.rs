//! Scene object variants.
//!
//! Every variant keeps logical state (rect, title, position, bounds) plus
//! dirty flags. Mutators only record state and raise flags; derived visual
//! state is rebuilt in `think`, which consumes the flags. `draw` never
//! mutates, reads only what the last `think` derived, and always ends with a
//! color reset.

use std::time::Duration;

use crate::term::OutputSink;
use crate::types::{Color, Direction, Point, Rect, Size, BLACK, WHITE};

/// Foreground/background pair with its own dirty flag.
///
/// Setters change the requested pair; the pair emitted by `draw` only
/// follows on the next `think`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledObject {
    fore: Color,
    back: Color,
    shown: (Color, Color),
    dirty: bool,
}

impl StyledObject {
    pub fn new(fore: Color, back: Color) -> Self {
        Self {
            fore,
            back,
            shown: (fore, back),
            dirty: true,
        }
    }

    pub fn fore_color(&self) -> Color {
        self.fore
    }

    pub fn back_color(&self) -> Color {
        self.back
    }

    pub fn set_fore_color(&mut self, color: Color) {
        self.fore = color;
        self.dirty = true;
    }

    pub fn set_back_color(&mut self, color: Color) {
        self.back = color;
        self.dirty = true;
    }

    pub fn think(&mut self, _elapsed: Duration) -> bool {
        let changed = std::mem::take(&mut self.dirty);
        if changed {
            self.shown = (self.fore, self.back);
        }
        changed
    }

    pub fn draw(&self, sink: &mut dyn OutputSink, _elapsed: Duration) {
        self.apply(sink);
        sink.reset();
    }

    /// Emit the color pair as of the last `think`.
    pub fn apply(&self, sink: &mut dyn OutputSink) {
        let (fore, back) = self.shown;
        sink.set_fore_color(fore);
        sink.set_back_color(back);
    }
}

impl Default for StyledObject {
    fn default() -> Self {
        Self::new(WHITE, BLACK)
    }
}

/// A rectangle outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderObject {
    style: StyledObject,
    rect: Rect,
    /// Outline as of the last `think`.
    shown_rect: Rect,
    rect_dirty: bool,
}

impl BorderObject {
    pub fn new(rect: Rect) -> Self {
        Self {
            style: StyledObject::default(),
            rect,
            shown_rect: Rect::default(),
            rect_dirty: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.rect_dirty = true;
    }

    pub fn fore_color(&self) -> Color {
        self.style.fore_color()
    }

    pub fn back_color(&self) -> Color {
        self.style.back_color()
    }

    pub fn set_fore_color(&mut self, color: Color) {
        self.style.set_fore_color(color);
    }

    pub fn set_back_color(&mut self, color: Color) {
        self.style.set_back_color(color);
    }

    pub fn think(&mut self, elapsed: Duration) -> bool {
        let styled = self.style.think(elapsed);
        let moved = std::mem::take(&mut self.rect_dirty);
        if moved {
            self.shown_rect = self.rect;
        }
        styled || moved
    }

    pub fn draw(&self, sink: &mut dyn OutputSink, _elapsed: Duration) {
        let Rect { origin, size } = self.shown_rect;
        self.style.apply(sink);
        sink.draw_box(origin.x, origin.y, size.w, size.h);
        sink.reset();
    }
}

/// Columns added around a title: border plus one space of padding per side.
pub const LABEL_PADDING: i16 = 4;

/// Rows of a labeled box: top border, title row, bottom border.
pub const LABEL_HEIGHT: i16 = 3;

/// A title framed by an owned border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledBoxObject {
    style: StyledObject,
    title: String,
    position: Point,
    border: BorderObject,
    /// Title text and cell as of the last `think`.
    shown_title: String,
    title_at: Point,
    title_dirty: bool,
    position_dirty: bool,
}

impl LabeledBoxObject {
    pub fn new(title: impl Into<String>, position: Point) -> Self {
        Self {
            style: StyledObject::default(),
            title: title.into(),
            position,
            border: BorderObject::new(Rect::default()),
            shown_title: String::new(),
            title_at: position,
            title_dirty: true,
            position_dirty: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.title_dirty = true;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.position_dirty = true;
    }

    pub fn fore_color(&self) -> Color {
        self.style.fore_color()
    }

    pub fn back_color(&self) -> Color {
        self.style.back_color()
    }

    pub fn set_fore_color(&mut self, color: Color) {
        self.style.set_fore_color(color);
    }

    pub fn set_back_color(&mut self, color: Color) {
        self.style.set_back_color(color);
    }

    pub fn border(&self) -> &BorderObject {
        &self.border
    }

    /// Cell where the first title character is drawn, as of the last `think`.
    pub fn title_origin(&self) -> Point {
        self.title_at
    }

    /// Border rect for the current title and position.
    fn frame_rect(&self) -> Rect {
        let len = self.title.chars().count().min(i16::MAX as usize) as i16;
        Rect::new(
            self.position,
            Size::new(len.saturating_add(LABEL_PADDING), LABEL_HEIGHT),
        )
    }

    pub fn think(&mut self, elapsed: Duration) -> bool {
        let styled = self.style.think(elapsed);
        if styled {
            self.border.set_fore_color(self.style.fore_color());
            self.border.set_back_color(self.style.back_color());
        }

        let title = std::mem::take(&mut self.title_dirty);
        let moved = std::mem::take(&mut self.position_dirty);
        if title || moved {
            let rect = self.frame_rect();
            self.border.set_rect(rect);
            self.title_at = self.position.offset(2, 1);
            if title {
                self.shown_title.clone_from(&self.title);
            }
        }

        let framed = self.border.think(elapsed);
        styled || title || moved || framed
    }

    pub fn draw(&self, sink: &mut dyn OutputSink, elapsed: Duration) {
        self.border.draw(sink, elapsed);

        self.style.apply(sink);
        sink.move_to(self.title_at.x, self.title_at.y);
        sink.print(&self.shown_title);
        sink.reset();
    }
}

/// Default glyph for a trail head.
pub const TRAIL_HEAD_GLYPH: char = '@';

/// A moving cell confined to bounds that erases the cells it leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeTrailObject {
    style: StyledObject,
    bounds: Rect,
    head: Point,
    /// Head as of the last `think`; that is the cell `draw` paints.
    shown_head: Point,
    /// Whether the bounds as of the last `think` leave room for the head.
    head_visible: bool,
    trail: Vec<Point>,
    glyph: char,
    shown_glyph: char,
    bounds_dirty: bool,
    head_dirty: bool,
}

impl SnakeTrailObject {
    pub fn new(bounds: Rect, head: Point) -> Self {
        let head = bounds.clamp(head);
        Self {
            style: StyledObject::default(),
            bounds,
            head,
            shown_head: head,
            head_visible: false,
            trail: Vec::new(),
            glyph: TRAIL_HEAD_GLYPH,
            shown_glyph: TRAIL_HEAD_GLYPH,
            bounds_dirty: true,
            head_dirty: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replace the movement bounds. The trail is dropped on the next `think`.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.bounds_dirty = true;
    }

    pub fn head(&self) -> Point {
        self.head
    }

    /// Previously drawn head cells, oldest first.
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn set_glyph(&mut self, glyph: char) {
        self.glyph = glyph;
        self.head_dirty = true;
    }

    pub fn fore_color(&self) -> Color {
        self.style.fore_color()
    }

    pub fn back_color(&self) -> Color {
        self.style.back_color()
    }

    pub fn set_fore_color(&mut self, color: Color) {
        self.style.set_fore_color(color);
    }

    pub fn set_back_color(&mut self, color: Color) {
        self.style.set_back_color(color);
    }

    /// Move the head by `(dx, dy)`.
    ///
    /// Returns false and leaves the head untouched when the target cell is
    /// outside the bounds.
    pub fn move_by(&mut self, dx: i16, dy: i16) -> bool {
        let next = self.head.offset(dx, dy);
        if !self.bounds.contains(next) {
            return false;
        }
        self.head = next;
        self.head_dirty = true;
        true
    }

    pub fn step(&mut self, dir: Direction) -> bool {
        let (dx, dy) = dir.delta();
        self.move_by(dx, dy)
    }

    pub fn think(&mut self, elapsed: Duration) -> bool {
        let styled = self.style.think(elapsed);

        let rebounded = std::mem::take(&mut self.bounds_dirty);
        if rebounded {
            // Old trail cells may lie outside the moved playfield.
            self.trail.clear();
            self.head = self.bounds.clamp(self.head);
            self.shown_head = self.head;
            self.head_visible = !self.bounds.is_empty();
        }

        let moved = std::mem::take(&mut self.head_dirty);
        if moved {
            self.shown_glyph = self.glyph;
        }
        if moved && self.shown_head != self.head {
            self.trail.push(self.shown_head);
            self.shown_head = self.head;
        }

        styled || rebounded || moved
    }

    pub fn draw(&self, sink: &mut dyn OutputSink, _elapsed: Duration) {
        self.style.apply(sink);

        let mut buf = [0u8; 4];
        let glyph = self.shown_glyph.encode_utf8(&mut buf);

        for p in &self.trail {
            if *p == self.shown_head {
                continue;
            }
            sink.move_to(p.x, p.y);
            sink.print(" ");
        }
        if self.head_visible {
            sink.move_to(self.shown_head.x, self.shown_head.y);
            sink.print(glyph);
        }
        sink.reset();
    }
}
