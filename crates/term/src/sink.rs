//! The output capability and its primitive vocabulary.

use anyhow::Result;

use crate::types::{Color, Point, Rect, Size};

/// Terminal output capability.
///
/// Primitives are infallible from the caller's point of view: transport
/// failures are logged by the implementation and absorbed. Only
/// [`OutputSink::initialize`] reports an error.
///
/// In buffered mode every primitive is appended to an in-memory accumulator
/// and nothing reaches the device until [`OutputSink::flush`]. In immediate
/// mode each primitive is transmitted as it is issued.
pub trait OutputSink {
    fn initialize(&mut self) -> Result<()>;
    fn shutdown(&mut self) -> Result<()>;

    /// Current viewport size, read fresh from the device on every call.
    fn viewport(&self) -> Size;

    fn set_fore_color(&mut self, color: Color);
    fn set_back_color(&mut self, color: Color);
    fn move_to(&mut self, x: i16, y: i16);

    /// Print text at the cursor, advancing it one cell per character.
    fn print(&mut self, text: &str);

    /// Rectangle outline (four edges, no fill) in the current colors.
    fn draw_box(&mut self, x: i16, y: i16, w: i16, h: i16);

    /// Restore the default colors.
    fn reset(&mut self);

    /// Erase the whole viewport.
    fn clear(&mut self);

    fn set_buffered(&mut self, buffered: bool);
    fn is_buffered(&self) -> bool;

    /// Transmit everything accumulated so far as one write.
    fn flush(&mut self);
}

/// A single drawing primitive, as accumulated by buffered sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetForeColor(Color),
    SetBackColor(Color),
    MoveTo(Point),
    Print(String),
    DrawBox(Rect),
    Reset,
    Clear,
}

pub const BOX_TOP_LEFT: char = '┌';
pub const BOX_TOP_RIGHT: char = '┐';
pub const BOX_BOTTOM_LEFT: char = '└';
pub const BOX_BOTTOM_RIGHT: char = '┘';
pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';

/// Visit every cell of a rectangle outline with the glyph drawn there.
///
/// Rectangles narrower or shorter than two cells are degenerate and draw
/// nothing. Cells with negative coordinates are skipped.
pub fn for_each_box_cell(rect: Rect, mut f: impl FnMut(Point, char)) {
    let Rect { origin, size } = rect;
    if size.w < 2 || size.h < 2 {
        return;
    }

    let mut put = |x: i32, y: i32, ch: char| {
        if x < 0 || y < 0 || x > i16::MAX as i32 || y > i16::MAX as i32 {
            return;
        }
        f(Point::new(x as i16, y as i16), ch);
    };

    let x0 = origin.x as i32;
    let y0 = origin.y as i32;
    let x1 = x0 + size.w as i32 - 1;
    let y1 = y0 + size.h as i32 - 1;

    put(x0, y0, BOX_TOP_LEFT);
    for x in x0 + 1..x1 {
        put(x, y0, BOX_HORIZONTAL);
    }
    put(x1, y0, BOX_TOP_RIGHT);

    for y in y0 + 1..y1 {
        put(x0, y, BOX_VERTICAL);
        put(x1, y, BOX_VERTICAL);
    }

    put(x0, y1, BOX_BOTTOM_LEFT);
    for x in x0 + 1..x1 {
        put(x, y1, BOX_HORIZONTAL);
    }
    put(x1, y1, BOX_BOTTOM_RIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(rect: Rect) -> Vec<(Point, char)> {
        let mut cells = Vec::new();
        for_each_box_cell(rect, |p, ch| cells.push((p, ch)));
        cells
    }

    #[test]
    fn box_outline_covers_perimeter_only() {
        let cells = collect(Rect::from_xywh(1, 1, 4, 3));
        // 2 * 4 + 2 * (3 - 2)
        assert_eq!(cells.len(), 10);
        assert!(cells.contains(&(Point::new(1, 1), BOX_TOP_LEFT)));
        assert!(cells.contains(&(Point::new(4, 1), BOX_TOP_RIGHT)));
        assert!(cells.contains(&(Point::new(1, 3), BOX_BOTTOM_LEFT)));
        assert!(cells.contains(&(Point::new(4, 3), BOX_BOTTOM_RIGHT)));
        assert!(cells.contains(&(Point::new(1, 2), BOX_VERTICAL)));
        assert!(!cells.iter().any(|(p, _)| *p == Point::new(2, 2)));
    }

    #[test]
    fn degenerate_boxes_draw_nothing() {
        assert!(collect(Rect::from_xywh(0, 0, 0, 0)).is_empty());
        assert!(collect(Rect::from_xywh(0, 0, -3, 5)).is_empty());
        assert!(collect(Rect::from_xywh(0, 0, 1, 5)).is_empty());
    }

    #[test]
    fn negative_cells_are_clipped() {
        let cells = collect(Rect::from_xywh(-1, -1, 3, 3));
        assert_eq!(cells, vec![(Point::new(1, 1), BOX_BOTTOM_RIGHT)]);
    }
}
