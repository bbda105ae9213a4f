//! Framebuffer and style types for headless rendering.

use crate::types::{Color, BLACK, WHITE};

/// Per-cell colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self { fg: WHITE, bg: BLACK }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer and blank every cell.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write a string left to right. Cells outside the buffer are dropped.
    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width as i32 {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// The characters of row `y` as a string (empty if out of range).
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width as i32)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }

    /// `len` characters starting at `(x, y)`, truncated at the right edge.
    pub fn text_at(&self, x: i32, y: i32, len: usize) -> String {
        (x..x + len as i32)
            .filter_map(|cx| self.get(cx, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_char(-1, 0, 'x', CellStyle::default());
        fb.put_char(3, 0, 'x', CellStyle::default());
        assert_eq!(fb.get(-1, 0), None);
        assert_eq!(fb.row_text(0), "   ");
    }

    #[test]
    fn put_str_truncates_at_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(fb.row_text(0), "  ab");
        assert_eq!(fb.text_at(2, 0, 5), "ab");
    }

    #[test]
    fn resize_blanks_cells() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_char(0, 0, 'x', CellStyle::default());
        fb.resize(3, 1);
        assert_eq!(fb.width(), 3);
        assert_eq!(fb.height(), 1);
        assert_eq!(fb.row_text(0), "   ");
    }
}
