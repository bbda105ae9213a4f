//! Board buffer sized to the viewport.

use crate::types::{Point, Size};

/// One byte per viewport cell in a single contiguous allocation.
///
/// Resized (and blanked) on every viewport change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    size: Size,
    cells: Vec<u8>,
}

impl Grid {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![0; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize and zero every cell. Reuses the allocation when possible.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.cells.clear();
        self.cells.resize(size.area(), 0);
    }

    #[inline(always)]
    fn idx(&self, p: Point) -> Option<usize> {
        if self.size.is_empty() || p.x < 0 || p.y < 0 || p.x >= self.size.w || p.y >= self.size.h {
            return None;
        }
        Some((p.y as usize) * (self.size.w as usize) + (p.x as usize))
    }

    pub fn get(&self, p: Point) -> Option<u8> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// Write a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, p: Point, v: u8) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = v;
        }
    }

    pub fn fill(&mut self, v: u8) {
        self.cells.fill(v);
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn count_nonzero(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_within_bounds() {
        let mut grid = Grid::new(Size::new(4, 3));
        grid.set(Point::new(3, 2), 7);
        assert_eq!(grid.get(Point::new(3, 2)), Some(7));
        assert_eq!(grid.count_nonzero(), 1);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut grid = Grid::new(Size::new(4, 3));
        grid.set(Point::new(4, 0), 1);
        grid.set(Point::new(-1, 0), 1);
        assert_eq!(grid.get(Point::new(4, 0)), None);
        assert_eq!(grid.count_nonzero(), 0);
    }

    #[test]
    fn resize_blanks_and_resizes() {
        let mut grid = Grid::new(Size::new(2, 2));
        grid.fill(1);
        grid.resize(Size::new(5, 4));
        assert_eq!(grid.cells().len(), 20);
        assert_eq!(grid.count_nonzero(), 0);

        grid.resize(Size::new(0, 4));
        assert!(grid.cells().is_empty());
        assert_eq!(grid.get(Point::new(0, 0)), None);
    }
}
