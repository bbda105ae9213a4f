//! Core types module - shared value types and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no external dependencies, so they can be
//! used by the scene model, the terminal sinks and the input decoders alike.
//!
//! # Cell Space
//!
//! Coordinates address terminal cells:
//!
//! - **Origin**: top-left cell is `(0, 0)`
//! - **X** grows to the right, **Y** grows downward
//! - Components are `i16` so off-screen (negative) positions stay representable
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_UPDATE_HZ` | 10 | Tick rate of the update handler |
//! | `DEFAULT_MAX_CATCH_UP_TICKS` | 5 | Ticks allowed per loop iteration when lagging |
//! | `DEFAULT_IDLE_MS` | 5 | Upper bound on the idle sleep between iterations |
//!
//! # Key Protocol
//!
//! Input arrives one byte at a time. Special keys use a two-byte sequence:
//! [`EXTENDED_KEY_PREFIX`] followed by one of the `KEY_*` follow bytes.
//!
//! | Key | Follow byte |
//! |-----|-------------|
//! | Up | `0x48` |
//! | Down | `0x50` |
//! | Left | `0x4B` |
//! | Right | `0x4D` |
//! | Home / End | `0x47` / `0x4F` |
//! | Insert / Delete | `0x52` / `0x53` |
//! | PageUp / PageDown | `0x49` / `0x51` |
//!
//! # Examples
//!
//! ```
//! use ansi_stage_types::{Color, Point, Rect, Size, WHITE};
//!
//! let rect = Rect::new(Point::new(0, 0), Size::new(10, 5));
//! assert!(rect.contains(Point::new(9, 4)));
//! assert!(!rect.contains(Point::new(10, 4)));
//!
//! assert_eq!(Color::new(255, 255, 255), WHITE);
//! ```

/// Default tick rate of the update handler (Hz).
pub const DEFAULT_UPDATE_HZ: u32 = 10;

/// Maximum number of ticks run in one loop iteration before backlog is dropped.
pub const DEFAULT_MAX_CATCH_UP_TICKS: u32 = 5;

/// Upper bound on the idle sleep between loop iterations (milliseconds).
pub const DEFAULT_IDLE_MS: u64 = 5;

/// Viewport assumed when the terminal size cannot be queried.
pub const FALLBACK_VIEWPORT: Size = Size::new(80, 24);

/// Sentinel byte announcing that the next byte selects a special key.
pub const EXTENDED_KEY_PREFIX: u8 = 0xE0;

pub const KEY_UP: u8 = 0x48;
pub const KEY_DOWN: u8 = 0x50;
pub const KEY_LEFT: u8 = 0x4B;
pub const KEY_RIGHT: u8 = 0x4D;
pub const KEY_HOME: u8 = 0x47;
pub const KEY_END: u8 = 0x4F;
pub const KEY_INSERT: u8 = 0x52;
pub const KEY_DELETE: u8 = 0x53;
pub const KEY_PAGE_UP: u8 = 0x49;
pub const KEY_PAGE_DOWN: u8 = 0x51;

/// Direct (non-extended) control bytes.
pub const BYTE_CTRL_C: u8 = 0x03;
pub const BYTE_BACKSPACE: u8 = 0x08;
pub const BYTE_TAB: u8 = 0x09;
pub const BYTE_LINE_FEED: u8 = 0x0A;
pub const BYTE_ENTER: u8 = 0x0D;
pub const BYTE_ESCAPE: u8 = 0x1B;
pub const BYTE_DELETE: u8 = 0x7F;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Default background color.
pub const BLACK: Color = Color::new(0, 0, 0);

/// Default foreground color.
pub const WHITE: Color = Color::new(255, 255, 255);

/// A terminal cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`, saturating at the `i16` range.
    pub fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub w: i16,
    pub h: i16,
}

impl Size {
    pub const fn new(w: i16, h: i16) -> Self {
        Self { w, h }
    }

    /// True when either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Number of cells covered (zero for empty sizes).
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.w as usize) * (self.h as usize)
        }
    }
}

/// Axis-aligned rectangle in cell space.
///
/// Zero or negative sizes are legal and describe an empty rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub const fn from_xywh(x: i16, y: i16, w: i16, h: i16) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i16 {
        self.origin.x.saturating_add(self.size.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i16 {
        self.origin.y.saturating_add(self.size.h)
    }

    /// Half-open containment: `origin <= p < origin + size`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x < self.right() && p.y >= self.origin.y && p.y < self.bottom()
    }

    /// Clamp a point into the rectangle. Empty rectangles return their origin.
    pub fn clamp(&self, p: Point) -> Point {
        if self.is_empty() {
            return self.origin;
        }
        Point {
            x: p.x.clamp(self.origin.x, self.right() - 1),
            y: p.y.clamp(self.origin.y, self.bottom() - 1),
        }
    }
}

/// Movement direction in cell space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset `(dx, dy)` for this direction (Y grows downward).
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    Enter,
    Tab,
    Backspace,
    Escape,
    CtrlC,
    /// Printable ASCII character.
    Char(char),
    /// Direct byte with no mapping; carried for diagnostic display.
    Unmapped(u8),
    /// Follow byte after the extended prefix with no mapping.
    UnmappedExtended(u8),
}

impl Key {
    /// Movement direction for arrow keys.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Short name for display in overlays.
    pub fn name(&self) -> &'static str {
        match self {
            Key::Up => "UP",
            Key::Down => "DOWN",
            Key::Left => "LEFT",
            Key::Right => "RIGHT",
            Key::Home => "HOME",
            Key::End => "END",
            Key::Insert => "INSERT",
            Key::Delete => "DELETE",
            Key::PageUp => "PAGE UP",
            Key::PageDown => "PAGE DOWN",
            Key::Enter => "ENTER",
            Key::Tab => "TAB",
            Key::Backspace => "BACKSPACE",
            Key::Escape => "ESCAPE",
            Key::CtrlC => "CTRL-C",
            Key::Char(_) => "CHAR",
            Key::Unmapped(_) => "UNMAPPED",
            Key::UnmappedExtended(_) => "UNMAPPED EXT",
        }
    }
}
