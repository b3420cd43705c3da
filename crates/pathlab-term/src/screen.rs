//! The [`Screen`] type — a width×height buffer of styled characters — and
//! the [`Frame`] diff handed to drivers.

use pathlab_core::{Point, Range};

use crate::style::Style;

/// A styled character cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScreenCell {
    pub ch: char,
    pub style: Style,
}

impl ScreenCell {
    /// Never produced by drawing code; used to force a full redraw.
    const INVALID: Self = Self {
        ch: '\0',
        style: Style {
            fg: crate::style::Color::DEFAULT,
            bg: crate::style::Color::DEFAULT,
            attrs: crate::style::AttrMask::NONE,
        },
    };

    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }

    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Default for ScreenCell {
    #[inline]
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A 2D buffer of [`ScreenCell`]s in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    cells: Vec<ScreenCell>,
    bounds: Range,
}

impl Screen {
    /// Create a new screen of the given dimensions, filled with blanks.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![ScreenCell::default(); bounds.len()],
            bounds,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Read the cell at `p`. Out-of-bounds reads give a blank cell.
    pub fn at(&self, p: Point) -> ScreenCell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op if `p` is outside bounds.
    pub fn set(&mut self, p: Point, cell: ScreenCell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: ScreenCell) {
        self.cells.fill(cell);
    }

    /// Write `text` left to right from `p`, clipped at the right edge.
    /// Returns the number of characters written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> usize {
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let q = p.shift(i as i32, 0);
            if !self.bounds.contains(q) {
                break;
            }
            self.set(q, ScreenCell { ch, style });
            written += 1;
        }
        written
    }

    /// Copy all cells from a same-sized `src`.
    pub fn copy_from(&mut self, src: &Screen) {
        if self.bounds == src.bounds {
            self.cells.copy_from_slice(&src.cells);
        }
    }

    /// Make every cell differ from anything a model draws, so the next
    /// [`compute_frame`] against this screen repaints everything.
    pub fn invalidate(&mut self) {
        self.cells.fill(ScreenCell::INVALID);
    }

    /// Row-major iterator over `(Point, ScreenCell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, ScreenCell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// The screen contents as plain text, one line per row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height() as usize);
        for row in self.cells.chunks(self.width().max(1) as usize) {
            out.extend(row.iter().map(|c| c.ch));
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: ScreenCell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized screens.
///
/// Returns a [`Frame`] containing only the cells that differ.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let cells = curr
        .iter()
        .filter(|&(p, c)| prev.at(p) != c)
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}
