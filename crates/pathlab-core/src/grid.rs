//! The [`Grid`] type — a square arena of [`Cell`]s.
//!
//! Cells live in one flat row-major buffer indexed by `y * size + x`.
//! Identity is the coordinate: nothing outside the grid ever holds a
//! reference to a cell, search bookkeeping keys on indices instead.

use crate::cell::Cell;
use crate::geom::{Point, Range};

/// An N×N grid of [`Cell`]s that owns the single start / single end
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    cells: Vec<Cell>,
    size: i32,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a new `size`×`size` grid of blank cells.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            cells: vec![Cell::EMPTY; (size as usize) * (size as usize)],
            size,
            start: None,
            end: None,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The bounding range `[0, size)²`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size, self.size)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.size as usize) + (p.x as usize))
    }

    /// Point at flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.size.max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// The cell at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.at(Point::new(x, y))
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Cell::is_passable)
    }

    /// Raw cell storage, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Painting
    // -----------------------------------------------------------------------

    /// Set the wall flag of `p`.
    ///
    /// Returns `false` without touching the grid if `p` is out of bounds or
    /// holds the start or end.
    pub fn set_wall(&mut self, p: Point, value: bool) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        let c = &mut self.cells[i];
        if c.start || c.end {
            return false;
        }
        c.wall = value;
        true
    }

    /// Flip the wall flag of `p`. Same no-op rules as [`set_wall`](Self::set_wall).
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        match self.at(p) {
            Some(c) => self.set_wall(p, !c.wall),
            None => false,
        }
    }

    /// Move the start to `p`.
    ///
    /// The previous start is cleared and a wall at `p` is removed. If `p` is
    /// the current end, the end is unset: the latest assignment wins.
    pub fn set_start(&mut self, p: Point) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        if let Some(old) = self.start.take().and_then(|o| self.idx(o)) {
            self.cells[old].start = false;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        let c = &mut self.cells[i];
        c.end = false;
        c.wall = false;
        c.start = true;
        self.start = Some(p);
        true
    }

    /// Move the end to `p`. Mirror image of [`set_start`](Self::set_start).
    pub fn set_end(&mut self, p: Point) -> bool {
        let Some(i) = self.idx(p) else {
            return false;
        };
        if let Some(old) = self.end.take().and_then(|o| self.idx(o)) {
            self.cells[old].end = false;
        }
        if self.start == Some(p) {
            self.start = None;
        }
        let c = &mut self.cells[i];
        c.start = false;
        c.wall = false;
        c.end = true;
        self.end = Some(p);
        true
    }

    /// Turn every cell into a blank wall and forget start and end.
    pub fn fill_walls(&mut self) {
        self.cells.fill(Cell::WALL);
        self.start = None;
        self.end = None;
    }

    // -----------------------------------------------------------------------
    // Search overlay
    // -----------------------------------------------------------------------

    /// Set or clear the open-set flag of `p`.
    pub fn set_open(&mut self, p: Point, value: bool) {
        if let Some(i) = self.idx(p) {
            self.cells[i].open = value;
        }
    }

    /// Flag `p` as expanded. Clears its open flag.
    pub fn mark_visited(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            let c = &mut self.cells[i];
            c.visited = true;
            c.open = false;
        }
    }

    /// Reset `visited` and `open` on every cell.
    pub fn clear_search(&mut self) {
        for c in self.cells.iter_mut() {
            c.clear_search();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Count the cells satisfying `f`.
    pub fn count(&self, mut f: impl FnMut(Cell) -> bool) -> usize {
        self.cells.iter().filter(|&&c| f(c)).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(g: &Grid) -> usize {
        g.count(|c| c.start)
    }

    fn ends(g: &Grid) -> usize {
        g.count(|c| c.end)
    }

    #[test]
    fn new_grid_is_blank() {
        let g = Grid::new(4);
        assert_eq!(g.len(), 16);
        assert!(g.iter().all(|(_, c)| c.is_blank()));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn out_of_bounds_is_absent() {
        let g = Grid::new(3);
        assert_eq!(g.cell(-1, 0), None);
        assert_eq!(g.cell(0, 3), None);
        assert_eq!(g.cell(3, 3), None);
        assert_eq!(g.cell(2, 2), Some(Cell::EMPTY));
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::new(5);
        let p = Point::new(3, 2);
        let i = g.idx(p).unwrap();
        assert_eq!(i, 13);
        assert_eq!(g.point(i), p);
        assert_eq!(g.idx(Point::new(5, 0)), None);
    }

    #[test]
    fn iter_is_row_major() {
        let mut g = Grid::new(3);
        g.set_wall(Point::new(1, 0), true);
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 9);
        assert_eq!(items[1].0, Point::new(1, 0));
        assert!(items[1].1.wall);
        assert_eq!(items[3].0, Point::new(0, 1));
    }

    #[test]
    fn single_start_and_end_under_any_sequence() {
        let mut g = Grid::new(5);
        let moves = [
            (true, Point::new(0, 0)),
            (false, Point::new(4, 4)),
            (true, Point::new(2, 2)),
            (true, Point::new(4, 4)),
            (false, Point::new(0, 0)),
            (false, Point::new(1, 3)),
            (true, Point::new(1, 3)),
            (false, Point::new(3, 1)),
        ];
        for (is_start, p) in moves {
            if is_start {
                g.set_start(p);
            } else {
                g.set_end(p);
            }
            assert!(starts(&g) <= 1);
            assert!(ends(&g) <= 1);
            assert_eq!(starts(&g), usize::from(g.start().is_some()));
            assert_eq!(ends(&g), usize::from(g.end().is_some()));
            if let (Some(s), Some(e)) = (g.start(), g.end()) {
                assert_ne!(s, e);
            }
        }
        assert_eq!(g.start(), Some(Point::new(1, 3)));
        assert_eq!(g.end(), Some(Point::new(3, 1)));
    }

    #[test]
    fn latest_assignment_wins_on_coincidence() {
        let mut g = Grid::new(3);
        g.set_start(Point::new(1, 1));
        g.set_end(Point::new(1, 1));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), Some(Point::new(1, 1)));
        let c = g.cell(1, 1).unwrap();
        assert!(c.end && !c.start);

        g.set_start(Point::new(1, 1));
        assert_eq!(g.end(), None);
        assert_eq!(g.start(), Some(Point::new(1, 1)));
    }

    #[test]
    fn walls_never_cover_start_or_end() {
        let mut g = Grid::new(3);
        let s = Point::new(0, 0);
        let e = Point::new(2, 2);
        g.set_start(s);
        g.set_end(e);
        assert!(!g.toggle_wall(s));
        assert!(!g.set_wall(e, true));
        assert!(!g.cell(0, 0).unwrap().wall);
        assert!(!g.cell(2, 2).unwrap().wall);

        // Painting the start over a wall clears the wall.
        let p = Point::new(1, 1);
        assert!(g.toggle_wall(p));
        assert!(g.cell(1, 1).unwrap().wall);
        g.set_start(p);
        let c = g.cell(1, 1).unwrap();
        assert!(c.start && !c.wall);
        assert!(!g.cell(0, 0).unwrap().start);
    }

    #[test]
    fn toggle_wall_flips_and_rejects_out_of_bounds() {
        let mut g = Grid::new(2);
        let p = Point::new(1, 0);
        assert!(g.toggle_wall(p));
        assert!(g.at(p).unwrap().wall);
        assert!(g.toggle_wall(p));
        assert!(!g.at(p).unwrap().wall);
        assert!(!g.toggle_wall(Point::new(2, 0)));
    }

    #[test]
    fn search_overlay_marks_and_clears() {
        let mut g = Grid::new(3);
        let p = Point::new(1, 2);
        g.set_open(p, true);
        assert!(g.at(p).unwrap().open);
        g.mark_visited(p);
        let c = g.at(p).unwrap();
        assert!(c.visited && !c.open);
        g.set_open(Point::new(0, 0), true);
        g.clear_search();
        assert_eq!(g.count(|c| c.visited || c.open), 0);
    }

    #[test]
    fn fill_walls_forgets_endpoints() {
        let mut g = Grid::new(3);
        g.set_start(Point::new(0, 0));
        g.set_end(Point::new(2, 2));
        g.fill_walls();
        assert_eq!(g.count(|c| c.wall), 9);
        assert_eq!(g.count(|c| c.start || c.end), 0);
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Vec<Cell>,
    size: i32,
    start: Option<Point>,
    end: Option<Point>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> Result<Self, String> {
        if raw.size < 0 || raw.cells.len() != (raw.size as usize).pow(2) {
            return Err(format!(
                "{} cells do not fill a grid of size {}",
                raw.cells.len(),
                raw.size
            ));
        }
        let grid = Grid {
            cells: raw.cells,
            size: raw.size,
            start: None,
            end: None,
        };
        let flagged = |f: fn(&Cell) -> bool| -> Vec<Point> {
            grid.iter().filter(|(_, c)| f(c)).map(|(p, _)| p).collect()
        };
        let starts = flagged(|c| c.start);
        let ends = flagged(|c| c.end);
        if starts.as_slice() != raw.start.as_slice() {
            return Err(format!("start {:?} disagrees with cells {starts:?}", raw.start));
        }
        if ends.as_slice() != raw.end.as_slice() {
            return Err(format!("end {:?} disagrees with cells {ends:?}", raw.end));
        }
        if raw.start.is_some() && raw.start == raw.end {
            return Err("start and end share a cell".into());
        }
        if grid.cells.iter().any(|c| c.wall && (c.start || c.end)) {
            return Err("start or end is walled".into());
        }
        Ok(Grid {
            start: raw.start,
            end: raw.end,
            ..grid
        })
    }
}
