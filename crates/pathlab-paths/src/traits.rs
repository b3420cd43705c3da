use pathlab_core::{Grid, Point};

use crate::distance::manhattan;

/// Minimal pathfinding interface: neighbour enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with an admissible heuristic. Every edge costs 1.
pub trait AstarPather: Pather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// Cardinal moves onto in-bounds, non-wall cells, in up, down, left, right
/// order. Diagonals are never offered.
impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for np in p.neighbors_4() {
            if self.is_passable(np) {
                buf.push(np);
            }
        }
    }
}

impl AstarPather for Grid {}
