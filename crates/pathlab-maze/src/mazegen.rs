//! Perfect-maze generation.
//!
//! Cells with even coordinates form a lattice; carving walks the lattice
//! depth first, knocking out the wall cell between two lattice cells each
//! time it descends. Walls end up one cell thick and the open cells form a
//! tree rooted at the top-left corner.

use pathlab_core::{Grid, Point};
use pathlab_paths::Reachable;
use rand::Rng;
use rand::seq::SliceRandom;

/// Lattice offsets before shuffling: up, right, down, left.
const LATTICE_DIRS: [Point; 4] = [
    Point::new(0, -2),
    Point::new(2, 0),
    Point::new(0, 2),
    Point::new(-2, 0),
];

/// One pending call of the depth-first carve.
struct Frame {
    pos: Point,
    dirs: [Point; 4],
    next: usize,
}

/// Maze generator driven by `R`.
///
/// Seed `R` (e.g. `StdRng::seed_from_u64`) for reproducible mazes.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a `size`×`size` maze with the start at `(0, 0)` and the end
    /// at `(size-1, size-1)`.
    ///
    /// The end is always reachable: when carving misses it (even sizes),
    /// a dead-end corridor is opened from the end to the carved region.
    pub fn generate(&mut self, size: i32) -> Grid {
        let mut grid = Grid::new(size);
        if grid.is_empty() {
            return grid;
        }
        grid.fill_walls();

        let carved = self.carve(&mut grid, Point::ZERO);

        grid.set_start(Point::ZERO);
        grid.set_end(Point::new(size - 1, size - 1));
        let opened = connect_end(&mut grid);

        log::info!(
            "generated {size}x{size} maze: {carved} lattice cells, {opened} repair cells"
        );
        grid
    }

    /// Carve passages from `from` through every wall-enclosed lattice cell
    /// reachable in steps of two. Returns the number of lattice cells opened.
    ///
    /// Visits cells in the same order as the recursive formulation, with an
    /// explicit stack so depth never grows the call stack.
    pub fn carve(&mut self, grid: &mut Grid, from: Point) -> usize {
        if !grid.set_wall(from, false) {
            return 0;
        }
        let mut carved = 1;
        let mut stack = vec![Frame {
            pos: from,
            dirs: self.shuffled_dirs(),
            next: 0,
        }];

        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let d = top.dirs[top.next];
            top.next += 1;
            let pos = top.pos;

            let n = pos + d;
            if !grid.at(n).is_some_and(|c| c.wall) {
                continue;
            }
            grid.set_wall(Point::new(pos.x + d.x / 2, pos.y + d.y / 2), false);
            grid.set_wall(n, false);
            carved += 1;

            let dirs = self.shuffled_dirs();
            stack.push(Frame {
                pos: n,
                dirs,
                next: 0,
            });
        }

        carved
    }

    fn shuffled_dirs(&mut self) -> [Point; 4] {
        let mut dirs = LATTICE_DIRS;
        dirs.shuffle(&mut self.rng);
        dirs
    }
}

/// Open a corridor from the end toward the start until it touches the region
/// reachable from the start. Returns the number of wall cells opened.
fn connect_end(grid: &mut Grid) -> usize {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        return 0;
    };
    let mut reach = Reachable::new(grid.bounds());
    reach.fill(&*grid, start);
    if reach.contains(end) {
        return 0;
    }

    let mut opened = 0;
    let mut cur = end;
    while !cur.neighbors_4().iter().any(|&n| reach.contains(n)) {
        cur = if cur.x != start.x {
            cur.shift((start.x - cur.x).signum(), 0)
        } else {
            cur.shift(0, (start.y - cur.y).signum())
        };
        if grid.set_wall(cur, false) {
            opened += 1;
        }
    }
    log::debug!("end {end} was cut off, opened {opened} cells to reach it");
    opened
}
