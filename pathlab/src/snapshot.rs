//! Serializable views of a session: a JSON snapshot and a plain-text grid.

use pathlab_core::{Cell, Point};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::{RunState, Session};
use crate::tile::Tile;

/// Everything a renderer needs, in one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: i32,
    /// Row-major, `size * size` entries.
    pub cells: Vec<Cell>,
    pub path: Vec<Point>,
    pub state: RunState,
}

impl Snapshot {
    pub fn of(session: &Session) -> Self {
        Self {
            size: session.grid().size(),
            cells: session.grid().cells().to_vec(),
            path: session.path().to_vec(),
            state: session.state(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Mask of path membership, indexed like the grid's cells.
pub(crate) fn path_mask(session: &Session) -> Vec<bool> {
    let grid = session.grid();
    let mut mask = vec![false; grid.len()];
    for i in session.path().iter().filter_map(|&p| grid.idx(p)) {
        mask[i] = true;
    }
    mask
}

/// The grid as text, one character per cell and one line per row.
pub fn ascii(session: &Session) -> String {
    let grid = session.grid();
    let on_path = path_mask(session);
    let mut out = String::with_capacity(grid.len() + grid.size().max(0) as usize);
    for (i, (p, cell)) in grid.iter().enumerate() {
        out.push(Tile::of(cell, on_path[i]).ascii());
        if p.x == grid.size() - 1 {
            out.push('\n');
        }
    }
    out
}
