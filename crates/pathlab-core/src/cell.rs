//! The [`Cell`] type — the flags of one grid square.

/// One square of the lab grid.
///
/// All five flags are independent booleans; the [`Grid`](crate::Grid)
/// maintains the cross-cell invariants (single start, single end, start/end
/// never walled).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub wall: bool,
    pub start: bool,
    pub end: bool,
    /// Expanded (closed) by the running or last search.
    pub visited: bool,
    /// Waiting in the open set of the running or last search.
    pub open: bool,
}

impl Cell {
    /// An all-false cell.
    pub const EMPTY: Self = Self {
        wall: false,
        start: false,
        end: false,
        visited: false,
        open: false,
    };

    /// A blank wall cell.
    pub const WALL: Self = Self {
        wall: true,
        ..Self::EMPTY
    };

    /// Whether a search may step onto this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !self.wall
    }

    /// Whether every flag is false.
    #[inline]
    pub fn is_blank(self) -> bool {
        self == Self::EMPTY
    }

    /// Drop the search overlay flags.
    #[inline]
    pub fn clear_search(&mut self) {
        self.visited = false;
        self.open = false;
    }
}
