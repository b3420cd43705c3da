//! How a cell looks, shared by the terminal view and the ASCII dump.

use pathlab_core::Cell;
use pathlab_term::{ScreenCell, Style};

use crate::colors::*;

/// The visible class of a cell, in drawing precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Start,
    End,
    Wall,
    Path,
    Open,
    Visited,
    Empty,
}

impl Tile {
    /// Classify a cell. Start beats end beats wall beats path beats open
    /// beats visited.
    pub fn of(cell: Cell, on_path: bool) -> Self {
        if cell.start {
            Tile::Start
        } else if cell.end {
            Tile::End
        } else if cell.wall {
            Tile::Wall
        } else if on_path {
            Tile::Path
        } else if cell.open {
            Tile::Open
        } else if cell.visited {
            Tile::Visited
        } else {
            Tile::Empty
        }
    }

    /// Single-character form for plain text output.
    pub fn ascii(self) -> char {
        match self {
            Tile::Start => 'S',
            Tile::End => 'E',
            Tile::Wall => '#',
            Tile::Path => '*',
            Tile::Open => '+',
            Tile::Visited => 'o',
            Tile::Empty => '.',
        }
    }

    /// The two terminal columns a cell occupies.
    pub fn screen_cells(self) -> [ScreenCell; 2] {
        let (left, right, bg) = match self {
            Tile::Start => ('S', ' ', START_BG),
            Tile::End => ('E', ' ', END_BG),
            Tile::Wall => (' ', ' ', WALL_BG),
            Tile::Path => ('*', ' ', PATH_BG),
            Tile::Open => ('+', ' ', OPEN_BG),
            Tile::Visited => (' ', ' ', VISITED_BG),
            Tile::Empty => {
                let style = Style::default().with_fg(FG_DIM).with_bg(BG);
                return [
                    ScreenCell::default().with_char('.').with_style(style),
                    ScreenCell::default().with_char(' ').with_style(style),
                ];
            }
        };
        let style = Style::default().with_fg(FG_DARK).with_bg(bg);
        [
            ScreenCell::default().with_char(left).with_style(style),
            ScreenCell::default().with_char(right).with_style(style),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence() {
        let all = Cell {
            wall: true,
            start: true,
            end: true,
            visited: true,
            open: true,
        };
        assert_eq!(Tile::of(all, true), Tile::Start);
        assert_eq!(Tile::of(Cell { start: false, ..all }, true), Tile::End);
        let no_ends = Cell {
            start: false,
            end: false,
            ..all
        };
        assert_eq!(Tile::of(no_ends, true), Tile::Wall);
        let open_visited = Cell {
            wall: false,
            ..no_ends
        };
        assert_eq!(Tile::of(open_visited, true), Tile::Path);
        assert_eq!(Tile::of(open_visited, false), Tile::Open);
        let visited = Cell {
            open: false,
            ..open_visited
        };
        assert_eq!(Tile::of(visited, false), Tile::Visited);
        assert_eq!(Tile::of(Cell::EMPTY, false), Tile::Empty);
    }

    #[test]
    fn every_tile_has_a_distinct_ascii_char() {
        let tiles = [
            Tile::Start,
            Tile::End,
            Tile::Wall,
            Tile::Path,
            Tile::Open,
            Tile::Visited,
            Tile::Empty,
        ];
        let mut chars: Vec<char> = tiles.iter().map(|t| t.ascii()).collect();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), tiles.len());
    }
}
