//! The lab session: the grid, the paint mode and the search in progress.
//!
//! Every user intent goes through a [`Session`]. While a search is running
//! all mutating intents are rejected, which is the only thing keeping
//! painting and searching from interleaving on the same grid.

use std::fmt;

use pathlab_core::{Grid, Point};
use pathlab_maze::MazeGen;
use pathlab_paths::{AstarSearch, Outcome, SearchStatus, Step};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::LabConfig;

/// What a cell click paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Start,
    End,
    Wall,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Start => "start",
            Mode::End => "end",
            Mode::Wall => "wall",
        })
    }
}

/// Coarse state of the session's search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Succeeded => "found",
            RunState::Failed => "no path",
        })
    }
}

/// Counters shown in status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub expanded: usize,
    pub open: usize,
    pub path_len: usize,
}

/// An interactive lab session.
pub struct Session {
    grid: Grid,
    size: i32,
    mode: Mode,
    search: Option<AstarSearch>,
    path: Vec<Point>,
    outcome: Option<Outcome>,
    mazegen: MazeGen<StdRng>,
}

impl Session {
    /// A session over an empty `size`×`size` grid. `seed` fixes the maze
    /// sequence; without one, mazes differ run to run.
    pub fn new(size: i32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            grid: Grid::new(size),
            size,
            mode: Mode::default(),
            search: None,
            path: Vec::new(),
            outcome: None,
            mazegen: MazeGen::new(rng),
        }
    }

    pub fn from_config(config: &LabConfig) -> Self {
        Self::new(config.size, config.seed)
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Choose what subsequent clicks paint.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.reject("set mode") {
            return false;
        }
        self.mode = mode;
        true
    }

    /// Apply the current mode to cell `(x, y)`.
    ///
    /// Returns `false` while running, out of bounds, or when toggling a wall
    /// on the start or end. A successful paint drops the previous search's
    /// overlay and path.
    pub fn click_cell(&mut self, x: i32, y: i32) -> bool {
        if self.reject("click") {
            return false;
        }
        let p = Point::new(x, y);
        let painted = match self.mode {
            Mode::Start => self.grid.set_start(p),
            Mode::End => self.grid.set_end(p),
            Mode::Wall => self.grid.toggle_wall(p),
        };
        if painted {
            self.reset_search();
        } else {
            log::debug!("{} paint at {p} ignored", self.mode);
        }
        painted
    }

    /// Start a search. Needs a start and an end and no search in progress.
    pub fn run(&mut self) -> bool {
        if self.reject("run") {
            return false;
        }
        self.reset_search();
        match AstarSearch::new(&mut self.grid) {
            Some(search) => {
                self.search = Some(search);
                true
            }
            None => {
                log::debug!("run ignored: start or end not set");
                false
            }
        }
    }

    /// Perform one search step. `None` unless a search is running.
    ///
    /// On the terminal step the path and outcome are recorded and the
    /// session stops running.
    pub fn advance(&mut self) -> Option<Step> {
        let search = self
            .search
            .as_mut()
            .filter(|s| s.status() == SearchStatus::Running)?;
        let step = search.step(&mut self.grid);
        if step.is_terminal() {
            self.path = search.path().to_vec();
            self.outcome = search.outcome();
        }
        Some(step)
    }

    /// Run a search to the end without pausing.
    pub fn run_to_completion(&mut self) -> Option<Outcome> {
        if !self.run() {
            return None;
        }
        while self.advance().is_some_and(|s| !s.is_terminal()) {}
        self.outcome.clone()
    }

    /// Replace the grid with an empty one.
    pub fn clear(&mut self) -> bool {
        if self.reject("clear") {
            return false;
        }
        self.grid = Grid::new(self.size);
        self.reset_search();
        true
    }

    /// Replace the grid with a fresh maze, start top-left, end bottom-right.
    pub fn generate_maze(&mut self) -> bool {
        if self.reject("maze") {
            return false;
        }
        self.grid = self.mazegen.generate(self.size);
        self.reset_search();
        true
    }

    fn reject(&self, intent: &str) -> bool {
        let running = self.is_running();
        if running {
            log::debug!("{intent} ignored: search running");
        }
        running
    }

    fn reset_search(&mut self) {
        self.search = None;
        self.path.clear();
        self.outcome = None;
        self.grid.clear_search();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The last found path, start excluded, end included.
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn state(&self) -> RunState {
        match self.search.as_ref().map(AstarSearch::status) {
            None => RunState::Idle,
            Some(SearchStatus::Running) => RunState::Running,
            Some(SearchStatus::Succeeded) => RunState::Succeeded,
            Some(SearchStatus::Failed) => RunState::Failed,
        }
    }

    pub fn stats(&self) -> SearchStats {
        let (expanded, open) = self
            .search
            .as_ref()
            .map_or((0, 0), |s| (s.expanded(), s.open_len()));
        SearchStats {
            expanded,
            open,
            path_len: self.path.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pathlab_core::Cell;

    use super::*;

    fn session(size: i32) -> Session {
        Session::new(size, Some(1))
    }

    /// Start top-left, end bottom-right.
    fn corners(size: i32) -> Session {
        let mut s = session(size);
        s.set_mode(Mode::Start);
        assert!(s.click_cell(0, 0));
        s.set_mode(Mode::End);
        assert!(s.click_cell(size - 1, size - 1));
        s
    }

    #[test]
    fn empty_five_by_five_finds_length_eight() {
        let mut s = corners(5);
        let outcome = s.run_to_completion().unwrap();
        assert!(outcome.is_success());
        assert_eq!(s.state(), RunState::Succeeded);
        assert_eq!(s.path().len(), 8);
        assert_eq!(s.path().last(), Some(&Point::new(4, 4)));
        assert!(!s.path().contains(&Point::ZERO));
        assert!(s.path().iter().all(|&p| !s.grid().at(p).unwrap().wall));
        assert!(!s.is_running());
    }

    #[test]
    fn walled_column_fails_with_empty_path() {
        let mut s = corners(5);
        s.set_mode(Mode::Wall);
        for y in 0..5 {
            assert!(s.click_cell(2, y));
        }
        assert_eq!(s.run_to_completion(), Some(Outcome::Failed));
        assert_eq!(s.state(), RunState::Failed);
        assert!(s.path().is_empty());
        assert_eq!(s.stats().expanded, 10);
    }

    #[test]
    fn running_gate_rejects_every_mutation() {
        let mut s = corners(7);
        assert!(s.run());
        assert!(matches!(s.advance(), Some(Step::Expanded(_))));
        assert!(s.is_running());

        let before = s.grid().clone();
        assert!(!s.set_mode(Mode::Wall));
        assert_eq!(s.mode(), Mode::End);
        assert!(!s.click_cell(3, 3));
        assert!(!s.clear());
        assert!(!s.generate_maze());
        assert!(!s.run());
        assert_eq!(s.run_to_completion(), None);
        assert_eq!(s.grid(), &before);

        while s.advance().is_some_and(|st| !st.is_terminal()) {}
        assert!(!s.is_running());
        assert!(s.set_mode(Mode::Wall));
        assert!(s.click_cell(3, 3));
    }

    #[test]
    fn advance_only_while_running() {
        let mut s = corners(3);
        assert_eq!(s.advance(), None);
        s.run_to_completion();
        assert_eq!(s.advance(), None);
    }

    #[test]
    fn advance_animates_overlay() {
        let mut s = corners(5);
        s.run();
        assert!(s.grid().at(Point::ZERO).unwrap().open);
        assert_eq!(s.advance(), Some(Step::Expanded(Point::ZERO)));
        let start = s.grid().at(Point::ZERO).unwrap();
        assert!(start.visited && !start.open);
        assert_eq!(s.stats().expanded, 1);
        assert_eq!(s.stats().open, 2);
        assert!(s.path().is_empty());
    }

    #[test]
    fn run_needs_both_endpoints() {
        let mut s = session(5);
        assert!(!s.run());
        s.click_cell(1, 1);
        assert!(!s.run());
        assert_eq!(s.state(), RunState::Idle);
        s.set_mode(Mode::End);
        s.click_cell(3, 3);
        assert!(s.run());
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = corners(5);
        s.set_mode(Mode::Wall);
        s.click_cell(2, 2);
        s.run_to_completion();
        assert!(s.clear());
        assert!(s.grid().iter().all(|(_, c)| c == Cell::EMPTY));
        assert_eq!(s.grid().start(), None);
        assert_eq!(s.grid().end(), None);
        assert!(s.path().is_empty());
        assert_eq!(s.outcome(), None);
        assert_eq!(s.state(), RunState::Idle);
        assert_eq!(s.stats(), SearchStats::default());
        assert_eq!(s.grid().size(), 5);
    }

    #[test]
    fn single_start_and_end_under_repeated_clicks() {
        let mut s = session(6);
        let clicks = [
            (Mode::Start, 1, 1),
            (Mode::End, 4, 4),
            (Mode::Start, 2, 3),
            (Mode::End, 2, 3),
            (Mode::Start, 5, 0),
            (Mode::End, 0, 5),
            (Mode::Start, 0, 5),
        ];
        for (mode, x, y) in clicks {
            s.set_mode(mode);
            s.click_cell(x, y);
            assert!(s.grid().count(|c| c.start) <= 1);
            assert!(s.grid().count(|c| c.end) <= 1);
            assert_eq!(s.grid().count(|c| c.start && c.end), 0);
        }
        assert_eq!(s.grid().start(), Some(Point::new(0, 5)));
        assert_eq!(s.grid().end(), None);
    }

    #[test]
    fn wall_clicks_toggle_and_spare_endpoints() {
        let mut s = corners(4);
        s.set_mode(Mode::Wall);
        assert!(s.click_cell(1, 2));
        assert!(s.grid().cell(1, 2).unwrap().wall);
        assert!(s.click_cell(1, 2));
        assert!(!s.grid().cell(1, 2).unwrap().wall);
        assert!(!s.click_cell(0, 0));
        assert!(!s.click_cell(3, 3));
        assert!(!s.grid().cell(0, 0).unwrap().wall);
    }

    #[test]
    fn endpoint_on_wall_clears_the_wall() {
        let mut s = session(4);
        s.set_mode(Mode::Wall);
        s.click_cell(2, 2);
        s.set_mode(Mode::Start);
        assert!(s.click_cell(2, 2));
        let c = s.grid().cell(2, 2).unwrap();
        assert!(c.start && !c.wall);
    }

    #[test]
    fn out_of_bounds_clicks_are_rejected() {
        let mut s = session(4);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (100, 100)] {
            assert!(!s.click_cell(x, y));
        }
        assert!(s.grid().iter().all(|(_, c)| c.is_blank()));
    }

    #[test]
    fn painting_after_a_run_drops_the_overlay() {
        let mut s = corners(5);
        s.run_to_completion();
        assert!(s.grid().count(|c| c.visited) > 0);
        s.set_mode(Mode::Wall);
        assert!(s.click_cell(2, 0));
        assert_eq!(s.grid().count(|c| c.visited || c.open), 0);
        assert!(s.path().is_empty());
        assert_eq!(s.state(), RunState::Idle);
    }

    #[test]
    fn failed_paint_keeps_the_last_result() {
        let mut s = corners(5);
        s.run_to_completion();
        s.set_mode(Mode::Wall);
        assert!(!s.click_cell(0, 0));
        assert_eq!(s.path().len(), 8);
        assert_eq!(s.state(), RunState::Succeeded);
    }

    #[test]
    fn maze_is_solvable_corner_to_corner() {
        for size in [5, 8, 25] {
            let mut s = session(size);
            assert!(s.generate_maze());
            assert_eq!(s.grid().start(), Some(Point::ZERO));
            assert_eq!(s.grid().end(), Some(Point::new(size - 1, size - 1)));
            let outcome = s.run_to_completion().unwrap();
            assert!(outcome.is_success(), "size {size}");
            assert!(s.path().len() >= 2 * (size as usize - 1));
        }
    }

    #[test]
    fn seeded_sessions_generate_identical_mazes() {
        let mut a = Session::new(15, Some(99));
        let mut b = Session::new(15, Some(99));
        a.generate_maze();
        b.generate_maze();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn reruns_are_deterministic() {
        let mut s = corners(9);
        s.set_mode(Mode::Wall);
        for (x, y) in [(4, 0), (4, 1), (4, 2), (4, 3), (2, 6), (6, 6)] {
            s.click_cell(x, y);
        }
        let first = s.run_to_completion();
        let overlay = s.grid().clone();
        let second = s.run_to_completion();
        assert_eq!(first, second);
        assert_eq!(s.grid(), &overlay);
    }
}
