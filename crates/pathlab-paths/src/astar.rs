//! Step-wise A* over a [`Grid`].
//!
//! The search is a state machine driven one expansion at a time by
//! [`AstarSearch::step`], so a caller can render the grid between steps.
//! Node bookkeeping lives in index-keyed arrays owned by the search; the
//! grid only receives the `open` / `visited` flags used for display.
//!
//! Visited nodes are permanently closed and never reopened. With unit edge
//! costs and the Manhattan heuristic the first pop of the end is still a
//! shortest path.

use std::collections::BinaryHeap;

use pathlab_core::{Grid, Point};

use crate::traits::{AstarPather, Pather};

const NO_PARENT: usize = usize::MAX;
const UNSET: i32 = i32::MAX;

#[derive(Clone)]
struct Node {
    g: i32,
    f: i32,
    parent: usize,
    /// Insertion order into the open set; breaks `f` ties.
    seq: u32,
    open: bool,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNSET,
            f: UNSET,
            parent: NO_PARENT,
            seq: 0,
            open: false,
            closed: false,
        }
    }
}

/// Heap entry, ordered by `(f, seq)` for use in a max-heap `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i32,
    seq: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so the smallest f, then the oldest insertion, pops first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Lifecycle of a search. A search that does not exist yet is idle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    Succeeded,
    Failed,
}

/// What one call to [`AstarSearch::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The cell was popped from the open set and its neighbours relaxed.
    Expanded(Point),
    /// The end was popped; [`AstarSearch::path`] holds the result.
    Succeeded,
    /// The open set ran dry before reaching the end.
    Failed,
}

impl Step {
    /// Whether the search is over after this step.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Step::Expanded(_))
    }
}

/// Terminal result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Path from the cell after start through end.
    Succeeded(Vec<Point>),
    /// The end is unreachable.
    Failed,
}

impl Outcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    /// The found path, empty on failure.
    pub fn path(&self) -> &[Point] {
        match self {
            Outcome::Succeeded(p) => p,
            Outcome::Failed => &[],
        }
    }
}

/// A running (or finished) A* search between the start and end of a grid.
///
/// Always step a search with the grid it was created from; the search keeps
/// indices into that grid.
pub struct AstarSearch {
    nodes: Vec<Node>,
    open: BinaryHeap<NodeRef>,
    goal: Point,
    goal_idx: usize,
    next_seq: u32,
    open_len: usize,
    expanded: usize,
    status: SearchStatus,
    path: Vec<Point>,
    nbuf: Vec<Point>,
}

impl AstarSearch {
    /// Prepare a search from `grid`'s start to its end.
    ///
    /// Returns `None` unless both are set. Every cell's `visited` / `open`
    /// flags are reset, then the start enters the open set with `g = 0`.
    pub fn new(grid: &mut Grid) -> Option<Self> {
        let start = grid.start()?;
        let goal = grid.end()?;
        let start_idx = grid.idx(start)?;
        let goal_idx = grid.idx(goal)?;

        grid.clear_search();

        let mut nodes = vec![Node::default(); grid.len()];
        let f = grid.estimate(start, goal);
        nodes[start_idx] = Node {
            g: 0,
            f,
            parent: NO_PARENT,
            seq: 0,
            open: true,
            closed: false,
        };
        grid.set_open(start, true);

        let mut open = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f,
            seq: 0,
        });

        log::info!("A* search from {start} to {goal}");

        Some(Self {
            nodes,
            open,
            goal,
            goal_idx,
            next_seq: 1,
            open_len: 1,
            expanded: 0,
            status: SearchStatus::Running,
            path: Vec::new(),
            nbuf: Vec::with_capacity(4),
        })
    }

    /// Advance the search by one expansion.
    ///
    /// Once the search has finished, every further call returns the same
    /// terminal step without touching the grid.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        debug_assert_eq!(grid.len(), self.nodes.len(), "search stepped on a foreign grid");
        match self.status {
            SearchStatus::Succeeded => return Step::Succeeded,
            SearchStatus::Failed => return Step::Failed,
            SearchStatus::Running => {}
        }

        let ci = loop {
            let Some(entry) = self.open.pop() else {
                self.status = SearchStatus::Failed;
                log::info!(
                    "A* found no path to {} after {} expansions",
                    self.goal,
                    self.expanded
                );
                return Step::Failed;
            };
            let node = &self.nodes[entry.idx];
            // Skip entries superseded by a cheaper push of the same node.
            if node.open && node.f == entry.f {
                break entry.idx;
            }
        };

        self.nodes[ci].open = false;
        self.open_len -= 1;
        let current = grid.point(ci);

        if ci == self.goal_idx {
            grid.set_open(current, false);
            self.path = self.reconstruct(grid, ci);
            self.status = SearchStatus::Succeeded;
            log::info!(
                "A* reached {} in {} steps after {} expansions",
                self.goal,
                self.path.len(),
                self.expanded
            );
            return Step::Succeeded;
        }

        self.nodes[ci].closed = true;
        self.expanded += 1;
        grid.mark_visited(current);
        log::trace!("expand {current}");

        let current_g = self.nodes[ci].g;
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        grid.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if self.nodes[ni].closed {
                continue;
            }
            let tentative_g = current_g + 1;
            let estimate = grid.estimate(np, self.goal);
            let n = &mut self.nodes[ni];
            if tentative_g >= n.g {
                continue;
            }
            n.g = tentative_g;
            n.f = tentative_g + estimate;
            n.parent = ci;
            if !n.open {
                n.open = true;
                n.seq = self.next_seq;
                self.next_seq += 1;
                self.open_len += 1;
                grid.set_open(np, true);
            }
            self.open.push(NodeRef {
                idx: ni,
                f: n.f,
                seq: n.seq,
            });
        }

        self.nbuf = nbuf;
        Step::Expanded(current)
    }

    /// Iterate over the remaining steps, ending with the terminal one.
    pub fn steps<'a>(&'a mut self, grid: &'a mut Grid) -> Steps<'a> {
        Steps {
            search: self,
            grid,
            done: false,
        }
    }

    /// Step until the search finishes and return the outcome.
    pub fn run(&mut self, grid: &mut Grid) -> Outcome {
        self.steps(grid).for_each(drop);
        match self.status {
            SearchStatus::Succeeded => Outcome::Succeeded(self.path.clone()),
            _ => Outcome::Failed,
        }
    }

    fn reconstruct(&self, grid: &Grid, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while self.nodes[ci].parent != NO_PARENT {
            path.push(grid.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The terminal outcome, or `None` while running.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            SearchStatus::Running => None,
            SearchStatus::Succeeded => Some(Outcome::Succeeded(self.path.clone())),
            SearchStatus::Failed => Some(Outcome::Failed),
        }
    }

    /// The found path (empty unless succeeded).
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of cells currently in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }
}

/// Iterator returned by [`AstarSearch::steps`].
pub struct Steps<'a> {
    search: &'a mut AstarSearch,
    grid: &'a mut Grid,
    done: bool,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        let step = self.search.step(self.grid);
        self.done = step.is_terminal();
        Some(step)
    }
}
