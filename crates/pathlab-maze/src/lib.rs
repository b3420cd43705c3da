//! Maze generation for pathlab: a randomized recursive backtracker over a
//! 2-cell lattice, producing perfect mazes from the top-left to the
//! bottom-right corner.

pub mod mazegen;

pub use mazegen::MazeGen;
