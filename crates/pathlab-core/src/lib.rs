//! **pathlab-core** — the grid model of the pathlab A* visualiser.
//!
//! This crate provides the types every other pathlab crate builds on:
//! geometry primitives, the five-flag [`Cell`], and the [`Grid`] arena that
//! enforces the single start / single end invariants.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;

/// Default grid side length.
pub const DEFAULT_SIZE: i32 = 25;
