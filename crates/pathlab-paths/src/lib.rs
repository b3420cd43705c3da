//! Pathfinding for the pathlab grid.
//!
//! - **A\*** step-wise shortest-path search ([`AstarSearch`]), the engine the
//!   visualiser animates
//! - **Flood fill** reachability ([`Reachable`]), used to repair mazes
//!
//! [`Grid`](pathlab_core::Grid) implements [`Pather`] and [`AstarPather`]:
//! cardinal moves onto non-wall cells, Manhattan estimate.

mod astar;
mod distance;
mod reach;
mod traits;

pub use astar::{AstarSearch, Outcome, SearchStatus, Step, Steps};
pub use distance::manhattan;
pub use reach::Reachable;
pub use traits::{AstarPather, Pather};
