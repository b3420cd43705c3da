//! **pathlab** — an interactive A* pathfinding lab.
//!
//! Paint walls, a start and an end on a square grid (or generate a maze),
//! then watch A* explore it step by step. The [`Session`] carries every user
//! intent; [`LabModel`] puts it in a terminal, [`animate`] runs it headless.

pub mod animate;
pub mod colors;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod snapshot;
pub mod tile;

pub use animate::animate;
pub use config::LabConfig;
pub use error::{LabError, Result};
pub use model::LabModel;
pub use session::{Mode, RunState, SearchStats, Session};
pub use snapshot::{Snapshot, ascii};
