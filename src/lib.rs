//! **mazes** generates rectangular mazes and walks them with a hand on the wall.
//!
//! A `Grid` of walled cells is carved into a perfect maze by a randomized depth first backtracker,
//! optionally with extra passages knocked through to make loops. The wall follower in `pathing` then
//! walks from the entrance to the exit. Both report each step to a `MazeObserver`, so a front end can
//! animate them.

pub mod analysis;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod observers;
pub mod pathing;
pub mod randomness;
pub mod units;
mod utils;

pub use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
pub use crate::errors::MazeError;
pub use crate::generators::{recursive_backtracker, GenerationParams, GenerationReport};
pub use crate::grid::{Grid, MazeOpenings};
pub use crate::observers::{Callbacks, CancelToken, MazeObserver, NoopObserver, StepEvent, StepKind};
pub use crate::pathing::{wall_follower, Traversal, TurnPreference};
