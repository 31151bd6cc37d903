use std::error::Error;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};

/// Contract violations reported by the grid, the generator and the wall follower.
///
/// None of these are transient. A caller seeing one has passed bad input or broken a grid invariant.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    InvalidDimensions { width: usize, height: usize },
    /// A coordinate, or the step from it in `direction`, falls outside the grid.
    OutOfBounds {
        coord: Cartesian2DCoordinate,
        direction: Option<CompassPrimary>,
    },
    InvalidAdjacency {
        a: Cartesian2DCoordinate,
        b: Cartesian2DCoordinate,
    },
    InsufficientCandidates { requested: usize, available: usize },
    UninitializedMaze,
    Cancelled,
    /// The wall follower revisited a (cell, facing) state or got boxed in.
    NoRouteToExit { moves: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {}x{}, both must be at least 1", width, height)
            }
            MazeError::OutOfBounds { coord, direction: Some(dir) } => {
                write!(f, "no cell {} of {}", dir, coord)
            }
            MazeError::OutOfBounds { coord, direction: None } => {
                write!(f, "coordinate {} is outside the grid", coord)
            }
            MazeError::InvalidAdjacency { a, b } => {
                write!(f, "cells {} and {} are not adjacent", a, b)
            }
            MazeError::InsufficientCandidates { requested, available } => {
                write!(f,
                       "{} loops requested but only {} interior cells are available",
                       requested,
                       available)
            }
            MazeError::UninitializedMaze => {
                write!(f, "the maze has no recorded entrance and exit, generate it first")
            }
            MazeError::Cancelled => write!(f, "cancelled"),
            MazeError::NoRouteToExit { moves } => {
                write!(f, "wall follower gave up after {} moves without reaching the exit", moves)
            }
        }
    }
}

impl Error for MazeError {}
