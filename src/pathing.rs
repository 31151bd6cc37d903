use log::{debug, trace};
use std::fmt;
use std::str::FromStr;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::MazeError;
use crate::grid::Grid;
use crate::observers::{MazeObserver, StepEvent, StepKind};

/// Which hand stays on the wall.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TurnPreference {
    RightHand,
    LeftHand,
}

impl TurnPreference {
    /// The order in which directions are tried when facing `facing`: towards the preferred hand,
    /// straight on, away from the preferred hand, and finally back the way we came.
    pub fn sweep(self, facing: CompassPrimary) -> [CompassPrimary; 4] {
        match self {
            TurnPreference::RightHand => {
                [facing.turn_right(), facing, facing.turn_left(), facing.opposite()]
            }
            TurnPreference::LeftHand => {
                [facing.turn_left(), facing, facing.turn_right(), facing.opposite()]
            }
        }
    }
}

impl fmt::Display for TurnPreference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TurnPreference::RightHand => write!(f, "right hand"),
            TurnPreference::LeftHand => write!(f, "left hand"),
        }
    }
}

impl FromStr for TurnPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<TurnPreference, String> {
        match s.to_ascii_lowercase().as_ref() {
            "right" | "right-hand" => Ok(TurnPreference::RightHand),
            "left" | "left-hand" => Ok(TurnPreference::LeftHand),
            _ => Err(format!("'{}' is not a hand, use left or right", s)),
        }
    }
}

/// What a completed wall follower run did.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Traversal {
    pub moves: usize,
    /// Closed walls bumped into, counted once per test.
    pub walls_touched: usize,
    /// Every cell stood on, in order, from the start cell to the exit cell.
    pub trail: Vec<Cartesian2DCoordinate>,
}

/// Walk from the maze entrance to its exit keeping one hand on the wall.
///
/// The grid must carry the openings recorded by a generator run. Visited and traversed marks are
/// cleared first. The walker starts in the start cell facing away from the entrance, and at each
/// step takes the first open direction of `turn.sweep(facing)`, never leaving back out through the
/// entrance. Closed walls it tries are marked as traversed on the cell.
///
/// In a connected maze this always reaches the exit, though not by the shortest route. A walker that
/// is boxed in, or that has made more moves than there are (cell, facing) states, can never reach it
/// and the run fails with `MazeError::NoRouteToExit`.
pub fn wall_follower<O>(grid: &mut Grid,
                        turn: TurnPreference,
                        observer: &mut O)
                        -> Result<Traversal, MazeError>
    where O: MazeObserver + ?Sized
{
    let openings = *grid.openings().ok_or(MazeError::UninitializedMaze)?;
    grid.reset_marks();

    let max_moves = grid.size() * 4;
    let mut current = openings.start;
    let mut facing = openings.entrance.opposite();
    let mut traversal = Traversal {
        moves: 0,
        walls_touched: 0,
        trail: vec![current],
    };
    mark_visited(grid, current)?;
    debug!("{} wall follower from {} to {}", turn, openings.start, openings.finish);

    while current != openings.finish {
        if observer.is_cancelled() {
            debug!("wall follower cancelled after {} moves", traversal.moves);
            return Err(MazeError::Cancelled);
        }
        if traversal.moves >= max_moves {
            return Err(MazeError::NoRouteToExit { moves: traversal.moves });
        }

        let mut next_direction = None;
        for direction in turn.sweep(facing).iter().cloned() {
            if current == openings.start && direction == openings.entrance {
                continue;
            }
            let cell = grid.cell_mut(current).ok_or(MazeError::OutOfBounds {
                    coord: current,
                    direction: None,
                })?;
            if cell.is_open(direction) {
                next_direction = Some(direction);
                break;
            }
            cell.mark_traversed(direction);
            traversal.walls_touched += 1;
        }

        let direction = next_direction.ok_or(MazeError::NoRouteToExit { moves: traversal.moves })?;
        let next = grid.neighbour_at_direction(current, direction)?;
        mark_visited(grid, next)?;
        traversal.moves += 1;
        traversal.trail.push(next);

        let event = StepEvent {
            kind: StepKind::Moved,
            from: current,
            to: next,
            direction,
        };
        trace!("moved {} -> {} heading {}", event.from, event.to, event.direction);
        observer.on_step(&event);

        current = next;
        facing = direction;
    }

    if observer.is_cancelled() {
        debug!("wall follower cancelled on reaching the exit");
        return Err(MazeError::Cancelled);
    }
    debug!("reached the exit in {} moves touching {} walls",
           traversal.moves,
           traversal.walls_touched);
    observer.on_done();
    Ok(traversal)
}

fn mark_visited(grid: &mut Grid, coord: Cartesian2DCoordinate) -> Result<(), MazeError> {
    let cell = grid.cell_mut(coord).ok_or(MazeError::OutOfBounds {
            coord,
            direction: None,
        })?;
    cell.mark_visited();
    Ok(())
}
