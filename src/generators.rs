use log::{debug, trace};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::errors::MazeError;
use crate::grid::{Grid, MazeOpenings};
use crate::observers::{MazeObserver, StepEvent, StepKind};
use crate::randomness::RandomSource;

/// Everything the backtracker needs to know besides the grid itself.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GenerationParams {
    pub start: Cartesian2DCoordinate,
    pub entrance: CompassPrimary,
    pub finish: Cartesian2DCoordinate,
    pub exit: CompassPrimary,
    pub loop_count: usize,
}

impl GenerationParams {
    /// Enter through the west side of the top left cell, leave through the east side of the bottom
    /// right cell, no loops.
    pub fn for_grid(grid: &Grid) -> GenerationParams {
        GenerationParams {
            start: Cartesian2DCoordinate::new(0, 0),
            entrance: CompassPrimary::West,
            finish: Cartesian2DCoordinate::new(grid.width() as u32 - 1, grid.height() as u32 - 1),
            exit: CompassPrimary::East,
            loop_count: 0,
        }
    }

    pub fn start(mut self, start: Cartesian2DCoordinate, entrance: CompassPrimary) -> Self {
        self.start = start;
        self.entrance = entrance;
        self
    }

    pub fn finish(mut self, finish: Cartesian2DCoordinate, exit: CompassPrimary) -> Self {
        self.finish = finish;
        self.exit = exit;
        self
    }

    pub fn loops(mut self, loop_count: usize) -> Self {
        self.loop_count = loop_count;
        self
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct GenerationReport {
    /// Walls opened by the backtracker. Always one less than the number of cells.
    pub passages_carved: usize,
    pub loops_carved: usize,
    /// Loop candidates that had no closed wall left to open.
    pub loops_skipped: usize,
}

/// Carve a perfect maze with the randomized depth first backtracker, then optionally open extra walls
/// to make loops.
///
/// The grid is reset first. The start cell is opened onto the outside on its `entrance` side and the
/// finish cell on its `exit` side, and both openings are recorded on the grid for the wall follower.
/// From the start cell the algorithm keeps walking to a random unvisited neighbour, knocking down the
/// wall in between, and backs up along its path whenever it reaches a cell with no unvisited
/// neighbours. The walk is iterative with an explicit stack, so even very large grids are fine.
///
/// `observer.on_step` is called after every wall removal and `observer.on_done` once at the end.
/// Parameters are checked before the grid is touched.
///
/// An entrance or exit facing into the grid opens the wall it shares with that neighbour. Unless the
/// backtracker happens to carve through the same wall, the maze then has a loop and is not perfect.
pub fn recursive_backtracker<R, O>(grid: &mut Grid,
                                   params: &GenerationParams,
                                   rng: &mut R,
                                   observer: &mut O)
                                   -> Result<GenerationReport, MazeError>
    where R: RandomSource + ?Sized,
          O: MazeObserver + ?Sized
{
    validate_params(grid, params)?;
    debug!("generating {}x{} maze from {} to {} with {} loops",
           grid.width(),
           grid.height(),
           params.start,
           params.finish,
           params.loop_count);

    grid.initialize();
    grid.open_outer_wall(params.start, params.entrance)?;
    grid.open_outer_wall(params.finish, params.exit)?;
    grid.set_openings(MazeOpenings {
        start: params.start,
        entrance: params.entrance,
        finish: params.finish,
        exit: params.exit,
    });

    let mut report = GenerationReport::default();
    report.passages_carved = carve_spanning_tree(grid, params.start, rng, observer)?;

    let (loops_carved, loops_skipped) = carve_loops(grid, params.loop_count, rng, observer)?;
    report.loops_carved = loops_carved;
    report.loops_skipped = loops_skipped;

    check_cancelled(observer)?;
    debug!("generated maze: {:?}", report);
    observer.on_done();
    Ok(report)
}

/// Open a random closed wall on each of `loop_count` distinct, randomly chosen interior cells.
///
/// Chosen cells with every wall already open are skipped and not replaced.
/// Returns the number of walls opened and the number of cells skipped.
pub fn carve_loops<R, O>(grid: &mut Grid,
                         loop_count: usize,
                         rng: &mut R,
                         observer: &mut O)
                         -> Result<(usize, usize), MazeError>
    where R: RandomSource + ?Sized,
          O: MazeObserver + ?Sized
{
    if loop_count == 0 {
        return Ok((0, 0));
    }

    let candidates = grid.interior_cells();
    if loop_count > candidates.len() {
        return Err(MazeError::InsufficientCandidates {
            requested: loop_count,
            available: candidates.len(),
        });
    }

    let (mut carved, mut skipped) = (0, 0);
    for candidate_index in rng.sample_indices(candidates.len(), loop_count) {
        check_cancelled(observer)?;

        let coord = candidates[candidate_index];
        let closed = grid.cell(coord)
            .map(|cell| cell.closed_walls())
            .ok_or(MazeError::OutOfBounds {
                coord,
                direction: None,
            })?;
        if closed.is_empty() {
            trace!("loop candidate {} has no closed walls", coord);
            skipped += 1;
            continue;
        }

        let direction = closed[rng.pick_index(closed.len())];
        let neighbour = grid.neighbour_at_direction(coord, direction)?;
        grid.remove_wall_between(coord, neighbour)?;
        carved += 1;

        notify_step(observer,
                    StepEvent {
                        kind: StepKind::LoopCarved,
                        from: coord,
                        to: neighbour,
                        direction,
                    });
    }

    Ok((carved, skipped))
}

fn carve_spanning_tree<R, O>(grid: &mut Grid,
                             start: Cartesian2DCoordinate,
                             rng: &mut R,
                             observer: &mut O)
                             -> Result<usize, MazeError>
    where R: RandomSource + ?Sized,
          O: MazeObserver + ?Sized
{
    let mut carved = 0;
    mark_visited(grid, start);
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        check_cancelled(observer)?;

        let unvisited_neighbours = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|coord| grid.cell(*coord).map_or(false, |cell| !cell.is_visited()))
            .collect::<CoordinateSmallVec>();

        // Dead end, backtrack by leaving the current cell off the stack
        if unvisited_neighbours.is_empty() {
            continue;
        }

        stack.push(current);
        let next = unvisited_neighbours[rng.pick_index(unvisited_neighbours.len())];
        mark_visited(grid, next);
        let direction = grid.remove_wall_between(current, next)?;
        stack.push(next);
        carved += 1;

        notify_step(observer,
                    StepEvent {
                        kind: StepKind::PassageCarved,
                        from: current,
                        to: next,
                        direction,
                    });
    }

    Ok(carved)
}

fn validate_params(grid: &Grid, params: &GenerationParams) -> Result<(), MazeError> {
    for coord in &[params.start, params.finish] {
        if !grid.is_valid_coordinate(*coord) {
            return Err(MazeError::OutOfBounds {
                coord: *coord,
                direction: None,
            });
        }
    }

    let available = grid.interior_cells().len();
    if params.loop_count > available {
        return Err(MazeError::InsufficientCandidates {
            requested: params.loop_count,
            available,
        });
    }

    Ok(())
}

fn mark_visited(grid: &mut Grid, coord: Cartesian2DCoordinate) {
    if let Some(cell) = grid.cell_mut(coord) {
        cell.mark_visited();
    }
}

fn check_cancelled<O: MazeObserver + ?Sized>(observer: &O) -> Result<(), MazeError> {
    if observer.is_cancelled() {
        debug!("generation cancelled");
        Err(MazeError::Cancelled)
    } else {
        Ok(())
    }
}

fn notify_step<O: MazeObserver + ?Sized>(observer: &mut O, event: StepEvent) {
    trace!("{:?} {} -> {} heading {}", event.kind, event.from, event.to, event.direction);
    observer.on_step(&event);
}
