//! Hooks through which front ends follow a generator or a wall follower as it runs.
//!
//! The algorithms call `on_step` synchronously after every change to the grid and `on_done` once when
//! they finish. Nothing here knows about threads or drawing: an animated front end runs the algorithm
//! wherever it likes and redraws from inside the callbacks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum StepKind {
    /// The backtracker opened a wall into an unvisited cell.
    PassageCarved,
    /// An extra wall was opened after the perfect maze was complete.
    LoopCarved,
    /// The wall follower moved into a neighbouring cell.
    Moved,
}

/// What changed in one step. `from` and `to` are neighbours and `direction` leads from one to the other.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct StepEvent {
    pub kind: StepKind,
    pub from: Cartesian2DCoordinate,
    pub to: Cartesian2DCoordinate,
    pub direction: CompassPrimary,
}

pub trait MazeObserver {
    fn on_step(&mut self, _event: &StepEvent) {}

    fn on_done(&mut self) {}

    /// Polled at every step boundary. Returning true stops the run with `MazeError::Cancelled`.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Ignores everything.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoopObserver;

impl MazeObserver for NoopObserver {}

/// Shared flag for stopping a run from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Adapts a pair of closures to `MazeObserver`.
pub struct Callbacks<StepFn, DoneFn>
    where StepFn: FnMut(&StepEvent),
          DoneFn: FnMut()
{
    on_step: StepFn,
    on_done: DoneFn,
    cancel_token: Option<CancelToken>,
}

impl<StepFn, DoneFn> Callbacks<StepFn, DoneFn>
    where StepFn: FnMut(&StepEvent),
          DoneFn: FnMut()
{
    pub fn new(on_step: StepFn, on_done: DoneFn) -> Self {
        Callbacks {
            on_step,
            on_done,
            cancel_token: None,
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel_token = Some(token);
        self
    }
}

impl<StepFn, DoneFn> MazeObserver for Callbacks<StepFn, DoneFn>
    where StepFn: FnMut(&StepEvent),
          DoneFn: FnMut()
{
    fn on_step(&mut self, event: &StepEvent) {
        (self.on_step)(event)
    }

    fn on_done(&mut self) {
        (self.on_done)()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_token.as_ref().map_or(false, CancelToken::is_cancelled)
    }
}

/// Keeps every step event and counts completions, for replaying a run afterwards.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    pub steps: Vec<StepEvent>,
    pub done_count: usize,
}

impl StepRecorder {
    pub fn new() -> StepRecorder {
        StepRecorder::default()
    }

    pub fn count_of(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|step| step.kind == kind).count()
    }
}

impl MazeObserver for StepRecorder {
    fn on_step(&mut self, event: &StepEvent) {
        self.steps.push(*event);
    }

    fn on_done(&mut self) {
        self.done_count += 1;
    }
}
