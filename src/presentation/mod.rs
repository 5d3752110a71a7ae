//! The seam between the engine and whatever draws it.
//!
//! A presenter renders the grid and reports user input as [`InputEvent`]s;
//! [`dispatch`] turns those events into engine and edit-surface calls. The
//! macroquad window and the text renderer are both presenters.

mod text;

pub use text::TextPresenter;

use crate::application::{EditSurface, Engine};
use crate::domain::Grid;
use crate::error::Result;
use rand::Rng;

/// Share of cells left alive by a randomize request
pub const RANDOM_DENSITY: f64 = 0.3;

/// Snapshot of the run state shown next to the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Status {
    pub generation: u64,
    pub running: bool,
    pub rate: f64,
    pub population: usize,
}

impl Status {
    pub fn of(engine: &Engine) -> Self {
        Self {
            generation: engine.generation(),
            running: engine.is_running(),
            rate: engine.rate(),
            population: engine.population(),
        }
    }
}

/// Input already mapped to grid coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { row: usize, col: usize },
    PointerMove { row: usize, col: usize },
    PointerUp,
    TogglePlay,
    Play,
    Pause,
    Step,
    Clear,
    Randomize,
    AdjustRate(f64),
    SetRate(f64),
}

pub trait Presenter {
    fn render(&mut self, grid: &Grid, status: &Status);

    /// Input gathered since the last poll, oldest first
    fn poll_input(&mut self) -> Vec<InputEvent>;
}

/// Apply one input event
pub fn dispatch<R: Rng + ?Sized>(
    engine: &mut Engine,
    edit: &mut EditSurface,
    event: InputEvent,
    rng: &mut R,
) -> Result<()> {
    match event {
        InputEvent::PointerDown { row, col } => {
            edit.begin(engine, row, col)?;
        }
        InputEvent::PointerMove { row, col } => {
            edit.over(engine, row, col)?;
        }
        InputEvent::PointerUp => edit.end(),
        InputEvent::TogglePlay => {
            engine.toggle_running();
        }
        InputEvent::Play => engine.play(),
        InputEvent::Pause => engine.pause(),
        InputEvent::Step => engine.step_once(),
        InputEvent::Clear => engine.clear(),
        InputEvent::Randomize => engine.randomize(RANDOM_DENSITY, rng),
        InputEvent::AdjustRate(delta) => {
            engine.adjust_rate(delta);
        }
        InputEvent::SetRate(rate) => {
            engine.set_rate(rate)?;
        }
    }
    Ok(())
}

/// Dispatch everything a presenter has queued. Rejected events are logged
/// and skipped so one bad coordinate does not drop the rest of the frame.
pub fn dispatch_all<P, R>(presenter: &mut P, engine: &mut Engine, edit: &mut EditSurface, rng: &mut R)
where
    P: Presenter + ?Sized,
    R: Rng + ?Sized,
{
    for event in presenter.poll_input() {
        if let Err(err) = dispatch(engine, edit, event, rng) {
            log::warn!("ignored {event:?}: {err}");
        }
    }
}
