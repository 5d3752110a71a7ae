mod cell;
mod grid;
mod patterns;
mod transition;

pub use cell::CellState;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
pub use transition::{DEFAULT_PARALLEL_THRESHOLD, PendingTransition, Strategy, TransitionEngine};
