// Domain layer - grid model and the Life transition
pub mod domain;

// Application layer - engine, pacing, editing
pub mod application;

pub mod error;

// Presentation seam and adapters
pub mod presentation;
pub mod ui;
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use application::{ChangeEvent, EditSurface, Engine, EngineConfig, PacingState, PaintGesture};
pub use domain::{CellState, Grid, Pattern, PendingTransition, Strategy, TransitionEngine, presets};
pub use error::EngineError;
