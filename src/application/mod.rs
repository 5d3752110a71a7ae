mod config;
mod edit;
mod engine;
mod pacing;

pub use config::EngineConfig;
pub use edit::{EditSurface, PaintGesture};
pub use engine::{ChangeEvent, Engine};
pub use pacing::{PacingController, PacingState};
