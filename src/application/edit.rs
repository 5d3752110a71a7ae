use super::Engine;
use crate::domain::CellState;
use crate::error::Result;

/// Drag-painting state. The first cell pressed decides what the rest of
/// the drag paints: pressing a live cell paints dead, a dead cell paints
/// alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintGesture {
    pub active: bool,
    pub target: CellState,
}

impl Default for PaintGesture {
    fn default() -> Self {
        Self {
            active: false,
            target: CellState::Alive,
        }
    }
}

/// Translates begin/move/end pointer events into engine edits.
#[derive(Clone, Debug, Default)]
pub struct EditSurface {
    gesture: PaintGesture,
    last_painted: Option<(usize, usize)>,
}

impl EditSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> PaintGesture {
        self.gesture
    }

    /// Pointer pressed on a cell: toggle it and start painting its new state.
    /// An out-of-bounds press starts nothing.
    pub fn begin(&mut self, engine: &mut Engine, row: usize, col: usize) -> Result<CellState> {
        let target = engine.toggle_cell(row, col)?;
        self.gesture = PaintGesture { active: true, target };
        self.last_painted = Some((row, col));
        Ok(target)
    }

    /// Pointer entered a cell. Forces it to the gesture's target while a
    /// gesture is active; returns whether an edit was made.
    pub fn over(&mut self, engine: &mut Engine, row: usize, col: usize) -> Result<bool> {
        if !self.gesture.active || self.last_painted == Some((row, col)) {
            return Ok(false);
        }
        engine.set_cell(row, col, self.gesture.target)?;
        self.last_painted = Some((row, col));
        Ok(true)
    }

    pub fn end(&mut self) {
        self.gesture.active = false;
        self.last_painted = None;
    }
}
