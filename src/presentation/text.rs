use super::{InputEvent, Presenter, Status};
use crate::domain::Grid;
use std::collections::VecDeque;

/// Renders generations as text frames (`#` alive, `.` dead) and replays a
/// scripted input queue. Used by the headless binary and in tests.
#[derive(Debug, Default)]
pub struct TextPresenter {
    frames: Vec<String>,
    script: VecDeque<InputEvent>,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            frames: Vec::new(),
            script: events.into_iter().collect(),
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.script.push_back(event);
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    /// Grid rows only, no status line
    pub fn draw_grid(grid: &Grid) -> String {
        let mut out = String::with_capacity((grid.width() + 1) * grid.height());
        for (_, col, cell) in grid.iter_cells() {
            out.push(if cell.is_alive() { '#' } else { '.' });
            if col + 1 == grid.width() {
                out.push('\n');
            }
        }
        out
    }
}

impl Presenter for TextPresenter {
    fn render(&mut self, grid: &Grid, status: &Status) {
        let mut frame = format!(
            "gen {} | {} | {:.1} steps/s | pop {}\n",
            status.generation,
            if status.running { "running" } else { "paused" },
            status.rate,
            status.population
        );
        frame.push_str(&Self::draw_grid(grid));
        self.frames.push(frame);
    }

    fn poll_input(&mut self) -> Vec<InputEvent> {
        self.script.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellState;

    #[test]
    fn test_draw_grid() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 1, CellState::Alive).unwrap();
        grid.set(1, 2, CellState::Alive).unwrap();
        assert_eq!(TextPresenter::draw_grid(&grid), ".#.\n..#\n");
    }

    #[test]
    fn test_render_records_frame() {
        let grid = Grid::new(2, 1).unwrap();
        let mut presenter = TextPresenter::new();
        let status = Status { generation: 4, running: true, rate: 5.0, population: 0 };
        presenter.render(&grid, &status);
        assert_eq!(
            presenter.last_frame(),
            Some("gen 4 | running | 5.0 steps/s | pop 0\n..\n")
        );
        assert_eq!(presenter.frames().len(), 1);
    }

    #[test]
    fn test_script_drains_once() {
        let mut presenter = TextPresenter::with_script([InputEvent::Step]);
        presenter.push_input(InputEvent::Play);
        assert_eq!(presenter.poll_input(), vec![InputEvent::Step, InputEvent::Play]);
        assert!(presenter.poll_input().is_empty());
    }
}
