use crate::domain::Grid;
use crate::input;
use crate::presentation::{InputEvent, Presenter, Status};
use crate::ui::{self, Button, CELL_SIZE};
use macroquad::prelude::*;

/// Draw the grid, one rectangle per cell, with grid lines on top
pub fn draw_grid(grid: &Grid) {
    let alive_color = Color::from_rgba(0, 255, 150, 255);
    let dead_color = Color::from_rgba(15, 15, 15, 255);
    let grid_line_color = Color::from_rgba(40, 40, 40, 255);

    for (row, col, cell) in grid.iter_cells() {
        let x = col as f32 * CELL_SIZE;
        let y = row as f32 * CELL_SIZE;
        let color = if cell.is_alive() { alive_color } else { dead_color };
        draw_rectangle(x, y, CELL_SIZE, CELL_SIZE, color);
        draw_rectangle_lines(x, y, CELL_SIZE, CELL_SIZE, 1.0, grid_line_color);
    }
}

/// Draw the side panel: buttons, then run status
pub fn draw_controls(grid: &Grid, status: &Status, buttons: &[Button]) {
    let mouse_pos = mouse_position();
    let px = ui::panel_x(grid.width());
    let screen_h = screen_height();

    draw_rectangle(
        px - ui::PANEL_MARGIN,
        0.0,
        ui::PANEL_WIDTH,
        screen_h,
        Color::from_rgba(30, 30, 30, 255),
    );
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let top = 20.0 + buttons.len() as f32 * (ui::BUTTON_HEIGHT + 8.0) + 20.0;
    let value_color = Color::from_rgba(180, 180, 180, 255);
    let status_color = if status.running {
        Color::from_rgba(0, 255, 0, 255)
    } else {
        Color::from_rgba(255, 165, 0, 255)
    };

    let labels = [
        ("Speed:".to_owned(), 16.0, WHITE),
        (format!("{:.1} gen/s", status.rate), 14.0, value_color),
        ("Generation:".to_owned(), 16.0, WHITE),
        (status.generation.to_string(), 20.0, Color::from_rgba(0, 255, 150, 255)),
        ("Population:".to_owned(), 16.0, WHITE),
        (status.population.to_string(), 14.0, value_color),
        ("Status:".to_owned(), 16.0, WHITE),
        (
            (if status.running { "Running" } else { "Paused" }).to_owned(),
            16.0,
            status_color,
        ),
    ];
    labels.iter().enumerate().for_each(|(i, (text, size, color))| {
        draw_text(text, px, top + i as f32 * 20.0, *size, *color);
    });

    let help = ["LMB drag: paint", "Space: play/pause", "N: next  C: clear", "R: random  Up/Down: speed"];
    help.iter().enumerate().for_each(|(i, text)| {
        draw_text(text, px, top + 180.0 + i as f32 * 14.0, 12.0, GRAY);
    });
}

/// The macroquad window as a presenter
pub struct MacroquadPresenter {
    dimensions: (usize, usize),
    buttons: Vec<Button>,
}

impl MacroquadPresenter {
    pub fn new(dimensions: (usize, usize)) -> Self {
        Self {
            dimensions,
            buttons: ui::create_buttons(dimensions.0),
        }
    }
}

impl Presenter for MacroquadPresenter {
    fn render(&mut self, grid: &Grid, status: &Status) {
        clear_background(BLACK);
        draw_grid(grid);
        draw_controls(grid, status, &self.buttons);
    }

    fn poll_input(&mut self) -> Vec<InputEvent> {
        input::collect_events(&self.buttons, self.dimensions)
    }
}
