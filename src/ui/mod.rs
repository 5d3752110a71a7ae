mod button;

pub use button::Button;

use crate::presentation::InputEvent;

pub const PANEL_WIDTH: f32 = 180.0;
pub const PANEL_MARGIN: f32 = 10.0;
pub const BUTTON_HEIGHT: f32 = 36.0;
pub const CELL_SIZE: f32 = 10.0;

/// Keyboard speed step in steps per second
pub const RATE_STEP: f64 = 1.0;

/// Width in pixels of a grid with `width` columns
pub fn grid_area_width(width: usize) -> f32 {
    width as f32 * CELL_SIZE
}

pub fn grid_area_height(height: usize) -> f32 {
    height as f32 * CELL_SIZE
}

/// Left edge of the control panel, right of the grid
pub fn panel_x(width: usize) -> f32 {
    grid_area_width(width) + PANEL_MARGIN
}

/// Control buttons stacked at the top of the panel
pub fn create_buttons(width: usize) -> Vec<Button> {
    let px = panel_x(width);
    let w = PANEL_WIDTH - 2.0 * PANEL_MARGIN;
    [
        ("Play/Pause", InputEvent::TogglePlay),
        ("Next", InputEvent::Step),
        ("Clear", InputEvent::Clear),
        ("Random", InputEvent::Randomize),
        ("Faster", InputEvent::AdjustRate(RATE_STEP)),
        ("Slower", InputEvent::AdjustRate(-RATE_STEP)),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (label, action))| {
        Button::new(px, 20.0 + i as f32 * (BUTTON_HEIGHT + 8.0), w, BUTTON_HEIGHT, label, action)
    })
    .collect()
}
