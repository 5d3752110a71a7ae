use crate::presentation::InputEvent;
use crate::ui::{Button, CELL_SIZE, RATE_STEP};
use macroquad::prelude::*;

/// Map a screen position to the (row, col) of the cell under it
pub fn screen_to_cell(pos: (f32, f32), dimensions: (usize, usize)) -> Option<(usize, usize)> {
    let (width, height) = dimensions;
    if pos.0 < 0.0 || pos.1 < 0.0 {
        return None;
    }
    let col = (pos.0 / CELL_SIZE) as usize;
    let row = (pos.1 / CELL_SIZE) as usize;
    (row < height && col < width).then_some((row, col))
}

/// Pointer presses, drags and releases over the grid
fn pointer_events(mouse_pos: (f32, f32), dimensions: (usize, usize), events: &mut Vec<InputEvent>) {
    if is_mouse_button_released(MouseButton::Left) {
        events.push(InputEvent::PointerUp);
        return;
    }
    let Some((row, col)) = screen_to_cell(mouse_pos, dimensions) else {
        return;
    };
    if is_mouse_button_pressed(MouseButton::Left) {
        events.push(InputEvent::PointerDown { row, col });
    } else if is_mouse_button_down(MouseButton::Left) {
        events.push(InputEvent::PointerMove { row, col });
    }
}

fn keyboard_events(events: &mut Vec<InputEvent>) {
    let bindings: [(KeyCode, InputEvent); 6] = [
        (KeyCode::Space, InputEvent::TogglePlay),
        (KeyCode::N, InputEvent::Step),
        (KeyCode::C, InputEvent::Clear),
        (KeyCode::R, InputEvent::Randomize),
        (KeyCode::Up, InputEvent::AdjustRate(RATE_STEP)),
        (KeyCode::Down, InputEvent::AdjustRate(-RATE_STEP)),
    ];
    events.extend(
        bindings
            .into_iter()
            .filter(|(key, _)| is_key_pressed(*key))
            .map(|(_, event)| event),
    );
}

/// Everything the user did this frame, in dispatch order
pub fn collect_events(buttons: &[Button], dimensions: (usize, usize)) -> Vec<InputEvent> {
    let mouse_pos = mouse_position();
    let mut events: Vec<InputEvent> = buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .map(Button::action)
        .collect();
    pointer_events(mouse_pos, dimensions, &mut events);
    keyboard_events(&mut events);
    events
}
