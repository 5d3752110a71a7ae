use macroquad::prelude::*;
use paced_life::{
    EditSurface, Engine, EngineConfig,
    presentation::{self, Presenter, Status},
    rendering::MacroquadPresenter,
    ui,
};
use std::time::Duration;

fn window_conf() -> Conf {
    let config = EngineConfig::default();
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: (ui::grid_area_width(config.width) + ui::PANEL_WIDTH) as i32,
        window_height: ui::grid_area_height(config.height).max(520.0) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Monotonic time since the window opened
fn now() -> Duration {
    Duration::from_secs_f64(get_time())
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = EngineConfig::default();
    let mut engine = match Engine::new(&config, now()) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("cannot start engine: {err}");
            return;
        }
    };
    let mut edit = EditSurface::new();
    let mut presenter = MacroquadPresenter::new(engine.grid().dimensions());
    let mut rng = ::rand::rng();

    loop {
        presentation::dispatch_all(&mut presenter, &mut engine, &mut edit, &mut rng);
        engine.tick(now());
        presenter.render(engine.grid(), &Status::of(&engine));
        next_frame().await;
    }
}
