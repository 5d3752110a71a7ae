//! Runs the engine against a simulated 60 Hz frame clock and prints every
//! generation as text.
//!
//! Usage: `headless [generations] [steps-per-second]`

use paced_life::{
    EditSurface, Engine, EngineConfig, presets,
    presentation::{self, InputEvent, Presenter, Status, TextPresenter},
};
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let generations: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);
    let rate: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10.0);

    let config = EngineConfig::default().with_dimensions(12, 12);
    let mut engine = match Engine::new(&config, Duration::ZERO) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("cannot start engine: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = engine.place_pattern(&presets::glider(), 1, 1) {
        log::error!("cannot place glider: {err}");
        std::process::exit(1);
    }

    let mut edit = EditSurface::new();
    let mut presenter = TextPresenter::with_script([InputEvent::SetRate(rate), InputEvent::Play]);
    let mut rng = rand::rng();
    presentation::dispatch_all(&mut presenter, &mut engine, &mut edit, &mut rng);
    presenter.render(engine.grid(), &Status::of(&engine));

    let mut now = Duration::ZERO;
    while engine.generation() < generations {
        now += FRAME;
        if engine.tick(now) {
            presenter.render(engine.grid(), &Status::of(&engine));
        }
    }

    for frame in presenter.frames() {
        println!("{frame}");
    }
    println!("simulated {:.2}s for {} generations", now.as_secs_f64(), engine.generation());
}
