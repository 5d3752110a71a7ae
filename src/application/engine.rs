use super::{EngineConfig, PacingController, PacingState};
use crate::domain::{CellState, Grid, Pattern, TransitionEngine};
use crate::error::Result;
use rand::Rng;
use std::time::Duration;

/// Emitted once per completed step and once per edit so presenters know
/// when to redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChangeEvent {
    Stepped { generation: u64, flipped: usize },
    Edited { row: usize, col: usize, state: CellState },
    /// Whole-grid rewrite (clear, randomize, pattern placement)
    Reset,
}

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Engine owns the grid and the pacing controller and serializes every
/// mutation: edits, manual steps and paced ticks all go through `&mut self`.
pub struct Engine {
    grid: Grid,
    transition: TransitionEngine,
    pacing: PacingController,
    generation: u64,
    revision: u64,
    listeners: Vec<Listener>,
}

impl Engine {
    /// Build a paused engine with an all-dead grid. `now` seeds the pacing gate.
    pub fn new(config: &EngineConfig, now: Duration) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        let pacing =
            PacingController::new(config.default_rate, config.min_rate, config.max_rate, now)?;
        let transition = TransitionEngine::new(config.strategy)
            .with_parallel_threshold(config.parallel_threshold);
        log::info!(
            "engine ready: {}x{} grid, {} steps/s, {} evaluation",
            config.width,
            config.height,
            pacing.rate(),
            transition.strategy().name()
        );
        Ok(Self {
            grid,
            transition,
            pacing,
            generation: 0,
            revision: 0,
            listeners: Vec::new(),
        })
    }

    /// Read-only view for presenters
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pacing(&self) -> &PacingController {
        &self.pacing
    }

    /// Completed steps since start or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bumped on every change notification; presenters may poll it instead
    /// of subscribing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: ChangeEvent) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn query_cell(&self, row: usize, col: usize) -> Result<CellState> {
        self.grid.get(row, col)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, state: CellState) -> Result<()> {
        self.grid.set(row, col, state)?;
        self.notify(ChangeEvent::Edited { row, col, state });
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<CellState> {
        let state = self.grid.toggle(row, col)?;
        self.notify(ChangeEvent::Edited { row, col, state });
        Ok(state)
    }

    /// Advance exactly one generation, whether running or paused
    pub fn step_once(&mut self) {
        let pending = self.transition.step(&mut self.grid);
        self.generation += 1;
        log::debug!("generation {}: {} cells flipped", self.generation, pending.len());
        self.notify(ChangeEvent::Stepped {
            generation: self.generation,
            flipped: pending.len(),
        });
    }

    pub fn play(&mut self) {
        if !self.pacing.is_running() {
            log::info!("playing at {} steps/s", self.pacing.rate());
        }
        self.pacing.play();
    }

    pub fn pause(&mut self) {
        if self.pacing.is_running() {
            log::info!("paused at generation {}", self.generation);
        }
        self.pacing.pause();
    }

    pub fn toggle_running(&mut self) -> bool {
        match self.pacing.toggle() {
            PacingState::Running => log::info!("playing at {} steps/s", self.pacing.rate()),
            PacingState::Paused => log::info!("paused at generation {}", self.generation),
        }
        self.pacing.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.pacing.is_running()
    }

    pub fn rate(&self) -> f64 {
        self.pacing.rate()
    }

    /// Set steps per second; see [`PacingController::set_rate`]
    pub fn set_rate(&mut self, steps_per_second: f64) -> Result<f64> {
        let applied = self.pacing.set_rate(steps_per_second)?;
        log::info!("rate set to {applied} steps/s");
        Ok(applied)
    }

    pub fn adjust_rate(&mut self, delta: f64) -> f64 {
        let applied = self.pacing.adjust_rate(delta);
        log::info!("rate set to {applied} steps/s");
        applied
    }

    /// Host periodic callback. Steps at most once, and only when running
    /// and the pacing interval has elapsed. Returns whether a step happened.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.pacing.should_step(now) {
            self.step_once();
            true
        } else {
            false
        }
    }

    /// Kill every cell, pause and restart the generation count
    pub fn clear(&mut self) {
        self.grid.clear();
        self.reset_run();
        log::info!("grid cleared");
    }

    /// Fill the grid randomly, pause and restart the generation count
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        self.grid.randomize(density, rng);
        self.reset_run();
        log::info!("grid randomized, population {}", self.grid.population());
    }

    /// Stamp a pattern with its top-left corner at (row, col)
    pub fn place_pattern(&mut self, pattern: &Pattern, row: usize, col: usize) -> Result<()> {
        pattern.place_on(&mut self.grid, row, col)?;
        self.notify(ChangeEvent::Reset);
        Ok(())
    }

    fn reset_run(&mut self) {
        self.pacing.pause();
        self.generation = 0;
        self.notify(ChangeEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use crate::error::EngineError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn engine(width: usize, height: usize) -> Engine {
        let config = EngineConfig::default().with_dimensions(width, height);
        Engine::new(&config, Duration::ZERO).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = engine(6, 4);
        assert!(!engine.is_running());
        assert_eq!(engine.grid().dimensions(), (6, 4));
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.rate(), 5.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_dimensions(0, 3);
        assert!(matches!(
            Engine::new(&config, Duration::ZERO),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_edit_out_of_bounds_does_not_notify() {
        let mut engine = engine(3, 3);
        assert!(engine.set_cell(3, 0, CellState::Alive).is_err());
        assert!(engine.toggle_cell(0, 9).is_err());
        assert!(engine.query_cell(9, 9).is_err());
        assert_eq!(engine.revision(), 0);
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_notifications() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine(3, 3);
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(*event));

        engine.set_cell(1, 1, CellState::Alive).unwrap();
        assert_eq!(engine.toggle_cell(0, 0).unwrap(), CellState::Alive);
        engine.step_once();

        assert_eq!(
            *events.borrow(),
            vec![
                ChangeEvent::Edited { row: 1, col: 1, state: CellState::Alive },
                ChangeEvent::Edited { row: 0, col: 0, state: CellState::Alive },
                ChangeEvent::Stepped { generation: 1, flipped: 2 },
            ]
        );
        assert_eq!(engine.revision(), 3);
    }

    #[test]
    fn test_step_once_while_paused() {
        let mut engine = engine(5, 5);
        engine.place_pattern(&presets::blinker(), 2, 1).unwrap();
        engine.step_once();
        assert_eq!(engine.generation(), 1);
        assert!(engine.query_cell(1, 2).unwrap().is_alive());
        assert!(engine.query_cell(3, 2).unwrap().is_alive());
        assert!(!engine.query_cell(2, 1).unwrap().is_alive());
    }

    #[test]
    fn test_tick_respects_running_flag() {
        let mut engine = engine(5, 5);
        engine.place_pattern(&presets::blinker(), 2, 1).unwrap();
        let before = engine.grid().clone();
        assert!(!engine.tick(Duration::from_secs(100)));
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_tick_paces_steps() {
        let mut engine = engine(5, 5);
        engine.play();
        assert!(!engine.tick(ms(199)));
        assert!(engine.tick(ms(200)));
        assert!(!engine.tick(ms(300)));
        assert!(engine.tick(ms(400)));
        assert_eq!(engine.generation(), 2);

        engine.pause();
        assert!(!engine.tick(ms(10_000)));
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_toggle_running() {
        let mut engine = engine(5, 5);
        assert!(engine.toggle_running());
        assert_eq!(engine.pacing().state(), PacingState::Running);
        assert!(!engine.toggle_running());
        assert!(!engine.is_running());
    }

    #[test]
    fn test_tiny_min_rate_rejected() {
        let config = EngineConfig::default().with_rate_bounds(1e-30, 60.0);
        assert!(matches!(
            Engine::new(&config, Duration::ZERO),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let config = EngineConfig::default().with_dimensions(usize::MAX, 2);
        assert!(Engine::new(&config, Duration::ZERO).is_err());
    }

    #[test]
    fn test_place_pattern_at_max_coordinate() {
        let mut engine = engine(5, 5);
        assert!(matches!(
            engine.place_pattern(&presets::glider(), usize::MAX, 0),
            Err(EngineError::PatternOutOfBounds { .. })
        ));
        assert_eq!(engine.revision(), 0);
    }

    #[test]
    fn test_invalid_rate_keeps_interval() {
        let mut engine = engine(5, 5);
        assert!(engine.set_rate(0.0).is_err());
        assert!(engine.set_rate(-2.0).is_err());
        engine.play();
        assert!(engine.tick(ms(200)));
    }

    #[test]
    fn test_clear_and_randomize_reset_run() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut engine = engine(8, 8);
        engine.randomize(1.0, &mut rng);
        assert_eq!(engine.population(), 64);
        engine.play();
        engine.step_once();
        engine.clear();
        assert!(!engine.is_running());
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn test_place_pattern_out_of_bounds() {
        let mut engine = engine(3, 3);
        assert!(engine.place_pattern(&presets::lwss(), 0, 0).is_err());
        assert_eq!(engine.revision(), 0);
    }
}
